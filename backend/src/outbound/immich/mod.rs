//! Immich outbound adapter.
//!
//! A thin HTTP implementation of the `PhotoProvider` port backed by Immich's
//! metadata search endpoint.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_IMMICH_PAGE_SIZE, ImmichHttpProvider};
