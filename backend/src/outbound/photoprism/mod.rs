//! Photoprism outbound adapter.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_PHOTOPRISM_PAGE_SIZE, PhotoprismHttpProvider};
