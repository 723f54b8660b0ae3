//! Photo search across self-hosted photo services.
//!
//! The crate fetches photo metadata from Immich and Photoprism, normalises
//! each provider's date semantics, drops videos, tags every record with its
//! source, and returns one merged list. Provider failures degrade the result
//! to a partial list with warnings instead of failing the search.
//!
//! - [`domain`]: range normalisation, record classification, and the search
//!   service, with ports for providers, integration lookup, and serialization
//! - [`outbound`]: reqwest adapters and the JSON serializer
//! - [`settings`]: OrthoConfig-backed provider settings
//! - [`service_builder`]: wiring from settings to a ready service

pub mod domain;
pub mod outbound;
pub mod service_builder;
pub mod settings;
pub mod telemetry;

pub use domain::{PhotoSearchOutcome, PhotoSearchRequest, PhotoSearchService};
pub use service_builder::build_photo_search_service;
pub use settings::{PhotoSearchSettings, SettingsError};
