//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **immich** / **photoprism**: reqwest-backed `PhotoProvider`s
//! - **json_serializer**: the stable output shape for tagged assets
//! - **settings_integrations**: integration lookup driven by settings
//!
//! Adapters translate between provider wire formats and domain types. Range
//! normalisation, filtering, and merging stay in the domain.

mod http_support;
pub mod immich;
pub mod json_serializer;
pub mod photoprism;
pub mod settings_integrations;

pub use immich::ImmichHttpProvider;
pub use json_serializer::JsonAssetSerializer;
pub use photoprism::PhotoprismHttpProvider;
pub use settings_integrations::SettingsIntegrationConfig;
