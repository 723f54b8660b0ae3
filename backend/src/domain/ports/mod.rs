//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe how the search pipeline talks to driven adapters: provider
//! HTTP clients, the per-user integration settings store, and the output
//! serializer. Each fallible port exposes a typed error so adapters map their
//! failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod asset_serializer;
mod photo_provider;
mod user_integration_config;

#[cfg(test)]
pub use asset_serializer::MockAssetSerializer;
pub use asset_serializer::AssetSerializer;
#[cfg(test)]
pub use photo_provider::MockPhotoProvider;
pub use photo_provider::{FixturePhotoProvider, PhotoProvider, PhotoProviderError};
#[cfg(test)]
pub use user_integration_config::MockUserIntegrationConfig;
pub use user_integration_config::{
    FixtureUserIntegrationConfig, UserIntegrationConfig, UserIntegrationConfigError,
    integration_configured,
};
