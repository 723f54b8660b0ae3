//! Provider settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PHOTO_SEARCH_*` environment variables, or a
//! configuration file. Every field is optional; accessors apply defaults and
//! validate the raw strings.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::{AssetSource, BoundaryPolicy, UnknownBoundaryPolicy, default_boundary_policy};

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Errors raised while interpreting [`PhotoSearchSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// A provider base URL did not parse.
    #[error("invalid {provider} base url {value:?}: {reason}")]
    InvalidUrl {
        /// Provider the URL belongs to.
        provider: AssetSource,
        /// Raw configured value.
        value: String,
        /// Parser message.
        reason: String,
    },
    /// A boundary policy name was not recognised.
    #[error("invalid {provider} boundary policy: {policy}")]
    InvalidPolicy {
        /// Provider the policy belongs to.
        provider: AssetSource,
        /// Parse failure.
        policy: UnknownBoundaryPolicy,
    },
    /// The request timeout was zero.
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
    /// The reqwest client could not be built.
    #[error("failed to build {provider} http client: {message}")]
    Client {
        /// Provider whose client failed.
        provider: AssetSource,
        /// Underlying error text.
        message: String,
    },
}

/// Connection details for one provider, present only when complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoint {
    /// Base URL the provider's API hangs off.
    pub base_url: Url,
    /// API key or session token sent with each request.
    pub api_key: String,
}

/// Settings controlling which providers are searched and how.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PHOTO_SEARCH")]
pub struct PhotoSearchSettings {
    /// Immich server base URL.
    pub immich_url: Option<String>,
    /// Immich API key.
    pub immich_api_key: Option<String>,
    /// Photoprism server base URL.
    pub photoprism_url: Option<String>,
    /// Photoprism session or app token.
    pub photoprism_api_key: Option<String>,
    /// Per-request timeout in milliseconds.
    #[ortho_config(default = 10_000)]
    pub request_timeout_ms: u64,
    /// Number of records requested from each provider.
    pub page_size: Option<u32>,
    /// Override for Immich's boundary policy.
    pub immich_boundary_policy: Option<String>,
    /// Override for Photoprism's boundary policy.
    pub photoprism_boundary_policy: Option<String>,
}

impl Default for PhotoSearchSettings {
    fn default() -> Self {
        Self {
            immich_url: None,
            immich_api_key: None,
            photoprism_url: None,
            photoprism_api_key: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            page_size: None,
            immich_boundary_policy: None,
            photoprism_boundary_policy: None,
        }
    }
}

impl PhotoSearchSettings {
    /// Return the request timeout as a [`Duration`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] for a zero timeout.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self.request_timeout_ms {
            0 => Err(SettingsError::ZeroTimeout),
            millis => Ok(Duration::from_millis(millis)),
        }
    }

    /// Return the configured page size, falling back to the default.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }

    /// Return the boundary policy for `source`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidPolicy`] for an unknown policy name.
    pub fn boundary_policy(&self, source: AssetSource) -> Result<BoundaryPolicy, SettingsError> {
        let raw = match source {
            AssetSource::Immich => self.immich_boundary_policy.as_deref(),
            AssetSource::Photoprism => self.photoprism_boundary_policy.as_deref(),
        };
        match non_blank(raw) {
            Some(name) => name
                .parse()
                .map_err(|policy| SettingsError::InvalidPolicy {
                    provider: source,
                    policy,
                }),
            None => Ok(default_boundary_policy(source)),
        }
    }

    /// Whether both the URL and key for `source` are set.
    #[must_use]
    pub fn is_configured(&self, source: AssetSource) -> bool {
        let (url, key) = self.raw_endpoint(source);
        non_blank(url).is_some() && non_blank(key).is_some()
    }

    /// Return the endpoint for `source`, or `None` when it is incomplete.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidUrl`] when the URL does not parse.
    pub fn endpoint(&self, source: AssetSource) -> Result<Option<ProviderEndpoint>, SettingsError> {
        let (url, key) = self.raw_endpoint(source);
        let (Some(url), Some(key)) = (non_blank(url), non_blank(key)) else {
            return Ok(None);
        };
        let base_url = Url::parse(url).map_err(|error| SettingsError::InvalidUrl {
            provider: source,
            value: url.to_owned(),
            reason: error.to_string(),
        })?;
        Ok(Some(ProviderEndpoint {
            base_url,
            api_key: key.to_owned(),
        }))
    }

    fn raw_endpoint(&self, source: AssetSource) -> (Option<&str>, Option<&str>) {
        match source {
            AssetSource::Immich => (self.immich_url.as_deref(), self.immich_api_key.as_deref()),
            AssetSource::Photoprism => (
                self.photoprism_url.as_deref(),
                self.photoprism_api_key.as_deref(),
            ),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|raw| !raw.is_empty())
}
