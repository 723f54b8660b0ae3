//! Provider-level problems reported next to partial search results.

use std::fmt;

use serde::Serialize;

use crate::domain::AssetSource;
use crate::domain::ports::PhotoProviderError;

/// Category of a [`ProviderWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderWarningKind {
    /// The integration settings lookup failed, so the provider was skipped.
    IntegrationLookupFailed,
    /// Transport, authentication, or upstream status failure.
    Unavailable,
    /// The provider payload could not be decoded.
    MalformedResponse,
    /// The fetch did not complete within the configured timeout.
    TimedOut,
    /// Some records lacked a usable local date and were excluded.
    MalformedRecords {
        /// Number of excluded records.
        count: usize,
    },
}

/// A provider-level problem that did not abort the search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderWarning {
    /// Provider the warning concerns.
    pub source: AssetSource,
    /// Warning category.
    #[serde(flatten)]
    pub kind: ProviderWarningKind,
    /// Human-readable detail.
    pub message: String,
}

impl ProviderWarning {
    /// Build a warning.
    #[must_use]
    pub fn new(source: AssetSource, kind: ProviderWarningKind, message: impl Into<String>) -> Self {
        Self {
            source,
            kind,
            message: message.into(),
        }
    }

    pub(super) fn from_provider_error(source: AssetSource, error: &PhotoProviderError) -> Self {
        Self::new(source, error.into(), error.to_string())
    }
}

impl fmt::Display for ProviderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(
        PhotoProviderError::unavailable("connection refused"),
        ProviderWarningKind::Unavailable
    )]
    #[case(
        PhotoProviderError::malformed_response("expected array"),
        ProviderWarningKind::MalformedResponse
    )]
    fn maps_provider_errors(
        #[case] error: PhotoProviderError,
        #[case] expected: ProviderWarningKind,
    ) {
        let warning = ProviderWarning::from_provider_error(AssetSource::Immich, &error);
        assert_eq!(warning.kind, expected);
        assert_eq!(warning.message, error.to_string());
    }

    #[rstest]
    fn serialises_kind_inline() {
        let warning = ProviderWarning::new(
            AssetSource::Photoprism,
            ProviderWarningKind::MalformedRecords { count: 2 },
            "2 record(s) had no usable local date",
        );
        assert_eq!(
            serde_json::to_value(&warning).expect("serialise"),
            json!({
                "source": "photoprism",
                "kind": "malformed_records",
                "count": 2,
                "message": "2 record(s) had no usable local date",
            })
        );
        assert_eq!(
            warning.to_string(),
            "photoprism: 2 record(s) had no usable local date"
        );
    }
}
