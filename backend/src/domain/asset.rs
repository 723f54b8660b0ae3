//! Provider records and their normalised, source-tagged form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Key spellings providers use for the media type field, in lookup order.
pub const TYPE_KEYS: [&str; 2] = ["type", "Type"];

/// Photo-management backend an asset was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetSource {
    /// Immich-style service.
    Immich,
    /// Photoprism-style service.
    Photoprism,
}

impl AssetSource {
    /// Stable lowercase identifier used on the wire and in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Immich => "immich",
            Self::Photoprism => "photoprism",
        }
    }

    /// Key under which this provider reports the local capture timestamp.
    #[must_use]
    pub const fn local_timestamp_key(self) -> &'static str {
        match self {
            Self::Immich => "localDateTime",
            Self::Photoprism => "TakenAtLocal",
        }
    }
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`AssetSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown asset source: {0}")]
pub struct UnknownAssetSource(pub String);

impl FromStr for AssetSource {
    type Err = UnknownAssetSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "immich" => Ok(Self::Immich),
            "photoprism" => Ok(Self::Photoprism),
            _ => Err(UnknownAssetSource(s.to_owned())),
        }
    }
}

/// Provider-specific record as decoded from a provider response.
///
/// The field set is owned by the provider; this type only knows how to find
/// the media type and local timestamp.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAsset(Map<String, Value>);

impl RawAsset {
    /// Wrap a decoded JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Borrow the provider fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Look up a single field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Raw media type value under the first key spelling that is present.
    #[must_use]
    pub fn media_type(&self) -> Option<&Value> {
        TYPE_KEYS.iter().find_map(|key| self.0.get(*key))
    }

    /// Local capture timestamp string for the given provider, if present.
    #[must_use]
    pub fn local_timestamp(&self, source: AssetSource) -> Option<&str> {
        self.0
            .get(source.local_timestamp_key())
            .and_then(Value::as_str)
    }

    /// Consume the wrapper, yielding the provider fields.
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawAsset {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// A non-video record tagged with the provider that produced it.
///
/// ## Invariants
/// - The media type, if present as a string, is never `video`
///   (case-insensitive). [`crate::domain::transform_asset`] is the only
///   constructor outside this module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    #[serde(flatten)]
    fields: Map<String, Value>,
    source: AssetSource,
}

impl Asset {
    /// A provider field literally named `source` is replaced by the tag.
    pub(crate) fn tagged(raw: RawAsset, source: AssetSource) -> Self {
        let mut fields = raw.into_fields();
        fields.remove("source");
        Self { fields, source }
    }

    /// Provider that produced this asset.
    #[must_use]
    pub const fn source(&self) -> AssetSource {
        self.source
    }

    /// Provider fields carried over from the raw record.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Look up a single provider field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Media type under either known key spelling.
    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        TYPE_KEYS
            .iter()
            .find_map(|key| self.fields.get(*key))
            .and_then(Value::as_str)
    }

    /// Local capture timestamp string as reported by the provider.
    #[must_use]
    pub fn local_timestamp(&self) -> Option<&str> {
        self.fields
            .get(self.source.local_timestamp_key())
            .and_then(Value::as_str)
    }
}
