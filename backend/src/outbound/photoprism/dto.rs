//! Query parameters and response decoding for `GET /api/v1/photos`.

use serde::Serialize;
use serde_json::Value;

use crate::domain::ports::PhotoProviderError;
use crate::domain::{DateRange, RawAsset};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct PhotoListQuery {
    pub(super) count: u32,
    pub(super) offset: u32,
    pub(super) after: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) before: Option<String>,
    pub(super) merged: bool,
}

impl PhotoListQuery {
    pub(super) fn for_range(range: &DateRange, count: u32) -> Self {
        Self {
            count,
            offset: 0,
            after: range.start().to_string(),
            before: range.end().map(|end| end.to_string()),
            merged: true,
        }
    }
}

/// Decode the photo list. Every element must be a JSON object.
pub(super) fn decode_photo_list(body: &[u8]) -> Result<Vec<RawAsset>, PhotoProviderError> {
    let decoded: Vec<Value> = serde_json::from_slice(body).map_err(|error| {
        PhotoProviderError::malformed_response(format!("invalid Photoprism photo list: {error}"))
    })?;

    decoded
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Object(fields) => Ok(RawAsset::new(fields)),
            other => Err(PhotoProviderError::malformed_response(format!(
                "photo list element {index} is not an object: {other}"
            ))),
        })
        .collect()
}
