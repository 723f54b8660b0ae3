//! Transport helpers shared by the reqwest-backed provider adapters.

use reqwest::{StatusCode, Url};

use crate::domain::ports::PhotoProviderError;

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Resolve `path` beneath `base`, keeping any path prefix `base` already has.
///
/// `Url::join` drops the last segment of a base without a trailing slash;
/// providers are often mounted under a sub-path, so the slash is added first.
pub(super) fn endpoint(base: &Url, path: &str) -> Result<Url, PhotoProviderError> {
    let mut root = base.clone();
    if !root.path().ends_with('/') {
        let with_slash = format!("{}/", root.path());
        root.set_path(&with_slash);
    }
    root.join(path.trim_start_matches('/')).map_err(|error| {
        PhotoProviderError::unavailable(format!("invalid provider endpoint {path:?}: {error}"))
    })
}

pub(super) fn map_transport_error(error: &reqwest::Error) -> PhotoProviderError {
    if error.is_timeout() {
        PhotoProviderError::unavailable(format!("request timed out: {error}"))
    } else if error.is_decode() {
        PhotoProviderError::malformed_response(error.to_string())
    } else {
        PhotoProviderError::unavailable(error.to_string())
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> PhotoProviderError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            PhotoProviderError::unavailable(format!("authentication rejected ({message})"))
        }
        _ => PhotoProviderError::unavailable(message),
    }
}

pub(super) fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
