//! Reqwest-backed Immich provider.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding into raw asset records. Range
//! widening and post-filtering happen in the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::dto::{MetadataSearchBody, MetadataSearchResponseDto};
use crate::domain::ports::{PhotoProvider, PhotoProviderError};
use crate::domain::{AssetSource, DateRange, RawAsset, UserId};
use crate::outbound::http_support::{endpoint, map_status_error, map_transport_error};

const SEARCH_PATH: &str = "api/search/metadata";
const API_KEY_HEADER: &str = "x-api-key";

/// Default number of records requested in one call.
pub const DEFAULT_IMMICH_PAGE_SIZE: u32 = 1000;

/// Immich provider calling `POST /api/search/metadata` on one server.
pub struct ImmichHttpProvider {
    client: Client,
    base_url: Url,
    api_key: String,
    page_size: u32,
}

impl ImmichHttpProvider {
    /// Build a provider with an explicit request timeout.
    /// ```rust,ignore
    /// let provider = ImmichHttpProvider::new(base_url, "api-key", Duration::from_secs(10))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            page_size: DEFAULT_IMMICH_PAGE_SIZE,
        })
    }

    /// Override how many records are requested per call.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

#[async_trait]
impl PhotoProvider for ImmichHttpProvider {
    fn source(&self) -> AssetSource {
        AssetSource::Immich
    }

    async fn fetch(
        &self,
        user: &UserId,
        range: &DateRange,
    ) -> Result<Vec<RawAsset>, PhotoProviderError> {
        let url = endpoint(&self.base_url, SEARCH_PATH)?;
        let body = MetadataSearchBody::for_range(range, self.page_size);
        debug!(user_id = %user, %url, %range, "requesting immich assets");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|error| map_transport_error(&error))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(&error))?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }

        parse_assets(bytes.as_ref())
    }
}

fn parse_assets(body: &[u8]) -> Result<Vec<RawAsset>, PhotoProviderError> {
    let decoded: MetadataSearchResponseDto = serde_json::from_slice(body).map_err(|error| {
        PhotoProviderError::malformed_response(format!("invalid Immich search payload: {error}"))
    })?;
    Ok(decoded.into_raw_assets())
}
