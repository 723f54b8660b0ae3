//! Reqwest-backed Photoprism provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::dto::{PhotoListQuery, decode_photo_list};
use crate::domain::ports::{PhotoProvider, PhotoProviderError};
use crate::domain::{AssetSource, DateRange, RawAsset, UserId};
use crate::outbound::http_support::{endpoint, map_status_error, map_transport_error};

const PHOTOS_PATH: &str = "api/v1/photos";
const AUTH_HEADER: &str = "X-Auth-Token";

/// Default number of records requested in one call.
pub const DEFAULT_PHOTOPRISM_PAGE_SIZE: u32 = 1000;

/// Photoprism provider calling `GET /api/v1/photos` on one server.
///
/// Photoprism treats `after` and `before` as inclusive whole days, so the
/// range is passed through as plain `YYYY-MM-DD` strings.
pub struct PhotoprismHttpProvider {
    client: Client,
    base_url: Url,
    api_key: String,
    page_size: u32,
}

impl PhotoprismHttpProvider {
    /// Build a provider with an explicit request timeout.
    ///
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
            page_size: DEFAULT_PHOTOPRISM_PAGE_SIZE,
        })
    }

    /// Override the `count` query parameter.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

#[async_trait]
impl PhotoProvider for PhotoprismHttpProvider {
    fn source(&self) -> AssetSource {
        AssetSource::Photoprism
    }

    async fn fetch(
        &self,
        user: &UserId,
        range: &DateRange,
    ) -> Result<Vec<RawAsset>, PhotoProviderError> {
        let url = endpoint(&self.base_url, PHOTOS_PATH)?;
        let query = PhotoListQuery::for_range(range, self.page_size);
        debug!(user_id = %user, %url, %range, "requesting photoprism photos");

        let response = self
            .client
            .get(url)
            .header(AUTH_HEADER, self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query)
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

        decode_photo_list(bytes.as_ref())
    }
}
