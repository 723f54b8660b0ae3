//! Driven port for fetching raw photo records from one provider.
//!
//! The domain owns the request shape (user plus an already-normalised date
//! range) so the search pipeline stays adapter-agnostic.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{AssetSource, DateRange, RawAsset, UserId};

define_port_error! {
    /// Errors surfaced while fetching from a provider.
    pub enum PhotoProviderError {
        /// Transport, authentication, or upstream status failure.
        Unavailable { message: String } =>
            "photo provider unavailable: {message}",
        /// The payload could not be decoded into records.
        MalformedResponse { message: String } =>
            "photo provider returned a malformed response: {message}",
    }
}

/// Port for fetching one provider's records within a date range.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoProvider: Send + Sync {
    /// Source tag applied to every record this provider returns.
    fn source(&self) -> AssetSource;

    /// Fetch records for `user` whose capture date falls in `range`, in the
    /// order the provider returns them.
    ///
    /// `range` is the query range produced by range normalisation, not the
    /// range the caller asked for.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use photo_search::domain::ports::{FixturePhotoProvider, PhotoProvider};
    /// use photo_search::domain::{AssetSource, DateRange, UserId};
    ///
    /// let provider = FixturePhotoProvider::empty(AssetSource::Immich);
    /// let range = DateRange::parse("2024-01-01", None)?;
    /// let records = provider.fetch(&UserId::random(), &range).await?;
    /// assert!(records.is_empty());
    /// ```
    async fn fetch(
        &self,
        user: &UserId,
        range: &DateRange,
    ) -> Result<Vec<RawAsset>, PhotoProviderError>;
}

/// Fixture provider returning a fixed set of records regardless of input.
#[derive(Debug, Clone, PartialEq)]
pub struct FixturePhotoProvider {
    source: AssetSource,
    records: Vec<RawAsset>,
}

impl FixturePhotoProvider {
    /// Provider that always returns `records`.
    #[must_use]
    pub const fn new(source: AssetSource, records: Vec<RawAsset>) -> Self {
        Self { source, records }
    }

    /// Provider that always returns no records.
    #[must_use]
    pub const fn empty(source: AssetSource) -> Self {
        Self::new(source, Vec::new())
    }
}

#[async_trait]
impl PhotoProvider for FixturePhotoProvider {
    fn source(&self) -> AssetSource {
        self.source
    }

    async fn fetch(
        &self,
        _user: &UserId,
        _range: &DateRange,
    ) -> Result<Vec<RawAsset>, PhotoProviderError> {
        Ok(self.records.clone())
    }
}
