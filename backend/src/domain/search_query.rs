//! Validated search input.

use serde::Deserialize;
use thiserror::Error;

use super::{DateRange, DateRangeError, UserId};

/// Start date used when the caller does not supply one.
pub const DEFAULT_START_DATE: &str = "1970-01-01";

/// Raw search input as received at the boundary.
///
/// Blank date strings are treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoSearchRequest {
    /// User whose integrations are searched.
    pub user: UserId,
    /// First day to include, `YYYY-MM-DD`; defaults to [`DEFAULT_START_DATE`].
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day to include, `YYYY-MM-DD`; open-ended when absent.
    #[serde(default)]
    pub end_date: Option<String>,
}

impl PhotoSearchRequest {
    /// Build a request from borrowed date strings.
    #[must_use]
    pub fn new(user: UserId, start_date: Option<&str>, end_date: Option<&str>) -> Self {
        Self {
            user,
            start_date: start_date.map(str::to_owned),
            end_date: end_date.map(str::to_owned),
        }
    }
}

/// Error returned when a search request cannot be turned into a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidQuery {
    /// The date range was unparseable or inverted.
    #[error("invalid search query: {0}")]
    DateRange(#[from] DateRangeError),
}

/// A validated search: who, and which days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    user: UserId,
    range: DateRange,
}

impl SearchQuery {
    /// Build a query from an already validated range.
    #[must_use]
    pub const fn new(user: UserId, range: DateRange) -> Self {
        Self { user, range }
    }

    /// User whose integrations are searched.
    #[must_use]
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Requested inclusive range.
    #[must_use]
    pub const fn range(&self) -> &DateRange {
        &self.range
    }
}

impl TryFrom<PhotoSearchRequest> for SearchQuery {
    type Error = InvalidQuery;

    fn try_from(request: PhotoSearchRequest) -> Result<Self, Self::Error> {
        let start = non_blank(request.start_date.as_deref()).unwrap_or(DEFAULT_START_DATE);
        let end = non_blank(request.end_date.as_deref());
        let range = DateRange::parse(start, end)?;
        Ok(Self::new(request.user, range))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}
