//! Domain primitives and the photo search pipeline.
//!
//! Purpose: validate search input once at the boundary, reconcile each
//! provider's date semantics with the caller's inclusive range, and merge
//! provider records into one filtered, source-tagged sequence. Values here are
//! immutable and live for a single request.
//!
//! Public surface:
//! - `DateRange`, `SearchQuery`, `PhotoSearchRequest`: validated input.
//! - `normalize_range`, `BoundaryPolicy`: per-provider range adjustment.
//! - `transform_asset`, `classify_record`: per-record filtering and tagging.
//! - `PhotoSearchService`: orchestration across registered providers.

pub mod ports;

mod asset;
mod asset_transform;
mod date_range;
mod photo_search;
mod range_normalizer;
mod search_query;
mod user;

pub use self::asset::{Asset, AssetSource, RawAsset, TYPE_KEYS, UnknownAssetSource};
pub use self::asset_transform::{DropReason, RecordOutcome, classify_record, transform_asset};
pub use self::date_range::{DateRange, DateRangeError, parse_local_date};
pub use self::photo_search::{
    DEFAULT_FETCH_TIMEOUT, PhotoSearchConfig, PhotoSearchOutcome, PhotoSearchService,
    ProviderRegistration, ProviderWarning, ProviderWarningKind, default_boundary_policy,
};
pub use self::range_normalizer::{
    BoundaryPolicy, NormalizedRange, PostFilter, UnknownBoundaryPolicy, normalize_range,
};
pub use self::search_query::{DEFAULT_START_DATE, InvalidQuery, PhotoSearchRequest, SearchQuery};
pub use self::user::{UserId, UserIdValidationError};
