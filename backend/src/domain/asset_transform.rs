//! Per-record filtering and source tagging.
//!
//! Each fetched record ends up in exactly one [`RecordOutcome`]. Dropping a
//! record on purpose and failing to evaluate it are kept distinct so the
//! pipeline can count malformed records instead of silently losing them.

use serde_json::Value;

use super::{Asset, AssetSource, PostFilter, RawAsset, parse_local_date};

const VIDEO_TYPE: &str = "video";

/// Why a record was deliberately excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The record's media type is `video`.
    Video,
    /// The record's local date falls outside the requested range.
    OutOfRange,
}

/// Result of evaluating one raw record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// The record survives and is tagged with its source.
    Kept(Asset),
    /// The record was excluded by a filter.
    Dropped(DropReason),
    /// The record could not be evaluated and is excluded.
    Malformed {
        /// Human-readable cause, suitable for debug logs.
        reason: String,
    },
}

impl RecordOutcome {
    /// Return the kept asset, if any.
    #[must_use]
    pub fn into_asset(self) -> Option<Asset> {
        match self {
            Self::Kept(asset) => Some(asset),
            Self::Dropped(_) | Self::Malformed { .. } => None,
        }
    }
}

/// Drop video records and tag the rest with `source`.
///
/// A missing or non-string media type is treated as "not a video" and the
/// record is kept. This function never yields [`RecordOutcome::Malformed`].
///
/// # Examples
/// ```
/// use photo_search::domain::{transform_asset, AssetSource, DropReason, RawAsset, RecordOutcome};
/// use serde_json::json;
///
/// let video: RawAsset = serde_json::from_value(json!({ "Type": "Video" })).expect("object");
/// assert_eq!(
///     transform_asset(video, AssetSource::Photoprism),
///     RecordOutcome::Dropped(DropReason::Video),
/// );
/// ```
#[must_use]
pub fn transform_asset(raw: RawAsset, source: AssetSource) -> RecordOutcome {
    if is_video(raw.media_type()) {
        return RecordOutcome::Dropped(DropReason::Video);
    }
    RecordOutcome::Kept(Asset::tagged(raw, source))
}

/// Apply the post-filter on the record's local date, then [`transform_asset`].
///
/// When the filter is inactive the timestamp is never read, so records from
/// providers with inclusive semantics cannot be malformed on that account.
#[must_use]
pub fn classify_record(raw: RawAsset, source: AssetSource, filter: &PostFilter) -> RecordOutcome {
    if filter.is_active() {
        let Some(timestamp) = raw.local_timestamp(source) else {
            return RecordOutcome::Malformed {
                reason: format!("missing {}", source.local_timestamp_key()),
            };
        };
        let Some(date) = parse_local_date(timestamp) else {
            return RecordOutcome::Malformed {
                reason: format!(
                    "unparseable {} {timestamp:?}",
                    source.local_timestamp_key()
                ),
            };
        };
        if !filter.admits(date) {
            return RecordOutcome::Dropped(DropReason::OutOfRange);
        }
    }
    transform_asset(raw, source)
}

fn is_video(media_type: Option<&Value>) -> bool {
    media_type
        .and_then(Value::as_str)
        .is_some_and(|kind| kind.trim().eq_ignore_ascii_case(VIDEO_TYPE))
}
