//! DTOs for Immich's metadata search request and response.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{DateRange, RawAsset};

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(super) struct MetadataSearchBody {
    pub(super) taken_after: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) taken_before: Option<String>,
    pub(super) size: u32,
    pub(super) with_exif: bool,
}

impl MetadataSearchBody {
    pub(super) fn for_range(range: &DateRange, size: u32) -> Self {
        Self {
            taken_after: start_of_day(range.start()),
            taken_before: range.end().map(end_of_day),
            size,
            with_exif: true,
        }
    }
}

fn start_of_day(date: NaiveDate) -> String {
    format!("{date}T00:00:00.000Z")
}

fn end_of_day(date: NaiveDate) -> String {
    format!("{date}T23:59:59.999Z")
}

#[derive(Debug, Deserialize)]
pub(super) struct MetadataSearchResponseDto {
    pub(super) assets: AssetPageDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct AssetPageDto {
    #[serde(default)]
    pub(super) items: Vec<Map<String, Value>>,
}

impl MetadataSearchResponseDto {
    pub(super) fn into_raw_assets(self) -> Vec<RawAsset> {
        self.assets.items.into_iter().map(RawAsset::new).collect()
    }
}
