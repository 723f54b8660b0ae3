//! Stable JSON rendering for tagged assets.
//!
//! Immich and Photoprism name the same facts differently; this adapter maps
//! both onto one shape and keeps the untouched record under `raw`.

use serde_json::{Map, Value, json};

use crate::domain::ports::AssetSerializer;
use crate::domain::{Asset, AssetSource};

struct FieldKeys {
    id: &'static str,
    media_type: &'static str,
    original_file_name: &'static str,
}

const fn field_keys(source: AssetSource) -> FieldKeys {
    match source {
        AssetSource::Immich => FieldKeys {
            id: "id",
            media_type: "type",
            original_file_name: "originalFileName",
        },
        AssetSource::Photoprism => FieldKeys {
            id: "UID",
            media_type: "Type",
            original_file_name: "FileName",
        },
    }
}

/// Serializer producing `{id, source, type, localDateTime, originalFileName, raw}`.
///
/// Fields absent from the provider record render as `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAssetSerializer;

impl AssetSerializer for JsonAssetSerializer {
    fn serialize(&self, asset: &Asset, source: AssetSource) -> Value {
        let keys = field_keys(source);
        let lookup = |key: &str| asset.get(key).cloned().unwrap_or(Value::Null);
        json!({
            "id": lookup(keys.id),
            "source": source,
            "type": lookup(keys.media_type),
            "localDateTime": lookup(source.local_timestamp_key()),
            "originalFileName": lookup(keys.original_file_name),
            "raw": Value::Object(Map::clone(asset.fields())),
        })
    }
}
