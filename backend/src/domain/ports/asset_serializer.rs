//! Driven port turning a tagged asset into its outbound representation.

use serde_json::Value;

use crate::domain::{Asset, AssetSource};

/// Port for rendering assets at the output boundary.
#[cfg_attr(test, mockall::automock)]
pub trait AssetSerializer: Send + Sync {
    /// Render one asset produced by `source`.
    fn serialize(&self, asset: &Asset, source: AssetSource) -> Value;
}
