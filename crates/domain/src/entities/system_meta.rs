use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema version written by this release.
pub const SCHEMA_VERSION: &str = "3.0.0";

/// Advisory bookkeeping persisted next to the claim documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMeta {
    pub version: String,
    pub last_saved: u64,
    pub region_count: u64,
    pub marker_count: u64,
    /// Next value of the region id counter
    pub next_region_id: u64,
    pub saved_at: Option<DateTime<Utc>>,
}

impl Default for SystemMeta {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            last_saved: 0,
            region_count: 0,
            marker_count: 0,
            next_region_id: 1,
            saved_at: None,
        }
    }
}

impl SystemMeta {
    pub fn is_current(&self) -> bool {
        self.version == SCHEMA_VERSION
    }
}
