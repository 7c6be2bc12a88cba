//! Per-owner claim statistics. Informational only; access decisions never
//! read them.

use serde::{Deserialize, Serialize};

use crate::ids::{MarkerId, RegionId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerStats {
    pub total_regions: u32,
    pub last_activity: u64,
    pub regions_created: Vec<RegionId>,
    pub markers_placed: Vec<MarkerId>,
}

impl OwnerStats {
    pub fn record_claim(&mut self, region_id: RegionId, marker_id: MarkerId, tick: u64) {
        self.total_regions += 1;
        self.last_activity = tick;
        self.regions_created.push(region_id);
        self.markers_placed.push(marker_id);
    }

    /// Forget a claim that was removed (owner break or expiry).
    pub fn record_removal(&mut self, region_id: &RegionId, marker_id: Option<&MarkerId>, tick: u64) {
        self.total_regions = self.total_regions.saturating_sub(1);
        self.last_activity = tick;
        self.regions_created.retain(|id| id != region_id);
        if let Some(marker_id) = marker_id {
            self.markers_placed.retain(|id| id != marker_id);
        }
    }
}
