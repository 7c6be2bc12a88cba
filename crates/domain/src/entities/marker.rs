//! Marker entity - the physical token anchoring a region

use serde::{Deserialize, Serialize};

use crate::ids::{ActorId, DimensionId, MarkerId, RegionId};
use crate::value_objects::BlockPos;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: MarkerId,
    pub location: BlockPos,
    pub dimension: DimensionId,
    pub owner_id: ActorId,
    pub owner_name: String,
    /// Region this marker anchors. `None` for an orphan marker.
    pub region_id: Option<RegionId>,
    pub active: bool,
    pub placed_at: u64,
}

impl Marker {
    pub fn new(
        id: MarkerId,
        location: BlockPos,
        dimension: DimensionId,
        owner_id: ActorId,
        owner_name: impl Into<String>,
        placed_at: u64,
    ) -> Self {
        Self {
            id,
            location,
            dimension,
            owner_id,
            owner_name: owner_name.into(),
            region_id: None,
            active: true,
            placed_at,
        }
    }

    pub fn linked_to(mut self, region_id: RegionId) -> Self {
        self.region_id = Some(region_id);
        self
    }

    pub fn is_at(&self, dimension: &DimensionId, pos: BlockPos) -> bool {
        self.dimension == *dimension && self.location == pos
    }

    pub fn is_orphan(&self) -> bool {
        self.region_id.is_none()
    }

    /// Drop the region link after its region disappeared.
    pub fn orphan(&mut self) {
        self.region_id = None;
        self.active = false;
    }
}
