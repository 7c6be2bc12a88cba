//! The settings item.
//!
//! Using it while looking at a marker opens that claim's settings for the
//! owner. Anything else shows a preview of the footprint a claim would
//! cover.

use std::sync::Arc;

use terraclaim_domain::{BlockPos, BlockType, DimensionId, ItemType, ProtectionSettings, Region};

use crate::messages;
use crate::stores::{ConnectedActor, TerritoryState};
use crate::use_cases::settings::{MemberEntry, RegionSnapshot, SettingsRequest};
use crate::use_cases::{visuals, Notices};

/// Actor positions are feet positions; the host casts the ray from eye height.
const EYE_HEIGHT: f64 = 1.62;

#[derive(Debug, Clone, PartialEq)]
pub struct InspectTarget {
    pub block: BlockType,
    pub pos: BlockPos,
    pub dimension: DimensionId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InspectInput {
    pub actor: ConnectedActor,
    pub item: ItemType,
    /// Block the host's ray cast hit, if any
    pub target: Option<InspectTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectOutcome {
    /// Not the settings item.
    Ignored,
    OpenSettings(SettingsRequest),
    NotOwner,
    /// A marker-type block without a claim.
    MarkerPreview,
    AreaPreview,
}

pub struct InspectClaim {
    settings: Arc<ProtectionSettings>,
    notices: Notices,
}

impl InspectClaim {
    pub fn new(settings: Arc<ProtectionSettings>, notices: Notices) -> Self {
        Self { settings, notices }
    }

    pub fn execute(&self, state: &TerritoryState, input: InspectInput) -> InspectOutcome {
        if input.item != self.settings.settings_item {
            return InspectOutcome::Ignored;
        }

        let marker_target = input.target.filter(|target| {
            self.settings.is_marker_block(&target.block) && self.within_reach(&input.actor, target.pos)
        });
        match marker_target {
            Some(target) => self.inspect_marker(state, &input.actor, &target),
            None => self.preview_here(state, &input.actor),
        }
    }

    fn within_reach(&self, actor: &ConnectedActor, pos: BlockPos) -> bool {
        let eye = actor.position;
        let dx = f64::from(pos.x) + 0.5 - eye.x;
        let dy = f64::from(pos.y) + 0.5 - (eye.y + EYE_HEIGHT);
        let dz = f64::from(pos.z) + 0.5 - eye.z;
        // The ray may hit any face of the block, not only its centre.
        (dx * dx + dy * dy + dz * dz).sqrt() <= self.settings.inspect_ray_distance + 1.0
    }

    fn inspect_marker(
        &self,
        state: &TerritoryState,
        actor: &ConnectedActor,
        target: &InspectTarget,
    ) -> InspectOutcome {
        let point = target.pos.to_world();
        let region = state
            .markers
            .find_at(&target.dimension, point)
            .and_then(|marker| marker.region_id.as_ref())
            .and_then(|id| state.regions.get(id))
            .or_else(|| state.regions.find_by_anchor(&target.dimension, point));

        match region {
            Some(region) if region.is_owner(&actor.id) => {
                tracing::debug!(actor_id = %actor.id, region_id = %region.id, "Opening settings");
                InspectOutcome::OpenSettings(SettingsRequest {
                    actor: actor.id.clone(),
                    region_id: region.id.clone(),
                    snapshot: snapshot(state, region),
                })
            }
            Some(region) => {
                self.notices.send_all(
                    &actor.id,
                    &messages::not_region_owner(&region.owner_name, region.is_member(&actor.id)),
                );
                InspectOutcome::NotOwner
            }
            None => {
                self.notices.send(
                    &actor.id,
                    &messages::marker_preview(self.settings.footprint_size()),
                );
                self.notices.visuals(
                    &target.dimension,
                    &visuals::preview_ring(target.pos, self.settings.visual_height_offset),
                );
                InspectOutcome::MarkerPreview
            }
        }
    }

    fn preview_here(&self, state: &TerritoryState, actor: &ConnectedActor) -> InspectOutcome {
        let below = actor.position.floor().below();
        self.notices.visuals(
            &actor.dimension,
            &visuals::preview_ring(below, self.settings.visual_height_offset),
        );
        self.notices.send(
            &actor.id,
            &messages::area_preview(self.settings.footprint_size()),
        );
        if let Some(stats) = state.owner_stats.get(&actor.id) {
            self.notices
                .send(&actor.id, &messages::claim_stats(stats.total_regions));
        }
        InspectOutcome::AreaPreview
    }
}

fn snapshot(state: &TerritoryState, region: &Region) -> RegionSnapshot {
    RegionSnapshot {
        owner_name: region.owner_name.clone(),
        show_visuals: region.show_visuals,
        pvp_allowed: region.pvp_allowed,
        explosions_allowed: region.explosions_allowed,
        members: region
            .members
            .iter()
            .map(|id| MemberEntry {
                id: id.clone(),
                name: state.roster.get(id).map(|actor| actor.name.clone()),
            })
            .collect(),
    }
}
