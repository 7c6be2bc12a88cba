//! Block breaking: claim removal through the marker, rollback otherwise.

use std::sync::Arc;

use terraclaim_domain::{
    access, BlockPos, BlockType, DimensionId, MarkerBreakDecision, MarkerId, ProtectionSettings,
    RegionId, Verdict,
};

use crate::messages;
use crate::stores::{Compensation, ConnectedActor, TerritoryState};
use crate::use_cases::Notices;

#[derive(Debug, Clone, PartialEq)]
pub struct BreakInput {
    pub actor: ConnectedActor,
    /// Block type that was at `pos` before the break
    pub broken: BlockType,
    pub pos: BlockPos,
    pub dimension: DimensionId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakOutcome {
    Allowed,
    ClaimRemoved {
        region_id: RegionId,
        marker_id: MarkerId,
    },
    OrphanMarkerRemoved(MarkerId),
    OrphanRegionRemoved(RegionId),
    /// Restore scheduled for the next tick.
    Denied,
}

pub struct BreakBlock {
    settings: Arc<ProtectionSettings>,
    notices: Notices,
}

impl BreakBlock {
    pub fn new(settings: Arc<ProtectionSettings>, notices: Notices) -> Self {
        Self { settings, notices }
    }

    pub fn execute(&self, state: &mut TerritoryState, input: BreakInput) -> BreakOutcome {
        if self.settings.is_marker_block(&input.broken) {
            if let Some(outcome) = self.break_marker(state, &input) {
                return outcome;
            }
        }
        self.break_ordinary(state, input)
    }

    /// `None` when the block was never a marker or claim anchor.
    fn break_marker(&self, state: &mut TerritoryState, input: &BreakInput) -> Option<BreakOutcome> {
        let point = input.pos.to_world();
        let marker = state.markers.find_at(&input.dimension, point).cloned();
        let marker_region = marker
            .as_ref()
            .and_then(|marker| marker.region_id.as_ref())
            .and_then(|id| state.regions.get(id));
        let anchored = state.regions.find_by_anchor(&input.dimension, point);

        let decision =
            access::decide_marker_break(&input.actor.id, marker.as_ref(), marker_region, anchored);
        let anchored_id = anchored.map(|region| region.id.clone());
        let tick = state.current_tick;

        match (decision, marker) {
            (MarkerBreakDecision::RemoveClaim, Some(marker)) => {
                let region_id = marker.region_id.clone()?;
                state.markers.unbind(&marker.id);
                state.regions.remove(&region_id);
                state.owner_stats.record_removal(
                    &marker.owner_id,
                    &region_id,
                    Some(&marker.id),
                    tick,
                );
                tracing::info!(
                    region_id = %region_id,
                    marker_id = %marker.id,
                    actor_id = %input.actor.id,
                    "Claim removed by its owner"
                );
                self.notices
                    .send_all(&input.actor.id, &messages::claim_removed());
                Some(BreakOutcome::ClaimRemoved {
                    region_id,
                    marker_id: marker.id,
                })
            }
            (MarkerBreakDecision::RemoveOrphanMarker, Some(marker)) => {
                state.markers.unbind(&marker.id);
                tracing::info!(
                    marker_id = %marker.id,
                    actor_id = %input.actor.id,
                    "Orphan marker removed"
                );
                self.notices
                    .send(&input.actor.id, &messages::orphan_marker_removed());
                Some(BreakOutcome::OrphanMarkerRemoved(marker.id))
            }
            (MarkerBreakDecision::RemoveOrphanRegion, _) => {
                let region = state.regions.remove(&anchored_id?)?;
                state
                    .owner_stats
                    .record_removal(&region.owner_id, &region.id, None, tick);
                tracing::info!(
                    region_id = %region.id,
                    actor_id = %input.actor.id,
                    "Orphan region removed"
                );
                self.notices
                    .send(&input.actor.id, &messages::orphan_region_removed());
                Some(BreakOutcome::OrphanRegionRemoved(region.id))
            }
            (MarkerBreakDecision::Restore { owner_name }, marker) => {
                self.notices
                    .send(&input.actor.id, &messages::marker_break_denied(&owner_name));
                let region_id = marker
                    .as_ref()
                    .and_then(|marker| marker.region_id.clone())
                    .or(anchored_id);
                tracing::debug!(
                    actor_id = %input.actor.id,
                    pos = %input.pos,
                    "Marker break denied, restore scheduled"
                );
                let due = state.next_tick();
                state.deferred.schedule(
                    due,
                    Compensation::RestoreMarker {
                        actor: input.actor.id.clone(),
                        dimension: input.dimension.clone(),
                        pos: input.pos,
                        marker_id: marker.map(|marker| marker.id),
                        region_id,
                    },
                );
                Some(BreakOutcome::Denied)
            }
            _ => None,
        }
    }

    fn break_ordinary(&self, state: &mut TerritoryState, input: BreakInput) -> BreakOutcome {
        let region = state
            .regions
            .find_containing(&input.dimension, input.pos.to_world());
        let Verdict::Deny { owner_name } = access::check_build(&input.actor.id, region) else {
            return BreakOutcome::Allowed;
        };

        self.notices
            .send_all(&input.actor.id, &messages::break_denied(&owner_name));
        tracing::debug!(
            actor_id = %input.actor.id,
            block = %input.broken,
            pos = %input.pos,
            "Break denied, restore scheduled"
        );
        let due = state.next_tick();
        state.deferred.schedule(
            due,
            Compensation::RestoreBlock {
                actor: input.actor.id,
                dimension: input.dimension,
                pos: input.pos,
                broken: input.broken,
            },
        );
        BreakOutcome::Denied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{actor_at, RecordingPresentation};
    use terraclaim_domain::{ActorId, Marker, NewRegion, WorldPos};

    const MARKER: &str = "minecraft:diamond_block";

    fn setup() -> (BreakBlock, Arc<RecordingPresentation>, TerritoryState) {
        let presentation = Arc::new(RecordingPresentation::new());
        let use_case = BreakBlock::new(
            Arc::new(ProtectionSettings::default()),
            Notices::new(presentation.clone()),
        );
        (use_case, presentation, TerritoryState::new(1))
    }

    fn claim(state: &mut TerritoryState, owner: &str) -> (RegionId, MarkerId) {
        let marker_id = MarkerId::new("stone_test");
        let region_id = state.regions.create(
            NewRegion::new(
                BlockPos::new(0, 64, 0),
                DimensionId::overworld(),
                ActorId::from(owner),
                owner,
                0,
            )
            .with_marker(marker_id.clone()),
        );
        state.markers.bind(
            Marker::new(
                marker_id.clone(),
                BlockPos::new(0, 64, 0),
                DimensionId::overworld(),
                ActorId::from(owner),
                owner,
                0,
            )
            .linked_to(region_id.clone()),
        );
        state
            .owner_stats
            .record_claim(&ActorId::from(owner), region_id.clone(), marker_id.clone(), 0);
        (region_id, marker_id)
    }

    fn broken(actor: &str, block: &str, x: i32, z: i32) -> BreakInput {
        BreakInput {
            actor: actor_at(actor, WorldPos::new(f64::from(x), 64.0, f64::from(z))),
            broken: BlockType::from(block),
            pos: BlockPos::new(x, 64, z),
            dimension: DimensionId::overworld(),
        }
    }

    #[test]
    fn owner_breaking_marker_removes_claim_and_stats() {
        let (use_case, _presentation, mut state) = setup();
        let (region_id, marker_id) = claim(&mut state, "alice");

        let outcome = use_case.execute(&mut state, broken("alice", MARKER, 0, 0));

        assert_eq!(
            outcome,
            BreakOutcome::ClaimRemoved {
                region_id,
                marker_id
            }
        );
        assert!(state.regions.is_empty());
        assert!(state.markers.is_empty());
        let stats = state
            .owner_stats
            .get(&ActorId::from("alice"))
            .expect("stats kept");
        assert_eq!(stats.total_regions, 0);
        assert!(stats.regions_created.is_empty());
    }

    #[test]
    fn stranger_breaking_marker_schedules_restore() {
        let (use_case, presentation, mut state) = setup();
        let (region_id, marker_id) = claim(&mut state, "alice");

        let outcome = use_case.execute(&mut state, broken("bob", MARKER, 0, 0));

        assert_eq!(outcome, BreakOutcome::Denied);
        assert_eq!(state.regions.len(), 1);
        assert_eq!(
            state.deferred.drain_due(1),
            vec![Compensation::RestoreMarker {
                actor: ActorId::from("bob"),
                dimension: DimensionId::overworld(),
                pos: BlockPos::new(0, 64, 0),
                marker_id: Some(marker_id),
                region_id: Some(region_id),
            }]
        );
        assert_eq!(presentation.texts_for("bob").len(), 1);
    }

    #[test]
    fn owner_breaking_orphan_marker_removes_it_without_compensation() {
        let (use_case, _presentation, mut state) = setup();
        state.markers.bind(Marker::new(
            MarkerId::new("stone_orphan"),
            BlockPos::new(20, 64, 20),
            DimensionId::overworld(),
            ActorId::from("alice"),
            "alice",
            0,
        ));

        let outcome = use_case.execute(&mut state, broken("alice", MARKER, 20, 20));

        assert_eq!(
            outcome,
            BreakOutcome::OrphanMarkerRemoved(MarkerId::new("stone_orphan"))
        );
        assert!(state.markers.is_empty());
        assert!(state.deferred.is_empty());
    }

    #[test]
    fn owner_breaking_anchor_of_orphan_region_removes_region() {
        let (use_case, _presentation, mut state) = setup();
        let (region_id, marker_id) = claim(&mut state, "alice");
        state.markers.unbind(&marker_id);

        let outcome = use_case.execute(&mut state, broken("alice", MARKER, 0, 0));

        assert_eq!(outcome, BreakOutcome::OrphanRegionRemoved(region_id));
        assert!(state.regions.is_empty());
    }

    #[test]
    fn marker_type_block_that_is_not_a_marker_follows_build_rule() {
        let (use_case, _presentation, mut state) = setup();
        claim(&mut state, "alice");

        let outcome = use_case.execute(&mut state, broken("bob", MARKER, 2, 2));

        assert_eq!(outcome, BreakOutcome::Denied);
        assert!(matches!(
            state.deferred.drain_due(1).as_slice(),
            [Compensation::RestoreBlock { .. }]
        ));
    }

    #[test]
    fn member_may_break_ordinary_blocks() {
        let (use_case, _presentation, mut state) = setup();
        let (region_id, _) = claim(&mut state, "alice");
        state
            .regions
            .get_mut(&region_id)
            .expect("region")
            .add_member(ActorId::from("bob"))
            .expect("member added");

        let outcome = use_case.execute(&mut state, broken("bob", "minecraft:stone", 1, 1));

        assert_eq!(outcome, BreakOutcome::Allowed);
        assert!(state.deferred.is_empty());
    }
}
