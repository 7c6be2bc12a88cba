//! Block placement: claiming with the marker block, rollback otherwise.

use std::sync::Arc;

use terraclaim_domain::{
    access, BlockPos, BlockType, DimensionId, Marker, MarkerId, NewRegion, ProtectionSettings,
    RegionId, Verdict,
};

use crate::messages;
use crate::stores::{Compensation, ConnectedActor, TerritoryState};
use crate::use_cases::Notices;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementInput {
    pub actor: ConnectedActor,
    pub block: BlockType,
    pub pos: BlockPos,
    pub dimension: DimensionId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Allowed,
    /// A marker placement created a new claim.
    Claimed {
        region_id: RegionId,
        marker_id: MarkerId,
    },
    /// A marker block placed inside a claim the actor may build in; it stays
    /// an ordinary block.
    KeptInsideClaim,
    /// Rollback scheduled for the next tick.
    Denied,
}

/// Handles every block placement reported by the host.
///
/// The host reports placements after the fact, so a denial is realised as a
/// deferred rollback rather than a cancellation.
pub struct PlaceBlock {
    settings: Arc<ProtectionSettings>,
    notices: Notices,
}

impl PlaceBlock {
    pub fn new(settings: Arc<ProtectionSettings>, notices: Notices) -> Self {
        Self { settings, notices }
    }

    pub fn execute(&self, state: &mut TerritoryState, input: PlacementInput) -> PlacementOutcome {
        let region = state
            .regions
            .find_containing(&input.dimension, input.pos.to_world());

        let verdict = access::check_build(&input.actor.id, region);
        if let Verdict::Deny { owner_name } = verdict {
            self.notices
                .send_all(&input.actor.id, &messages::place_denied(&owner_name));
            tracing::debug!(
                actor_id = %input.actor.id,
                block = %input.block,
                pos = %input.pos,
                "Placement denied, rollback scheduled"
            );
            let due = state.next_tick();
            state.deferred.schedule(
                due,
                Compensation::RevertPlacement {
                    actor: input.actor.id,
                    dimension: input.dimension,
                    pos: input.pos,
                    placed: input.block,
                },
            );
            return PlacementOutcome::Denied;
        }

        if !self.settings.is_marker_block(&input.block) {
            return PlacementOutcome::Allowed;
        }

        if let Some(region) = region {
            self.notices
                .send(&input.actor.id, &messages::already_claimed(&region.owner_name));
            return PlacementOutcome::KeptInsideClaim;
        }

        self.claim(state, input)
    }

    fn claim(&self, state: &mut TerritoryState, input: PlacementInput) -> PlacementOutcome {
        let tick = state.current_tick;
        let marker_id = MarkerId::generate();
        let region_id = state.regions.create(
            NewRegion::new(
                input.pos,
                input.dimension.clone(),
                input.actor.id.clone(),
                input.actor.name.clone(),
                tick,
            )
            .with_lifetime(
                self.settings.claims_permanent,
                self.settings.claim_lifetime_ticks,
            )
            .with_marker(marker_id.clone()),
        );
        state.markers.bind(
            Marker::new(
                marker_id.clone(),
                input.pos,
                input.dimension,
                input.actor.id.clone(),
                input.actor.name.clone(),
                tick,
            )
            .linked_to(region_id.clone()),
        );
        state
            .owner_stats
            .record_claim(&input.actor.id, region_id.clone(), marker_id.clone(), tick);

        tracing::info!(
            region_id = %region_id,
            marker_id = %marker_id,
            actor_id = %input.actor.id,
            pos = %input.pos,
            "Claim created"
        );
        self.notices.send_all(
            &input.actor.id,
            &messages::claim_created(self.settings.footprint_size()),
        );

        PlacementOutcome::Claimed {
            region_id,
            marker_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{actor_at, RecordingPresentation};
    use terraclaim_domain::{ActorId, WorldPos};

    fn setup() -> (PlaceBlock, Arc<RecordingPresentation>, TerritoryState) {
        let presentation = Arc::new(RecordingPresentation::new());
        let use_case = PlaceBlock::new(
            Arc::new(ProtectionSettings::default()),
            Notices::new(presentation.clone()),
        );
        (use_case, presentation, TerritoryState::new(1))
    }

    fn place(actor: &str, block: &str, x: i32, z: i32) -> PlacementInput {
        PlacementInput {
            actor: actor_at(actor, WorldPos::new(f64::from(x), 64.0, f64::from(z))),
            block: BlockType::from(block),
            pos: BlockPos::new(x, 64, z),
            dimension: DimensionId::overworld(),
        }
    }

    #[test]
    fn marker_placement_creates_linked_claim() {
        let (use_case, presentation, mut state) = setup();

        let outcome = use_case.execute(&mut state, place("alice", "minecraft:diamond_block", 0, 0));

        let PlacementOutcome::Claimed {
            region_id,
            marker_id,
        } = outcome
        else {
            panic!("expected a claim, got {outcome:?}");
        };
        let region = state.regions.get(&region_id).expect("region stored");
        assert_eq!(region.owner_id, ActorId::from("alice"));
        assert!(region.permanent);
        assert_eq!(region.marker_id.as_ref(), Some(&marker_id));
        let marker = state.markers.get(&marker_id).expect("marker bound");
        assert_eq!(marker.region_id.as_ref(), Some(&region_id));
        assert_eq!(
            state
                .owner_stats
                .get(&ActorId::from("alice"))
                .map(|s| s.total_regions),
            Some(1)
        );
        assert!(presentation
            .texts_for("alice")
            .iter()
            .any(|m| m.contains("11x11")));
    }

    #[test]
    fn second_marker_at_same_point_does_not_claim_again() {
        let (use_case, _presentation, mut state) = setup();
        use_case.execute(&mut state, place("alice", "minecraft:diamond_block", 0, 0));

        let outcome = use_case.execute(&mut state, place("alice", "minecraft:diamond_block", 0, 0));

        assert_eq!(outcome, PlacementOutcome::KeptInsideClaim);
        assert_eq!(state.regions.len(), 1);
        assert_eq!(state.markers.len(), 1);
    }

    #[test]
    fn stranger_marker_inside_claim_is_rolled_back() {
        let (use_case, _presentation, mut state) = setup();
        use_case.execute(&mut state, place("alice", "minecraft:diamond_block", 0, 0));

        let outcome = use_case.execute(&mut state, place("bob", "minecraft:diamond_block", 2, 2));

        assert_eq!(outcome, PlacementOutcome::Denied);
        assert_eq!(state.regions.len(), 1);
        assert_eq!(state.deferred.len(), 1);
    }

    #[test]
    fn stranger_placement_schedules_rollback_for_next_tick() {
        let (use_case, presentation, mut state) = setup();
        use_case.execute(&mut state, place("alice", "minecraft:diamond_block", 0, 0));
        state.current_tick = 40;

        let outcome = use_case.execute(&mut state, place("bob", "minecraft:dirt", 3, 3));

        assert_eq!(outcome, PlacementOutcome::Denied);
        assert!(state.deferred.drain_due(40).is_empty());
        assert_eq!(
            state.deferred.drain_due(41),
            vec![Compensation::RevertPlacement {
                actor: ActorId::from("bob"),
                dimension: DimensionId::overworld(),
                pos: BlockPos::new(3, 64, 3),
                placed: BlockType::from("minecraft:dirt"),
            }]
        );
        assert!(presentation
            .texts_for("bob")
            .iter()
            .any(|m| m.contains("alice")));
    }

    #[test]
    fn placement_outside_claims_is_allowed() {
        let (use_case, _presentation, mut state) = setup();
        use_case.execute(&mut state, place("alice", "minecraft:diamond_block", 0, 0));

        let outcome = use_case.execute(&mut state, place("bob", "minecraft:dirt", 6, 0));

        assert_eq!(outcome, PlacementOutcome::Allowed);
        assert!(state.deferred.is_empty());
    }
}
