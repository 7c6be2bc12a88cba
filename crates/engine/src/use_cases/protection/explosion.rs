use std::sync::Arc;

use terraclaim_domain::{access, DimensionId, ProtectionSettings, Verdict, WorldPos};

use crate::messages;
use crate::stores::TerritoryState;
use crate::use_cases::Notices;

/// Cancels explosions that start inside a claim with explosions disabled and
/// tells actors standing nearby.
pub struct ExplosionGuard {
    settings: Arc<ProtectionSettings>,
    notices: Notices,
}

impl ExplosionGuard {
    pub fn new(settings: Arc<ProtectionSettings>, notices: Notices) -> Self {
        Self { settings, notices }
    }

    pub fn execute(&self, state: &TerritoryState, origin: WorldPos, dimension: &DimensionId) -> bool {
        let region = state.regions.find_containing(dimension, origin);
        let Verdict::Deny { .. } = access::check_explosion(region) else {
            return false;
        };

        let notice = messages::explosion_blocked();
        let mut notified = 0usize;
        for actor in state
            .roster
            .near(dimension, origin, self.settings.explosion_notice_radius)
        {
            self.notices.send(&actor.id, &notice);
            notified += 1;
        }
        tracing::debug!(
            region_id = ?region.map(|r| &r.id),
            notified,
            "Explosion cancelled"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{actor_at, RecordingPresentation};
    use terraclaim_domain::{ActorId, BlockPos, NewRegion};

    #[test]
    fn blocked_explosion_notifies_only_nearby_actors() {
        let presentation = Arc::new(RecordingPresentation::new());
        let guard = ExplosionGuard::new(
            Arc::new(ProtectionSettings::default()),
            Notices::new(presentation.clone()),
        );
        let mut state = TerritoryState::new(1);
        state.regions.create(NewRegion::new(
            BlockPos::new(0, 64, 0),
            DimensionId::overworld(),
            ActorId::from("alice"),
            "alice",
            0,
        ));
        state.roster.replace(vec![
            actor_at("near", WorldPos::new(12.0, 64.0, 0.0)),
            actor_at("far", WorldPos::new(15.0, 64.0, 0.0)),
        ]);

        let cancel = guard.execute(&state, WorldPos::new(3.0, 60.0, 0.0), &DimensionId::overworld());

        assert!(cancel);
        assert_eq!(presentation.texts_for("near").len(), 1);
        assert!(presentation.texts_for("far").is_empty());
    }

    #[test]
    fn explosion_allowed_when_region_permits_it() {
        let presentation = Arc::new(RecordingPresentation::new());
        let guard = ExplosionGuard::new(
            Arc::new(ProtectionSettings::default()),
            Notices::new(presentation),
        );
        let mut state = TerritoryState::new(1);
        let id = state.regions.create(NewRegion::new(
            BlockPos::new(0, 64, 0),
            DimensionId::overworld(),
            ActorId::from("alice"),
            "alice",
            0,
        ));
        state.regions.get_mut(&id).expect("region").explosions_allowed = true;

        assert!(!guard.execute(&state, WorldPos::new(0.0, 64.0, 0.0), &DimensionId::overworld()));
        assert!(!guard.execute(&state, WorldPos::new(30.0, 64.0, 0.0), &DimensionId::overworld()));
    }
}
