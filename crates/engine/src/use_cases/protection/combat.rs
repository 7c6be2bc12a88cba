//! Combat between actors.
//!
//! The host reports damage after it landed and offers no cancellation, so a
//! denial heals the victim instead. The victim may see the hit for a moment
//! before the heal arrives.

use std::sync::Arc;

use terraclaim_domain::{access, Verdict};

use crate::infrastructure::ports::WorldPort;
use crate::infrastructure::TerritoryError;
use crate::messages;
use crate::stores::{ConnectedActor, TerritoryState};
use crate::use_cases::Notices;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatOutcome {
    /// Not actor-versus-actor, or PvP is allowed where the victim stands.
    Ignored,
    Compensated,
}

pub struct CombatGuard {
    world: Arc<dyn WorldPort>,
    notices: Notices,
}

impl CombatGuard {
    pub fn new(world: Arc<dyn WorldPort>, notices: Notices) -> Self {
        Self { world, notices }
    }

    pub fn execute(
        &self,
        state: &TerritoryState,
        attacker: Option<&ConnectedActor>,
        victim: &ConnectedActor,
        amount: f64,
    ) -> Result<CombatOutcome, TerritoryError> {
        let Some(attacker) = attacker else {
            return Ok(CombatOutcome::Ignored);
        };
        let region = state
            .regions
            .find_containing(&victim.dimension, victim.position);
        let Verdict::Deny { owner_name } = access::check_combat(region) else {
            return Ok(CombatOutcome::Ignored);
        };

        self.notices
            .send(&victim.id, &messages::combat_victim_notice());
        self.notices
            .send_all(&attacker.id, &messages::combat_attacker_notice(&owner_name));
        tracing::debug!(
            attacker_id = %attacker.id,
            victim_id = %victim.id,
            amount,
            "Combat damage compensated"
        );

        if amount > 0.0 {
            self.world.restore_health(&victim.id)?;
        }
        Ok(CombatOutcome::Compensated)
    }
}
