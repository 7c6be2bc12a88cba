//! Protection use cases: interaction, explosion and combat gates.

mod combat;
mod explosion;
mod interaction;

pub use combat::{CombatGuard, CombatOutcome};
pub use explosion::ExplosionGuard;
pub use interaction::InteractionGuard;

/// Container for protection use cases.
pub struct ProtectionUseCases {
    pub interaction: InteractionGuard,
    pub explosion: ExplosionGuard,
    pub combat: CombatGuard,
}

impl ProtectionUseCases {
    pub fn new(interaction: InteractionGuard, explosion: ExplosionGuard, combat: CombatGuard) -> Self {
        Self {
            interaction,
            explosion,
            combat,
        }
    }
}
