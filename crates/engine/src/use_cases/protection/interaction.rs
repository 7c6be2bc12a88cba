//! Cancelable interaction gates.

use std::sync::Arc;

use terraclaim_domain::{
    access, BlockPos, BlockType, DimensionId, EntityType, ProtectionSettings, Verdict, WorldPos,
};

use crate::messages;
use crate::stores::{ConnectedActor, TerritoryState};
use crate::use_cases::Notices;

/// Decides entity and block interactions before they happen. Returns `true`
/// when the host must cancel the interaction.
pub struct InteractionGuard {
    settings: Arc<ProtectionSettings>,
    notices: Notices,
}

impl InteractionGuard {
    pub fn new(settings: Arc<ProtectionSettings>, notices: Notices) -> Self {
        Self { settings, notices }
    }

    /// The target's position decides which claim applies; the actor's own
    /// position stands in when the host did not report one.
    pub fn entity(
        &self,
        state: &TerritoryState,
        actor: &ConnectedActor,
        target: &EntityType,
        target_pos: Option<WorldPos>,
    ) -> bool {
        let point = target_pos.unwrap_or(actor.position);
        let region = state.regions.find_containing(&actor.dimension, point);
        match access::check_entity_interaction(&actor.id, region, target, &self.settings) {
            Verdict::Allow => false,
            Verdict::Deny { owner_name } => {
                tracing::debug!(actor_id = %actor.id, target = %target, "Entity interaction denied");
                self.notices.send_all(
                    &actor.id,
                    &messages::entity_interaction_denied(target.display_name(), &owner_name),
                );
                true
            }
        }
    }

    pub fn block(
        &self,
        state: &TerritoryState,
        actor: &ConnectedActor,
        block: &BlockType,
        pos: BlockPos,
        dimension: &DimensionId,
    ) -> bool {
        let region = state.regions.find_containing(dimension, pos.to_world());
        match access::check_block_interaction(&actor.id, region, block, &self.settings) {
            Verdict::Allow => false,
            Verdict::Deny { owner_name } => {
                tracing::debug!(actor_id = %actor.id, block = %block, pos = %pos, "Block interaction denied");
                self.notices.send_all(
                    &actor.id,
                    &messages::block_interaction_denied(block.display_name(), &owner_name),
                );
                true
            }
        }
    }
}
