//! Deferred rollback execution.
//!
//! Every task re-checks its targets before touching the world: the claim it
//! protects may have expired and the block may have changed since the task
//! was queued. A task that no longer applies fails with a compensation error
//! instead of acting on stale assumptions.

use std::sync::Arc;

use terraclaim_domain::{
    BlockPos, BlockType, DimensionId, ItemDescriptor, MarkerId, ProtectionSettings, RegionId,
};

use crate::infrastructure::ports::WorldPort;
use crate::infrastructure::TerritoryError;
use crate::messages;
use crate::stores::{Compensation, TerritoryState};
use crate::use_cases::Notices;

pub struct CompensationRunner {
    world: Arc<dyn WorldPort>,
    settings: Arc<ProtectionSettings>,
    notices: Notices,
}

impl CompensationRunner {
    pub fn new(world: Arc<dyn WorldPort>, settings: Arc<ProtectionSettings>, notices: Notices) -> Self {
        Self {
            world,
            settings,
            notices,
        }
    }

    /// Run every task due at the current tick. Failures are logged and the
    /// affected actor gets a generic notice. Returns how many tasks applied.
    pub fn drain_due(&self, state: &mut TerritoryState) -> usize {
        let mut applied = 0;
        for task in state.deferred.drain_due(state.current_tick) {
            match self.execute(state, &task) {
                Ok(()) => applied += 1,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        kind = e.kind(),
                        task = task.kind(),
                        actor_id = %task.actor(),
                        "Deferred compensation failed"
                    );
                    self.notices
                        .send(task.actor(), &messages::compensation_failed());
                }
            }
        }
        applied
    }

    pub fn execute(&self, state: &TerritoryState, task: &Compensation) -> Result<(), TerritoryError> {
        match task {
            Compensation::RevertPlacement {
                actor,
                dimension,
                pos,
                placed,
            } => {
                self.expect_block(dimension, *pos, placed)?;
                self.world.set_block(dimension, *pos, &BlockType::air())?;
                self.world
                    .give_item(actor, &ItemDescriptor::single(placed.as_item()))?;
                tracing::debug!(actor_id = %actor, pos = %pos, block = %placed, "Placement reverted");
            }
            Compensation::RestoreMarker {
                dimension,
                pos,
                marker_id,
                region_id,
                ..
            } => {
                self.expect_claim(state, marker_id.as_ref(), region_id.as_ref())?;
                self.expect_empty(dimension, *pos)?;
                self.world
                    .set_block(dimension, *pos, &self.settings.marker_block)?;
                tracing::debug!(pos = %pos, "Marker restored");
            }
            Compensation::RestoreBlock {
                dimension,
                pos,
                broken,
                ..
            } => {
                self.expect_empty(dimension, *pos)?;
                self.world.set_block(dimension, *pos, broken)?;
                tracing::debug!(pos = %pos, block = %broken, "Block restored");
            }
        }
        Ok(())
    }

    /// An unknown block is assumed unchanged.
    fn expect_block(
        &self,
        dimension: &DimensionId,
        pos: BlockPos,
        expected: &BlockType,
    ) -> Result<(), TerritoryError> {
        match self.world.block_at(dimension, pos)? {
            Some(found) if found != *expected => Err(TerritoryError::compensation(format!(
                "expected {expected} at {pos}, found {found}"
            ))),
            _ => Ok(()),
        }
    }

    fn expect_empty(&self, dimension: &DimensionId, pos: BlockPos) -> Result<(), TerritoryError> {
        match self.world.block_at(dimension, pos)? {
            Some(found) if !found.is_air() => Err(TerritoryError::compensation(format!(
                "{pos} is occupied by {found}"
            ))),
            _ => Ok(()),
        }
    }

    fn expect_claim(
        &self,
        state: &TerritoryState,
        marker_id: Option<&MarkerId>,
        region_id: Option<&RegionId>,
    ) -> Result<(), TerritoryError> {
        let marker_alive = marker_id.is_some_and(|id| state.markers.get(id).is_some());
        let region_alive = region_id.is_some_and(|id| state.regions.get(id).is_some());
        if marker_alive || region_alive {
            Ok(())
        } else {
            Err(TerritoryError::compensation(
                "the claim protecting this marker no longer exists",
            ))
        }
    }
}
