//! Delayed single-shot compensations.
//!
//! Rollbacks never run inside the event that triggered them. They are queued
//! here with a due tick and drained at the start of that tick. There is no
//! cancellation: each task re-checks its targets when it finally runs.

use terraclaim_domain::{ActorId, BlockPos, BlockType, DimensionId, MarkerId, RegionId};

use super::regions::RegionRenames;

/// A corrective world mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Compensation {
    /// Undo a forbidden placement: clear the block and refund one item.
    RevertPlacement {
        actor: ActorId,
        dimension: DimensionId,
        pos: BlockPos,
        placed: BlockType,
    },
    /// Put a broken marker block back.
    RestoreMarker {
        actor: ActorId,
        dimension: DimensionId,
        pos: BlockPos,
        marker_id: Option<MarkerId>,
        region_id: Option<RegionId>,
    },
    /// Put a forbidden break back.
    RestoreBlock {
        actor: ActorId,
        dimension: DimensionId,
        pos: BlockPos,
        broken: BlockType,
    },
}

impl Compensation {
    pub fn actor(&self) -> &ActorId {
        match self {
            Self::RevertPlacement { actor, .. }
            | Self::RestoreMarker { actor, .. }
            | Self::RestoreBlock { actor, .. } => actor,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::RevertPlacement { .. } => "revert_placement",
            Self::RestoreMarker { .. } => "restore_marker",
            Self::RestoreBlock { .. } => "restore_block",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DeferredTask {
    due_tick: u64,
    compensation: Compensation,
}

#[derive(Debug, Default)]
pub struct DeferredQueue {
    tasks: Vec<DeferredTask>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_tick: u64, compensation: Compensation) {
        self.tasks.push(DeferredTask {
            due_tick,
            compensation,
        });
    }

    /// Remove and return every task due at or before `tick`, oldest first.
    pub fn drain_due(&mut self, tick: u64) -> Vec<Compensation> {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|task| task.due_tick <= tick);
        self.tasks = pending;
        due.into_iter().map(|task| task.compensation).collect()
    }

    /// Point queued marker restores at re-keyed regions.
    pub fn rename_regions(&mut self, renames: &RegionRenames) {
        for task in &mut self.tasks {
            if let Compensation::RestoreMarker {
                region_id: Some(region_id),
                ..
            } = &mut task.compensation
            {
                if let Some(fresh) = renames.get(region_id) {
                    *region_id = fresh.clone();
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}
