use std::collections::HashMap;
use std::sync::Mutex;

use terraclaim_domain::{ActorId, BlockPos, BlockType, DimensionId, ItemDescriptor};

use crate::infrastructure::ports::{WorldError, WorldPort};

#[derive(Debug, Default)]
struct WorldLog {
    blocks: HashMap<(DimensionId, BlockPos), BlockType>,
    set_blocks: Vec<(DimensionId, BlockPos, BlockType)>,
    items: Vec<(ActorId, ItemDescriptor)>,
    healed: Vec<ActorId>,
}

/// In-memory world. Positions never written are unknown (`None`).
#[derive(Debug, Default)]
pub struct ScriptedWorld {
    log: Mutex<WorldLog>,
}

impl ScriptedWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a block without recording it as an engine mutation.
    pub fn put(&self, dimension: &DimensionId, pos: BlockPos, block: &str) {
        self.lock()
            .blocks
            .insert((dimension.clone(), pos), BlockType::from(block));
    }

    pub fn block(&self, dimension: &DimensionId, pos: BlockPos) -> Option<BlockType> {
        self.lock().blocks.get(&(dimension.clone(), pos)).cloned()
    }

    pub fn set_blocks(&self) -> Vec<(DimensionId, BlockPos, BlockType)> {
        self.lock().set_blocks.clone()
    }

    pub fn items_given(&self) -> Vec<(ActorId, ItemDescriptor)> {
        self.lock().items.clone()
    }

    pub fn healed(&self) -> Vec<ActorId> {
        self.lock().healed.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WorldLog> {
        self.log.lock().expect("world lock")
    }
}

impl WorldPort for ScriptedWorld {
    fn block_at(
        &self,
        dimension: &DimensionId,
        pos: BlockPos,
    ) -> Result<Option<BlockType>, WorldError> {
        Ok(self.block(dimension, pos))
    }

    fn set_block(
        &self,
        dimension: &DimensionId,
        pos: BlockPos,
        block: &BlockType,
    ) -> Result<(), WorldError> {
        let mut log = self.lock();
        log.blocks.insert((dimension.clone(), pos), block.clone());
        log.set_blocks.push((dimension.clone(), pos, block.clone()));
        Ok(())
    }

    fn give_item(&self, actor: &ActorId, item: &ItemDescriptor) -> Result<(), WorldError> {
        self.lock().items.push((actor.clone(), item.clone()));
        Ok(())
    }

    fn restore_health(&self, actor: &ActorId) -> Result<(), WorldError> {
        self.lock().healed.push(actor.clone());
        Ok(())
    }
}
