use terraclaim_domain::{ActorId, BlockPos, BlockType, DimensionId, ItemDescriptor};

use super::WorldError;

/// World mutation collaborator.
#[cfg_attr(test, mockall::automock)]
pub trait WorldPort: Send + Sync {
    /// Block currently at `pos`, or `None` when the adapter cannot tell.
    fn block_at(&self, dimension: &DimensionId, pos: BlockPos)
        -> Result<Option<BlockType>, WorldError>;

    fn set_block(
        &self,
        dimension: &DimensionId,
        pos: BlockPos,
        block: &BlockType,
    ) -> Result<(), WorldError>;

    fn give_item(&self, actor: &ActorId, item: &ItemDescriptor) -> Result<(), WorldError>;

    /// Instantly heal `actor` to full health.
    fn restore_health(&self, actor: &ActorId) -> Result<(), WorldError>;
}
