//! Value objects - Immutable objects defined by their attributes

mod block;
mod position;
mod settings;

pub use block::{BlockType, EntityType, ItemDescriptor, ItemType};
pub use position::{BlockPos, WorldPos};
pub use settings::{
    ProtectionSettings, DEFAULT_CLAIM_LIFETIME_TICKS, NOTIFICATION_INTERVAL_TICKS,
    VISUAL_PERIOD_TICKS,
};
