//! Territory claiming domain
//!
//! Regions anchored by marker blocks, the records kept about their owners,
//! and the access-control rules evaluated against them. Everything here is
//! pure: no I/O, no logging, no clock.

pub mod access;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

/// Horizontal radius of every claim footprint, in blocks.
pub const PROTECTION_RADIUS: i32 = 5;

pub use access::{can_act, MarkerBreakDecision, Verdict};
pub use entities::{
    ActorTerritoryState, Marker, NewRegion, OwnerStats, Region, SystemMeta, SCHEMA_VERSION,
};
pub use error::DomainError;
pub use events::{IndicatorChange, TerritoryTransition, TerritoryUpdate};
pub use ids::{ActorId, DimensionId, MarkerId, RegionId};
pub use value_objects::{
    BlockPos, BlockType, EntityType, ItemDescriptor, ItemType, ProtectionSettings, WorldPos,
    DEFAULT_CLAIM_LIFETIME_TICKS, NOTIFICATION_INTERVAL_TICKS, VISUAL_PERIOD_TICKS,
};
