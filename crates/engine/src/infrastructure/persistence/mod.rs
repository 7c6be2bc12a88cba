//! Territory persistence over the key-value port.
//!
//! Four documents are stored independently:
//! - `protectionAreas` - region list
//! - `protectionStones` - marker list
//! - `playerProtectionData` - owner stats keyed by actor id
//! - `systemConfig` - schema version, counters, last save
//!
//! Loading goes through [`migration::migrate`] exactly once.

pub mod migration;
pub mod records;
mod repository;

pub use migration::{MigratedState, MigrationReport, RawDocuments};
pub use repository::{
    TerritoryRepository, LEGACY_COUNTER_KEY, MARKERS_KEY, OWNER_STATS_KEY, REGIONS_KEY, SYSTEM_KEY,
};
