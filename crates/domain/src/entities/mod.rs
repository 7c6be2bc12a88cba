//! Domain entities - Core business objects with identity

mod marker;
mod owner_stats;
mod region;
mod system_meta;
mod territory_state;

pub use marker::Marker;
pub use owner_stats::OwnerStats;
pub use region::{NewRegion, Region};
pub use system_meta::{SystemMeta, SCHEMA_VERSION};
pub use territory_state::ActorTerritoryState;
