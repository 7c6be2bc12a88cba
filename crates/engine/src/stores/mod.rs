//! In-memory state storage modules.
//!
//! Stores own the runtime state of the territory system:
//! - `RegionStore` - regions and the id counter
//! - `MarkerRegistry` - anchor markers
//! - `OwnerStatsStore` - per-owner statistics
//! - `DeferredQueue` - delayed compensations
//! - `ActorRoster` - connected actors as of the latest tick
//!
//! All of it lives in one [`TerritoryState`] owned by the service and lent
//! to each handler; nothing here is global.

pub mod deferred;
pub mod markers;
pub mod owner_stats;
pub mod regions;
pub mod roster;

pub use deferred::{Compensation, DeferredQueue};
pub use markers::MarkerRegistry;
pub use owner_stats::OwnerStatsStore;
pub use regions::{RegionRenames, RegionStore};
pub use roster::{ActorRoster, ConnectedActor};

#[derive(Debug)]
pub struct TerritoryState {
    pub regions: RegionStore,
    pub markers: MarkerRegistry,
    pub owner_stats: OwnerStatsStore,
    pub deferred: DeferredQueue,
    pub roster: ActorRoster,
    /// Latest tick reported by the host
    pub current_tick: u64,
}

impl TerritoryState {
    pub fn new(next_region_id: u64) -> Self {
        Self {
            regions: RegionStore::new(next_region_id),
            markers: MarkerRegistry::new(),
            owner_stats: OwnerStatsStore::new(),
            deferred: DeferredQueue::new(),
            roster: ActorRoster::new(),
            current_tick: 0,
        }
    }

    /// Tick a compensation scheduled now should run at.
    pub fn next_tick(&self) -> u64 {
        self.current_tick + 1
    }
}
