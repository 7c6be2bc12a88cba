//! Domain Events
//!
//! Results of advancing the per-actor territory state machine. The engine
//! turns them into presentation calls; the domain never talks to a host.

use crate::ids::{ActorId, RegionId};

/// A boundary crossing observed on one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerritoryTransition {
    /// The actor came in from outside, or moved straight into another region.
    Entered {
        region_id: RegionId,
        owner_id: ActorId,
        owner_name: String,
    },
    /// The actor is no longer inside any region. Carries the owner of the
    /// region they were last in.
    Left { owner_id: ActorId, owner_name: String },
}

/// What should happen to the persistent on-screen indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndicatorChange {
    Keep,
    Show { owner_id: ActorId, owner_name: String },
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerritoryUpdate {
    pub transition: Option<TerritoryTransition>,
    pub indicator: IndicatorChange,
}

impl TerritoryUpdate {
    pub fn unchanged() -> Self {
        Self {
            transition: None,
            indicator: IndicatorChange::Keep,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.transition.is_none() && self.indicator == IndicatorChange::Keep
    }
}
