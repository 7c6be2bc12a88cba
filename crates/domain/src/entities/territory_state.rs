//! Per-actor boundary-crossing state
//!
//! Transient: created on the first tick an actor is observed and dropped
//! when the actor disconnects. Never persisted.

use crate::entities::Region;
use crate::events::{IndicatorChange, TerritoryTransition, TerritoryUpdate};
use crate::ids::{ActorId, RegionId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorTerritoryState {
    current_region: Option<RegionId>,
    last_notification_tick: u64,
    inside: bool,
    /// Owner of the region the actor was last inside. Kept so the farewell
    /// still works when that region was removed in the meantime.
    last_owner: Option<(ActorId, String)>,
}

impl ActorTerritoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_region(&self) -> Option<&RegionId> {
        self.current_region.as_ref()
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn last_notification_tick(&self) -> u64 {
        self.last_notification_tick
    }

    /// Advance the state machine with the region covering the actor this tick.
    pub fn observe(&mut self, current: Option<&Region>, tick: u64, interval: u64) -> TerritoryUpdate {
        let just_entered = !self.inside && current.is_some();
        let just_left = self.inside && current.is_none();
        let changed_region = current.map(|region| &region.id) != self.current_region.as_ref();

        let transition = match current {
            Some(region) if just_entered || changed_region => Some(TerritoryTransition::Entered {
                region_id: region.id.clone(),
                owner_id: region.owner_id.clone(),
                owner_name: region.owner_name.clone(),
            }),
            None if just_left => self
                .last_owner
                .clone()
                .map(|(owner_id, owner_name)| TerritoryTransition::Left {
                    owner_id,
                    owner_name,
                }),
            _ => None,
        };

        self.current_region = current.map(|region| region.id.clone());
        self.inside = current.is_some();
        self.last_owner = current.map(|region| (region.owner_id.clone(), region.owner_name.clone()));

        let indicator = match current {
            Some(region) => {
                let due = tick.saturating_sub(self.last_notification_tick) >= interval;
                if just_entered || changed_region || due {
                    self.last_notification_tick = tick;
                    IndicatorChange::Show {
                        owner_id: region.owner_id.clone(),
                        owner_name: region.owner_name.clone(),
                    }
                } else {
                    IndicatorChange::Keep
                }
            }
            None if just_left => IndicatorChange::Clear,
            None => IndicatorChange::Keep,
        };

        TerritoryUpdate {
            transition,
            indicator,
        }
    }
}
