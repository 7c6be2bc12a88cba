//! Boundary-crossing notifications.
//!
//! The notifier owns one [`ActorTerritoryState`] per connected actor. States
//! are created the first time an actor is observed and dropped as soon as
//! the actor disconnects.

use std::collections::HashMap;

use terraclaim_domain::{
    ActorId, ActorTerritoryState, IndicatorChange, Region, TerritoryTransition, TerritoryUpdate,
};

use crate::messages;
use crate::use_cases::Notices;

pub struct TerritoryNotifier {
    notices: Notices,
    interval: u64,
    states: HashMap<ActorId, ActorTerritoryState>,
}

impl TerritoryNotifier {
    pub fn new(notices: Notices, interval: u64) -> Self {
        Self {
            notices,
            interval,
            states: HashMap::new(),
        }
    }

    /// Advance `actor`'s state with the region covering it this tick and
    /// deliver whatever messages the transition calls for.
    pub fn update(&mut self, actor: &ActorId, current: Option<&Region>, tick: u64) -> TerritoryUpdate {
        let state = self.states.entry(actor.clone()).or_default();
        let update = state.observe(current, tick, self.interval);

        match &update.transition {
            Some(TerritoryTransition::Entered {
                region_id,
                owner_id,
                owner_name,
            }) => {
                tracing::debug!(actor_id = %actor, region_id = %region_id, "Actor entered territory");
                if owner_id == actor {
                    self.notices.send_all(actor, &messages::welcome_owner());
                } else {
                    self.notices
                        .send_all(actor, &messages::welcome_visitor(owner_name));
                }
            }
            Some(TerritoryTransition::Left {
                owner_id,
                owner_name,
            }) => {
                tracing::debug!(actor_id = %actor, owner_id = %owner_id, "Actor left territory");
                let farewell = if owner_id == actor {
                    messages::farewell_own()
                } else {
                    messages::farewell_visitor(owner_name)
                };
                self.notices.send(actor, &farewell);
            }
            None => {}
        }

        match &update.indicator {
            IndicatorChange::Show {
                owner_id,
                owner_name,
            } => {
                let line = if owner_id == actor {
                    messages::indicator_owner(owner_name)
                } else {
                    messages::indicator_visitor(owner_name)
                };
                self.notices.display(actor, Some(line));
            }
            IndicatorChange::Clear => {
                self.notices.display(actor, None);
            }
            IndicatorChange::Keep => {}
        }

        update
    }

    /// Drop `actor`'s state. Returns whether one existed.
    pub fn forget(&mut self, actor: &ActorId) -> bool {
        self.states.remove(actor).is_some()
    }

    pub fn tracked(&self) -> usize {
        self.states.len()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
