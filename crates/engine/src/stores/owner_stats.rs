use std::collections::HashMap;

use terraclaim_domain::{ActorId, MarkerId, OwnerStats, RegionId};

use super::regions::RegionRenames;

/// Per-owner statistics cache, persisted as one document.
#[derive(Debug, Default)]
pub struct OwnerStatsStore {
    stats: HashMap<ActorId, OwnerStats>,
    dirty: bool,
}

impl OwnerStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, owner: &ActorId) -> Option<&OwnerStats> {
        self.stats.get(owner)
    }

    pub fn record_claim(&mut self, owner: &ActorId, region: RegionId, marker: MarkerId, tick: u64) {
        self.stats
            .entry(owner.clone())
            .or_default()
            .record_claim(region, marker, tick);
        self.dirty = true;
    }

    pub fn record_removal(
        &mut self,
        owner: &ActorId,
        region: &RegionId,
        marker: Option<&MarkerId>,
        tick: u64,
    ) {
        if let Some(stats) = self.stats.get_mut(owner) {
            stats.record_removal(region, marker, tick);
            self.dirty = true;
        }
    }

    pub fn all(&self) -> &HashMap<ActorId, OwnerStats> {
        &self.stats
    }

    /// Merge stored stats into the session's. An owner who claimed before the
    /// load keeps both histories: totals add up, id lists are unioned and the
    /// latest activity wins. Session region ids follow any renames first.
    pub fn restore(&mut self, stored: HashMap<ActorId, OwnerStats>, renames: &RegionRenames) {
        for stats in self.stats.values_mut() {
            for id in &mut stats.regions_created {
                if let Some(fresh) = renames.get(id) {
                    *id = fresh.clone();
                }
            }
        }

        for (owner, stored) in stored {
            match self.stats.remove(&owner) {
                Some(session) => {
                    self.stats.insert(owner, merge(stored, session));
                }
                None => {
                    self.stats.insert(owner, stored);
                }
            }
        }
        self.dirty = true;
    }

    pub fn clear(&mut self) {
        self.stats.clear();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

fn merge(mut stored: OwnerStats, session: OwnerStats) -> OwnerStats {
    stored.total_regions = stored.total_regions.saturating_add(session.total_regions);
    stored.last_activity = stored.last_activity.max(session.last_activity);
    for id in session.regions_created {
        if !stored.regions_created.contains(&id) {
            stored.regions_created.push(id);
        }
    }
    for id in session.markers_placed {
        if !stored.markers_placed.contains(&id) {
            stored.markers_placed.push(id);
        }
    }
    stored
}
