//! Authoritative region collection.
//!
//! Insertion order is kept: containment queries return the first match, and
//! the lifecycle sweep walks the collection back to front so it can remove
//! entries while iterating.

use std::collections::HashMap;

use terraclaim_domain::{DimensionId, NewRegion, Region, RegionId, WorldPos};

/// Session regions re-keyed by [`RegionStore::restore`], old id to new id.
pub type RegionRenames = HashMap<RegionId, RegionId>;

#[derive(Debug)]
pub struct RegionStore {
    regions: Vec<Region>,
    next_id: u64,
    dirty: bool,
}

impl RegionStore {
    /// Empty store whose first id will be `area_<next_id>`.
    pub fn new(next_id: u64) -> Self {
        Self {
            regions: Vec::new(),
            next_id: next_id.max(1),
            dirty: false,
        }
    }

    /// Insert a region and return its freshly minted id.
    pub fn create(&mut self, region: NewRegion) -> RegionId {
        let id = RegionId::from_counter(self.next_id);
        self.next_id += 1;
        self.regions.push(region.into_region(id.clone()));
        self.dirty = true;
        id
    }

    pub fn remove(&mut self, id: &RegionId) -> Option<Region> {
        let index = self.regions.iter().position(|region| region.id == *id)?;
        Some(self.remove_index(index))
    }

    pub fn remove_index(&mut self, index: usize) -> Region {
        self.dirty = true;
        self.regions.remove(index)
    }

    pub fn get(&self, id: &RegionId) -> Option<&Region> {
        self.regions.iter().find(|region| region.id == *id)
    }

    /// Mutable access. Marks the store dirty.
    pub fn get_mut(&mut self, id: &RegionId) -> Option<&mut Region> {
        let region = self.regions.iter_mut().find(|region| region.id == *id)?;
        self.dirty = true;
        Some(region)
    }

    pub fn get_index(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    /// Mutable access by position. Does not mark the store dirty: the sweep
    /// ages regions every tick and lifetimes are only saved with other changes.
    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Region> {
        self.regions.get_mut(index)
    }

    /// First region whose footprint covers `point`.
    pub fn find_containing(&self, dimension: &DimensionId, point: WorldPos) -> Option<&Region> {
        self.regions
            .iter()
            .find(|region| region.contains(dimension, point))
    }

    /// Region anchored at the block containing `point`.
    pub fn find_by_anchor(&self, dimension: &DimensionId, point: WorldPos) -> Option<&Region> {
        let anchor = point.floor();
        self.regions
            .iter()
            .find(|region| region.is_anchored_at(dimension, anchor))
    }

    pub fn all(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Merge regions read from storage. Stored regions come first and keep
    /// their ids. A session region whose id is already taken by a stored one
    /// gets a fresh id above both counters; the renames are returned so the
    /// caller can rewrite every reference to the old id.
    pub fn restore(&mut self, stored: Vec<Region>, next_id: u64) -> RegionRenames {
        let session = std::mem::take(&mut self.regions);
        self.regions = stored;
        self.next_id = self.next_id.max(next_id);

        let mut renames = RegionRenames::new();
        for mut region in session {
            if self.get(&region.id).is_some() {
                let fresh = RegionId::from_counter(self.next_id);
                self.next_id += 1;
                renames.insert(region.id.clone(), fresh.clone());
                region.id = fresh;
            }
            self.regions.push(region);
        }
        self.dirty = true;
        renames
    }

    /// Every region, mutably. Marks the store dirty.
    pub fn all_mut(&mut self) -> &mut [Region] {
        self.dirty = true;
        &mut self.regions
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terraclaim_domain::{ActorId, BlockPos};

    fn claim(x: i32, z: i32) -> NewRegion {
        NewRegion::new(
            BlockPos::new(x, 64, z),
            DimensionId::overworld(),
            ActorId::from("owner"),
            "Owner",
            0,
        )
    }

    #[test]
    fn ids_come_from_the_counter() {
        let mut store = RegionStore::new(5);
        assert_eq!(store.create(claim(0, 0)).as_str(), "area_5");
        assert_eq!(store.create(claim(50, 0)).as_str(), "area_6");
        assert_eq!(store.next_id(), 7);
        assert!(store.is_dirty());
    }

    #[test]
    fn containment_ignores_height_and_checks_dimension() {
        let mut store = RegionStore::new(1);
        let id = store.create(claim(0, 0));
        let overworld = DimensionId::overworld();

        let found = store.find_containing(&overworld, WorldPos::new(4.9, 300.0, -5.0));
        assert_eq!(found.map(|r| &r.id), Some(&id));
        assert!(store
            .find_containing(&overworld, WorldPos::new(6.0, 64.0, 0.0))
            .is_none());
        assert!(store
            .find_containing(&DimensionId::new(DimensionId::NETHER), WorldPos::new(0.0, 64.0, 0.0))
            .is_none());
    }

    #[test]
    fn anchor_lookup_floors_the_query() {
        let mut store = RegionStore::new(1);
        let id = store.create(claim(3, -2));
        let found = store.find_by_anchor(&DimensionId::overworld(), WorldPos::new(3.7, 64.2, -1.5));
        assert_eq!(found.map(|r| &r.id), Some(&id));
    }

    #[test]
    fn remove_returns_the_region_once() {
        let mut store = RegionStore::new(1);
        let id = store.create(claim(0, 0));
        store.mark_clean();

        assert!(store.remove(&id).is_some());
        assert!(store.remove(&id).is_none());
        assert!(store.is_dirty());
        assert!(store.is_empty());
    }

    #[test]
    fn restore_keeps_session_regions_and_raises_counter() {
        let mut store = RegionStore::new(1);
        let session_id = store.create(claim(100, 100));

        let stored = claim(0, 0).into_region(RegionId::from_counter(9));
        store.restore(vec![stored], 10);

        assert_eq!(store.len(), 2);
        assert_eq!(store.all()[0].id, RegionId::from_counter(9));
        assert!(store.get(&session_id).is_some());
        assert_eq!(store.create(claim(200, 200)).as_str(), "area_10");
    }

    #[test]
    fn restore_rekeys_session_region_colliding_with_stored_id() {
        // Bootstrap failed, so the session counter restarted at 1.
        let mut store = RegionStore::new(1);
        let session_id = store.create(claim(0, 0));
        assert_eq!(session_id.as_str(), "area_1");

        let stored = NewRegion::new(
            BlockPos::new(500, 64, 500),
            DimensionId::overworld(),
            ActorId::from("alice"),
            "alice",
            0,
        )
        .into_region(RegionId::from_counter(1));
        let renames = store.restore(vec![stored], 2);

        let fresh = RegionId::from_counter(2);
        assert_eq!(renames.get(&session_id), Some(&fresh));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&session_id).map(|r| r.owner_id.as_str()), Some("alice"));
        assert_eq!(store.get(&fresh).map(|r| r.owner_id.as_str()), Some("owner"));
        let overworld = DimensionId::overworld();
        assert_eq!(
            store
                .find_containing(&overworld, WorldPos::new(0.0, 64.0, 0.0))
                .map(|r| &r.id),
            Some(&fresh)
        );
        assert_eq!(store.create(claim(200, 200)).as_str(), "area_3");
    }
}
