//! Marker registry.

use terraclaim_domain::{DimensionId, Marker, MarkerId, RegionId, WorldPos};

use super::regions::RegionRenames;

#[derive(Debug, Default)]
pub struct MarkerRegistry {
    markers: Vec<Marker>,
    dirty: bool,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, marker: Marker) {
        self.markers.push(marker);
        self.dirty = true;
    }

    pub fn unbind(&mut self, id: &MarkerId) -> Option<Marker> {
        let index = self.markers.iter().position(|marker| marker.id == *id)?;
        self.dirty = true;
        Some(self.markers.remove(index))
    }

    /// Marker on the block containing `point`.
    pub fn find_at(&self, dimension: &DimensionId, point: WorldPos) -> Option<&Marker> {
        let block = point.floor();
        self.markers
            .iter()
            .find(|marker| marker.is_at(dimension, block))
    }

    pub fn get(&self, id: &MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id == *id)
    }

    /// Turn every marker linked to `region` into an orphan.
    pub fn orphan_links_to(&mut self, region: &RegionId) -> usize {
        let mut count = 0;
        for marker in &mut self.markers {
            if marker.region_id.as_ref() == Some(region) {
                marker.orphan();
                count += 1;
            }
        }
        if count > 0 {
            self.dirty = true;
        }
        count
    }

    pub fn all(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Merge markers read from storage, keeping session markers whose id is
    /// not already stored. Session links follow any region renames.
    pub fn restore(&mut self, stored: Vec<Marker>, renames: &RegionRenames) {
        let session = std::mem::take(&mut self.markers);
        self.markers = stored;
        for mut marker in session {
            if self.get(&marker.id).is_some() {
                continue;
            }
            if let Some(fresh) = marker.region_id.as_ref().and_then(|id| renames.get(id)) {
                marker.region_id = Some(fresh.clone());
            }
            self.markers.push(marker);
        }
        self.dirty = true;
    }

    /// Every marker, mutably. Marks the registry dirty.
    pub fn all_mut(&mut self) -> &mut [Marker] {
        self.dirty = true;
        &mut self.markers
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
