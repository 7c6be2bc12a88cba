use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use terraclaim_domain::{ActorId, Marker, OwnerStats, Region, RegionId, SystemMeta};

use super::migration::{migrate, next_counter, MigratedState, RawDocuments};
use super::records::{
    owner_stats_document, MarkerRecord, OwnerStatsDocument, RegionRecord, SystemConfigRecord,
};
use crate::infrastructure::ports::{ClockPort, PersistenceError, PersistencePort};

pub const REGIONS_KEY: &str = "protectionAreas";
pub const MARKERS_KEY: &str = "protectionStones";
pub const OWNER_STATS_KEY: &str = "playerProtectionData";
pub const SYSTEM_KEY: &str = "systemConfig";
/// Region counter key used before it moved into `systemConfig`
pub const LEGACY_COUNTER_KEY: &str = "nextAreaId";

pub struct TerritoryRepository {
    store: Arc<dyn PersistencePort>,
    clock: Arc<dyn ClockPort>,
}

impl TerritoryRepository {
    pub fn new(store: Arc<dyn PersistencePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    /// Make sure every document exists and return the id counter to start
    /// from, so claims made before the full load never reuse an id.
    pub fn bootstrap(&self) -> Result<u64, PersistenceError> {
        self.write_if_missing(REGIONS_KEY, "[]")?;
        self.write_if_missing(MARKERS_KEY, "[]")?;
        self.write_if_missing(OWNER_STATS_KEY, "{}")?;

        let system: Option<SystemConfigRecord> = self.read(SYSTEM_KEY)?;
        if system.is_none() {
            let fresh = SystemConfigRecord::from(&SystemMeta::default());
            self.write(SYSTEM_KEY, &fresh)?;
        }
        let legacy: Option<u64> = self.read(LEGACY_COUNTER_KEY)?;
        let stored = system.and_then(|record| record.next_area_id);
        let existing: Vec<u64> = self
            .read::<Vec<RegionRecord>>(REGIONS_KEY)?
            .unwrap_or_default()
            .iter()
            .filter_map(|record| RegionId::new(record.id.as_str()).counter())
            .map(|counter| counter + 1)
            .collect();
        Ok(next_counter(
            &[],
            stored.into_iter().chain(legacy).chain(existing),
        ))
    }

    /// Read and migrate every document.
    pub fn load(&self, default_lifetime: u32) -> Result<MigratedState, PersistenceError> {
        let raw = RawDocuments {
            regions: self.read::<Vec<RegionRecord>>(REGIONS_KEY)?.unwrap_or_default(),
            markers: self.read::<Vec<MarkerRecord>>(MARKERS_KEY)?.unwrap_or_default(),
            owner_stats: self
                .read::<OwnerStatsDocument>(OWNER_STATS_KEY)?
                .unwrap_or_default(),
            system: self.read(SYSTEM_KEY)?,
            legacy_counter: self.read(LEGACY_COUNTER_KEY)?,
        };
        Ok(migrate(raw, default_lifetime))
    }

    pub fn save_regions(&self, regions: &[Region]) -> Result<(), PersistenceError> {
        let records: Vec<RegionRecord> = regions.iter().map(RegionRecord::from).collect();
        self.write(REGIONS_KEY, &records)
    }

    pub fn save_markers(&self, markers: &[Marker]) -> Result<(), PersistenceError> {
        let records: Vec<MarkerRecord> = markers.iter().map(MarkerRecord::from).collect();
        self.write(MARKERS_KEY, &records)
    }

    pub fn save_owner_stats(
        &self,
        stats: &HashMap<ActorId, OwnerStats>,
    ) -> Result<(), PersistenceError> {
        self.write(OWNER_STATS_KEY, &owner_stats_document(stats))
    }

    /// Stamp `meta` with the save tick and wall-clock time, then write it.
    pub fn save_meta(&self, meta: &mut SystemMeta, tick: u64) -> Result<(), PersistenceError> {
        meta.last_saved = tick;
        meta.saved_at = Some(self.clock.now());
        self.write(SYSTEM_KEY, &SystemConfigRecord::from(&*meta))
    }

    fn write_if_missing(&self, key: &str, empty: &str) -> Result<(), PersistenceError> {
        if self.store.get(key)?.is_none() {
            self.store.set(key, empty)?;
        }
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PersistenceError> {
        match self.store.get(key)? {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| PersistenceError::serialization(key, e)),
            _ => Ok(None),
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), PersistenceError> {
        let json =
            serde_json::to_string(value).map_err(|e| PersistenceError::serialization(key, e))?;
        self.store.set(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::key_value::InMemoryStore;
    use crate::infrastructure::ports::{MockClockPort, MockPersistencePort};
    use chrono::{TimeZone, Utc};
    use terraclaim_domain::{
        BlockPos, DimensionId, MarkerId, NewRegion, RegionId, SCHEMA_VERSION,
    };

    fn clock() -> Arc<dyn ClockPort> {
        let mut clock = MockClockPort::new();
        clock
            .expect_now()
            .returning(|| Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap());
        Arc::new(clock)
    }

    fn repository(store: Arc<InMemoryStore>) -> TerritoryRepository {
        TerritoryRepository::new(store, clock())
    }

    fn sample_region(counter: u64) -> Region {
        let mut region = NewRegion::new(
            BlockPos::new(0, 64, 0),
            DimensionId::overworld(),
            ActorId::from("owner"),
            "Owner",
            10,
        )
        .with_marker(MarkerId::new(format!("stone_{counter}")))
        .into_region(RegionId::from_counter(counter));
        region.add_member(ActorId::from("friend")).unwrap();
        region.pvp_allowed = true;
        region
    }

    fn sample_marker(counter: u64) -> Marker {
        Marker::new(
            MarkerId::new(format!("stone_{counter}")),
            BlockPos::new(0, 64, 0),
            DimensionId::overworld(),
            ActorId::from("owner"),
            "Owner",
            10,
        )
        .linked_to(RegionId::from_counter(counter))
    }

    #[test]
    fn bootstrap_creates_empty_documents() {
        let store = Arc::new(InMemoryStore::new());
        let counter = repository(store.clone()).bootstrap().unwrap();

        assert_eq!(counter, 1);
        assert_eq!(store.get(REGIONS_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(MARKERS_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(OWNER_STATS_KEY).unwrap().as_deref(), Some("{}"));
        assert!(store.get(SYSTEM_KEY).unwrap().is_some());
    }

    #[test]
    fn bootstrap_reads_legacy_counter() {
        let store = Arc::new(InMemoryStore::with_entries([(LEGACY_COUNTER_KEY, "12")]));
        assert_eq!(repository(store).bootstrap().unwrap(), 12);
    }

    #[test]
    fn full_state_round_trips() {
        let store = Arc::new(InMemoryStore::new());
        let repo = repository(store);
        let regions = vec![sample_region(1), sample_region(2)];
        let markers = vec![sample_marker(1), sample_marker(2)];
        let mut stats = HashMap::new();
        let mut owner = OwnerStats::default();
        owner.record_claim(RegionId::from_counter(1), MarkerId::new("stone_1"), 10);
        stats.insert(ActorId::from("owner"), owner);
        let mut meta = SystemMeta {
            next_region_id: 3,
            ..SystemMeta::default()
        };

        repo.save_regions(&regions).unwrap();
        repo.save_markers(&markers).unwrap();
        repo.save_owner_stats(&stats).unwrap();
        repo.save_meta(&mut meta, 99).unwrap();

        let loaded = repo.load(2400).unwrap();
        assert_eq!(loaded.regions, regions);
        assert_eq!(loaded.markers, markers);
        assert_eq!(loaded.owner_stats, stats);
        assert_eq!(loaded.meta.next_region_id, 3);
        assert_eq!(loaded.meta.last_saved, 99);
        assert_eq!(loaded.meta.saved_at, meta.saved_at);
        assert_eq!(loaded.meta.version, SCHEMA_VERSION);
        assert!(!loaded.report.upgraded());
    }

    #[test]
    fn older_documents_get_defaults() {
        let store = Arc::new(InMemoryStore::with_entries([(
            REGIONS_KEY,
            r#"[{"id":"area_1_x","center":{"x":1,"y":2,"z":3},"playerId":"p","playerName":"P",
                "ticksRemaining":2400,"dimensionId":"minecraft:overworld","createdAt":0,
                "isPermanent":true}]"#,
        )]));
        let loaded = repository(store).load(2400).unwrap();

        let region = &loaded.regions[0];
        assert!(region.show_visuals);
        assert!(region.members.is_empty());
        assert!(!region.pvp_allowed);
        assert!(!region.explosions_allowed);
        assert_eq!(loaded.meta.next_region_id, 2);
    }

    #[test]
    fn corrupt_document_is_a_serialization_error() {
        let store = Arc::new(InMemoryStore::with_entries([(REGIONS_KEY, "{not json")]));
        let err = repository(store).load(2400).unwrap_err();
        assert!(matches!(err, PersistenceError::Serialization { .. }));
    }

    #[test]
    fn store_failures_propagate() {
        let mut store = MockPersistencePort::new();
        store
            .expect_set()
            .returning(|key, _| Err(PersistenceError::store("set", key, "disk full")));
        let repo = TerritoryRepository::new(Arc::new(store), clock());

        let err = repo.save_regions(&[]).unwrap_err();
        assert!(matches!(err, PersistenceError::Store { .. }));
    }
}
