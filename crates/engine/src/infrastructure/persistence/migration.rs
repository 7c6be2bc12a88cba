//! Versioned load migration
//!
//! Runs once per load and turns raw persisted records into domain values:
//!
//! 1. Missing optional fields take their documented defaults.
//! 2. Fractional legacy coordinates are floored to block positions.
//! 3. Region/marker links are reconciled; dangling references become orphans.
//! 4. The region id counter is raised above every persisted id.
//! 5. The result is stamped with the current schema version.

use std::collections::{HashMap, HashSet};

use terraclaim_domain::{
    ActorId, BlockPos, DimensionId, Marker, MarkerId, OwnerStats, Region, RegionId, SystemMeta,
    WorldPos, SCHEMA_VERSION,
};

use super::records::{
    MarkerRecord, OwnerStatsDocument, OwnerStatsRecord, PointRecord, RegionRecord,
    SystemConfigRecord,
};

/// Everything read from the store before migration.
#[derive(Debug, Clone, Default)]
pub struct RawDocuments {
    pub regions: Vec<RegionRecord>,
    pub markers: Vec<MarkerRecord>,
    pub owner_stats: OwnerStatsDocument,
    pub system: Option<SystemConfigRecord>,
    /// Counter kept under its own key by older releases
    pub legacy_counter: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Version found in the stored metadata, if any
    pub from_version: Option<String>,
    pub orphaned_markers: Vec<MarkerId>,
    pub orphaned_regions: Vec<RegionId>,
}

impl MigrationReport {
    pub fn upgraded(&self) -> bool {
        self.from_version.as_deref() != Some(SCHEMA_VERSION)
    }
}

#[derive(Debug, Clone)]
pub struct MigratedState {
    pub regions: Vec<Region>,
    pub markers: Vec<Marker>,
    pub owner_stats: HashMap<ActorId, OwnerStats>,
    pub meta: SystemMeta,
    pub report: MigrationReport,
}

pub fn migrate(raw: RawDocuments, default_lifetime: u32) -> MigratedState {
    let mut regions: Vec<Region> = raw
        .regions
        .into_iter()
        .map(|record| region_from_record(record, default_lifetime))
        .collect();
    let mut markers: Vec<Marker> = raw.markers.into_iter().map(marker_from_record).collect();
    let report_links = reconcile_links(&mut regions, &mut markers);

    let owner_stats = raw
        .owner_stats
        .into_iter()
        .map(|(actor, record)| (ActorId::from(actor), owner_stats_from_record(record)))
        .collect();

    let system = raw.system.unwrap_or_default();
    let next_region_id = next_counter(
        &regions,
        [system.next_area_id, raw.legacy_counter].into_iter().flatten(),
    );
    let meta = SystemMeta {
        version: SCHEMA_VERSION.to_string(),
        last_saved: system.last_saved.unwrap_or(0),
        region_count: regions.len() as u64,
        marker_count: markers.len() as u64,
        next_region_id,
        saved_at: system.saved_at,
    };

    MigratedState {
        regions,
        markers,
        owner_stats,
        meta,
        report: MigrationReport {
            from_version: system.version,
            ..report_links
        },
    }
}

/// Smallest counter value that cannot collide with any existing region id.
pub fn next_counter(regions: &[Region], stored: impl IntoIterator<Item = u64>) -> u64 {
    let above_existing = regions
        .iter()
        .filter_map(|region| region.id.counter())
        .max()
        .map_or(1, |max| max + 1);
    stored.into_iter().fold(above_existing, u64::max).max(1)
}

fn block_pos(point: PointRecord) -> BlockPos {
    WorldPos::new(point.x, point.y, point.z).floor()
}

fn dimension(raw: Option<String>) -> DimensionId {
    raw.map(DimensionId::new).unwrap_or_default()
}

fn region_from_record(record: RegionRecord, default_lifetime: u32) -> Region {
    let region = Region {
        id: RegionId::from(record.id),
        center: block_pos(record.center),
        dimension: dimension(record.dimension_id),
        owner_id: ActorId::from(record.player_id),
        owner_name: record.player_name,
        members: record
            .members
            .unwrap_or_default()
            .into_iter()
            .map(ActorId::from)
            .collect(),
        permanent: record.is_permanent.unwrap_or(true),
        ticks_remaining: record
            .ticks_remaining
            .map_or(default_lifetime, |ticks| {
                u32::try_from(ticks.max(0)).unwrap_or(u32::MAX)
            }),
        created_at: record.created_at.unwrap_or(0),
        show_visuals: record.show_particles.unwrap_or(true),
        pvp_allowed: record.pvp_enabled.unwrap_or(false),
        explosions_allowed: record.explosions_enabled.unwrap_or(false),
        marker_id: record.stone_id.map(MarkerId::from),
    };
    dedup_members(region)
}

/// Older data could list the owner or repeat a member.
fn dedup_members(mut region: Region) -> Region {
    let mut seen = HashSet::new();
    let owner = region.owner_id.clone();
    region
        .members
        .retain(|member| *member != owner && seen.insert(member.clone()));
    region
}

fn marker_from_record(record: MarkerRecord) -> Marker {
    Marker {
        id: MarkerId::from(record.id),
        location: block_pos(record.location),
        dimension: dimension(record.dimension_id),
        owner_id: ActorId::from(record.player_id),
        owner_name: record.player_name,
        region_id: record.area_id.map(RegionId::from),
        active: record.is_active.unwrap_or(true),
        placed_at: record.placed_at.unwrap_or(0),
    }
}

fn owner_stats_from_record(record: OwnerStatsRecord) -> OwnerStats {
    OwnerStats {
        total_regions: record.total_areas.unwrap_or(0),
        last_activity: record.last_activity.unwrap_or(0),
        regions_created: record
            .protections_created
            .unwrap_or_default()
            .into_iter()
            .map(RegionId::from)
            .collect(),
        markers_placed: record
            .stones_placed
            .unwrap_or_default()
            .into_iter()
            .map(MarkerId::from)
            .collect(),
    }
}

/// Orphan markers whose region is gone and regions whose marker is gone,
/// and point each region at the marker that links to it.
pub fn reconcile_links(regions: &mut [Region], markers: &mut [Marker]) -> MigrationReport {
    let mut report = MigrationReport::default();
    let region_ids: HashSet<RegionId> = regions.iter().map(|r| r.id.clone()).collect();

    for marker in markers.iter_mut() {
        let dangling = matches!(&marker.region_id, Some(id) if !region_ids.contains(id));
        if dangling {
            marker.orphan();
            report.orphaned_markers.push(marker.id.clone());
        }
    }

    // Back-references: region -> marker that claims it.
    let linked: HashMap<RegionId, MarkerId> = markers
        .iter()
        .filter_map(|m| m.region_id.clone().map(|region| (region, m.id.clone())))
        .collect();
    for region in regions.iter_mut() {
        match (linked.get(&region.id), &region.marker_id) {
            (Some(marker_id), Some(current)) if marker_id == current => {}
            (Some(marker_id), _) => region.marker_id = Some(marker_id.clone()),
            (None, Some(_)) => {
                region.marker_id = None;
                report.orphaned_regions.push(region.id.clone());
            }
            (None, None) => {}
        }
    }
    report
}
