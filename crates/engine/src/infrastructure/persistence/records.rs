//! Persisted document shapes.
//!
//! Field names match documents written by earlier releases. Anything an
//! older release may have left out is an `Option`; defaults are applied in
//! one place, [`migrate`](super::migration::migrate), never at read sites.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use terraclaim_domain::{ActorId, BlockPos, Marker, OwnerStats, Region, SystemMeta};

/// Coordinates as stored. Legacy documents may hold fractional values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<BlockPos> for PointRecord {
    fn from(pos: BlockPos) -> Self {
        Self {
            x: f64::from(pos.x),
            y: f64::from(pos.y),
            z: f64::from(pos.z),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    pub id: String,
    pub center: PointRecord,
    pub player_id: String,
    #[serde(default)]
    pub player_name: String,
    pub ticks_remaining: Option<i64>,
    pub dimension_id: Option<String>,
    pub created_at: Option<u64>,
    pub is_permanent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stone_id: Option<String>,
    pub show_particles: Option<bool>,
    pub members: Option<Vec<String>>,
    pub pvp_enabled: Option<bool>,
    pub explosions_enabled: Option<bool>,
}

impl From<&Region> for RegionRecord {
    fn from(region: &Region) -> Self {
        Self {
            id: region.id.to_string(),
            center: region.center.into(),
            player_id: region.owner_id.to_string(),
            player_name: region.owner_name.clone(),
            ticks_remaining: Some(i64::from(region.ticks_remaining)),
            dimension_id: Some(region.dimension.to_string()),
            created_at: Some(region.created_at),
            is_permanent: Some(region.permanent),
            stone_id: region.marker_id.as_ref().map(ToString::to_string),
            show_particles: Some(region.show_visuals),
            members: Some(region.members.iter().map(ToString::to_string).collect()),
            pvp_enabled: Some(region.pvp_allowed),
            explosions_enabled: Some(region.explosions_allowed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerRecord {
    pub id: String,
    pub location: PointRecord,
    pub dimension_id: Option<String>,
    pub player_id: String,
    #[serde(default)]
    pub player_name: String,
    pub area_id: Option<String>,
    pub placed_at: Option<u64>,
    pub is_active: Option<bool>,
}

impl From<&Marker> for MarkerRecord {
    fn from(marker: &Marker) -> Self {
        Self {
            id: marker.id.to_string(),
            location: marker.location.into(),
            dimension_id: Some(marker.dimension.to_string()),
            player_id: marker.owner_id.to_string(),
            player_name: marker.owner_name.clone(),
            area_id: marker.region_id.as_ref().map(ToString::to_string),
            placed_at: Some(marker.placed_at),
            is_active: Some(marker.active),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerStatsRecord {
    pub total_areas: Option<u32>,
    pub last_activity: Option<u64>,
    pub protections_created: Option<Vec<String>>,
    pub stones_placed: Option<Vec<String>>,
}

impl From<&OwnerStats> for OwnerStatsRecord {
    fn from(stats: &OwnerStats) -> Self {
        Self {
            total_areas: Some(stats.total_regions),
            last_activity: Some(stats.last_activity),
            protections_created: Some(stats.regions_created.iter().map(ToString::to_string).collect()),
            stones_placed: Some(stats.markers_placed.iter().map(ToString::to_string).collect()),
        }
    }
}

/// Owner stats document, keyed by actor id. Ordered so saved output is stable.
pub type OwnerStatsDocument = BTreeMap<String, OwnerStatsRecord>;

pub fn owner_stats_document(stats: &HashMap<ActorId, OwnerStats>) -> OwnerStatsDocument {
    stats
        .iter()
        .map(|(actor, stats)| (actor.to_string(), OwnerStatsRecord::from(stats)))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfigRecord {
    pub version: Option<String>,
    pub last_saved: Option<u64>,
    pub total_areas_created: Option<u64>,
    pub total_stones_placed: Option<u64>,
    pub next_area_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl From<&SystemMeta> for SystemConfigRecord {
    fn from(meta: &SystemMeta) -> Self {
        Self {
            version: Some(meta.version.clone()),
            last_saved: Some(meta.last_saved),
            total_areas_created: Some(meta.region_count),
            total_stones_placed: Some(meta.marker_count),
            next_area_id: Some(meta.next_region_id),
            saved_at: meta.saved_at,
        }
    }
}
