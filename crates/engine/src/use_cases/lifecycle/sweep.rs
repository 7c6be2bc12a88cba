//! Per-tick region sweep.
//!
//! Walks the regions back to front so removal during the walk is safe:
//! 1. An expired region is removed together with its marker and the owner
//!    is told (when connected).
//! 2. A visible region whose cadence is due gets its outline drawn.
//! 3. A non-permanent region ages by one tick.

use std::sync::Arc;

use terraclaim_domain::{ProtectionSettings, RegionId};

use crate::messages;
use crate::stores::TerritoryState;
use crate::use_cases::{visuals, Notices};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub expired: Vec<RegionId>,
    pub outlines: usize,
}

pub struct LifecycleSweep {
    settings: Arc<ProtectionSettings>,
    notices: Notices,
}

impl LifecycleSweep {
    pub fn new(settings: Arc<ProtectionSettings>, notices: Notices) -> Self {
        Self { settings, notices }
    }

    pub fn execute(&self, state: &mut TerritoryState) -> SweepReport {
        let tick = state.current_tick;
        let mut report = SweepReport::default();

        for index in (0..state.regions.len()).rev() {
            let Some(region) = state.regions.get_index(index) else {
                continue;
            };

            if region.is_expired() {
                let region = state.regions.remove_index(index);
                if let Some(marker_id) = &region.marker_id {
                    state.markers.unbind(marker_id);
                }
                state.markers.orphan_links_to(&region.id);
                state.owner_stats.record_removal(
                    &region.owner_id,
                    &region.id,
                    region.marker_id.as_ref(),
                    tick,
                );
                if state.roster.is_connected(&region.owner_id) {
                    self.notices
                        .send_all(&region.owner_id, &messages::claim_expired(&region.id));
                }
                tracing::info!(
                    region_id = %region.id,
                    owner_id = %region.owner_id,
                    "Claim expired"
                );
                report.expired.push(region.id);
                continue;
            }

            if region.outline_due(tick, self.settings.visual_period_ticks) {
                let points = visuals::outline(region.center, self.settings.visual_height_offset);
                self.notices.visuals(&region.dimension, &points);
                report.outlines += 1;
            }

            if let Some(region) = state.regions.get_index_mut(index) {
                region.tick_down();
            }
        }

        if report.outlines > 0 {
            tracing::debug!(tick, outlines = report.outlines, "Outlines requested");
        }
        report
    }
}
