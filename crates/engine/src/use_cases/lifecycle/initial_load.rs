//! Deferred initial load.
//!
//! Runs once, a short delay after the host reports the world ready. Stored
//! claims are merged with any created earlier in the session and the
//! migrated documents are marked dirty so they are written back.

use std::sync::Arc;

use terraclaim_domain::{ProtectionSettings, SystemMeta};

use crate::infrastructure::persistence::migration::reconcile_links;
use crate::infrastructure::persistence::{MigrationReport, TerritoryRepository};
use crate::infrastructure::TerritoryError;
use crate::stores::TerritoryState;

pub struct InitialLoad {
    repository: Arc<TerritoryRepository>,
    settings: Arc<ProtectionSettings>,
}

impl InitialLoad {
    pub fn new(repository: Arc<TerritoryRepository>, settings: Arc<ProtectionSettings>) -> Self {
        Self {
            repository,
            settings,
        }
    }

    pub fn execute(
        &self,
        state: &mut TerritoryState,
        meta: &mut SystemMeta,
    ) -> Result<MigrationReport, TerritoryError> {
        let mut loaded = self.repository.load(self.settings.claim_lifetime_ticks)?;

        let renames = state
            .regions
            .restore(loaded.regions, loaded.meta.next_region_id);
        state.markers.restore(loaded.markers, &renames);
        state.owner_stats.restore(loaded.owner_stats, &renames);
        state.deferred.rename_regions(&renames);
        for (from, to) in &renames {
            tracing::warn!(from = %from, to = %to, "Session claim re-keyed after id collision");
        }

        let merged = reconcile_links(state.regions.all_mut(), state.markers.all_mut());
        loaded.report.orphaned_markers.extend(merged.orphaned_markers);
        loaded.report.orphaned_regions.extend(merged.orphaned_regions);

        *meta = loaded.meta;
        meta.next_region_id = state.regions.next_id();

        tracing::info!(
            regions = state.regions.len(),
            markers = state.markers.len(),
            from_version = ?loaded.report.from_version,
            orphaned_markers = loaded.report.orphaned_markers.len(),
            orphaned_regions = loaded.report.orphaned_regions.len(),
            "Territory state loaded"
        );
        Ok(loaded.report)
    }
}
