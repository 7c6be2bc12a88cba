//! Region entity - an owned, square-footprint claim over world space
//!
//! A region protects every block whose horizontal coordinates lie within
//! [`PROTECTION_RADIUS`] of its centre. The vertical axis is unbounded: a
//! region covers an infinite column over its footprint.
//!
//! Regions are anchored by a [`Marker`](super::Marker); the link is a
//! relation kept consistent by the engine, not ownership.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{ActorId, DimensionId, MarkerId, RegionId};
use crate::value_objects::{BlockPos, WorldPos, DEFAULT_CLAIM_LIFETIME_TICKS};
use crate::PROTECTION_RADIUS;

/// A claimed region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: RegionId,
    pub center: BlockPos,
    pub dimension: DimensionId,

    // Ownership
    pub owner_id: ActorId,
    /// Owner display name cached at claim time (may be stale)
    pub owner_name: String,
    /// Actors with owner-equivalent rights; never contains the owner
    pub members: Vec<ActorId>,

    // Lifetime
    pub permanent: bool,
    /// Remaining lifetime in ticks; meaningless when `permanent`
    pub ticks_remaining: u32,
    pub created_at: u64,

    // Toggles
    pub show_visuals: bool,
    pub pvp_allowed: bool,
    pub explosions_allowed: bool,

    pub marker_id: Option<MarkerId>,
}

/// Everything needed to create a region except its id, which the region
/// store assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRegion {
    pub center: BlockPos,
    pub dimension: DimensionId,
    pub owner_id: ActorId,
    pub owner_name: String,
    pub permanent: bool,
    pub ticks_remaining: u32,
    pub created_at: u64,
    pub marker_id: Option<MarkerId>,
}

impl NewRegion {
    /// A permanent claim with default toggles.
    pub fn new(
        center: BlockPos,
        dimension: DimensionId,
        owner_id: ActorId,
        owner_name: impl Into<String>,
        created_at: u64,
    ) -> Self {
        Self {
            center,
            dimension,
            owner_id,
            owner_name: owner_name.into(),
            permanent: true,
            ticks_remaining: DEFAULT_CLAIM_LIFETIME_TICKS,
            created_at,
            marker_id: None,
        }
    }

    /// Make the claim expire after `ticks`.
    pub fn expiring_after(mut self, ticks: u32) -> Self {
        self.permanent = false;
        self.ticks_remaining = ticks;
        self
    }

    pub fn with_lifetime(mut self, permanent: bool, ticks: u32) -> Self {
        self.permanent = permanent;
        self.ticks_remaining = ticks;
        self
    }

    pub fn with_marker(mut self, marker_id: MarkerId) -> Self {
        self.marker_id = Some(marker_id);
        self
    }

    pub fn into_region(self, id: RegionId) -> Region {
        Region {
            id,
            center: self.center,
            dimension: self.dimension,
            owner_id: self.owner_id,
            owner_name: self.owner_name,
            members: Vec::new(),
            permanent: self.permanent,
            ticks_remaining: self.ticks_remaining,
            created_at: self.created_at,
            show_visuals: true,
            pvp_allowed: false,
            explosions_allowed: false,
            marker_id: self.marker_id,
        }
    }
}

impl Region {
    // =========================================================================
    // Geometry
    // =========================================================================

    /// Containment test: same dimension and horizontal Chebyshev distance to
    /// the centre within the radius. Height is ignored.
    pub fn contains(&self, dimension: &DimensionId, point: WorldPos) -> bool {
        let radius = f64::from(PROTECTION_RADIUS);
        *dimension == self.dimension
            && (point.x - f64::from(self.center.x)).abs() <= radius
            && (point.z - f64::from(self.center.z)).abs() <= radius
    }

    /// Whether the region is anchored at exactly this block.
    pub fn is_anchored_at(&self, dimension: &DimensionId, pos: BlockPos) -> bool {
        self.dimension == *dimension && self.center == pos
    }

    // =========================================================================
    // Ownership
    // =========================================================================

    pub fn is_owner(&self, actor: &ActorId) -> bool {
        self.owner_id == *actor
    }

    pub fn is_member(&self, actor: &ActorId) -> bool {
        self.members.contains(actor)
    }

    /// Grant owner-equivalent rights to `actor`.
    ///
    /// # Errors
    /// - `Constraint` if `actor` is the owner or already a member
    pub fn add_member(&mut self, actor: ActorId) -> Result<(), DomainError> {
        if self.is_owner(&actor) {
            return Err(DomainError::constraint("the owner cannot be added as a member"));
        }
        if self.is_member(&actor) {
            return Err(DomainError::constraint(format!(
                "{actor} is already a member of {}",
                self.id
            )));
        }
        self.members.push(actor);
        Ok(())
    }

    /// Revoke membership.
    ///
    /// # Errors
    /// - `NotFound` if `actor` is not a member
    pub fn remove_member(&mut self, actor: &ActorId) -> Result<(), DomainError> {
        let index = self
            .members
            .iter()
            .position(|member| member == actor)
            .ok_or_else(|| DomainError::not_found("Member", actor.as_str()))?;
        self.members.remove(index);
        Ok(())
    }

    // =========================================================================
    // Lifetime
    // =========================================================================

    pub fn is_expired(&self) -> bool {
        !self.permanent && self.ticks_remaining == 0
    }

    /// Age the claim by one tick. Permanent claims do not age.
    pub fn tick_down(&mut self) {
        if !self.permanent {
            self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
        }
    }

    /// Whether the outline is due this tick.
    ///
    /// Non-permanent claims pace the outline on their remaining lifetime;
    /// permanent claims never change that counter, so they pace on the
    /// current tick instead.
    pub fn outline_due(&self, current_tick: u64, period: u64) -> bool {
        if !self.show_visuals || period == 0 {
            return false;
        }
        let phase = if self.permanent {
            current_tick
        } else {
            u64::from(self.ticks_remaining)
        };
        phase % period == 0
    }
}
