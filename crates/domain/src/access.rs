//! Access control decisions
//!
//! Pure functions over (actor, region, action). They never look up regions
//! themselves: the caller resolves which region (if any) covers the affected
//! position and passes it in, so every rule here is testable without a store.
//!
//! A [`Verdict::Deny`] carries the owner's display name because every denial
//! notice names whose territory the actor ran into.

use crate::entities::{Marker, Region};
use crate::ids::ActorId;
use crate::value_objects::{BlockType, EntityType, ProtectionSettings};

/// Whether `actor` holds build rights in `region` (owner or member).
pub fn can_act(actor: &ActorId, region: &Region) -> bool {
    region.is_owner(actor) || region.is_member(actor)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny { owner_name: String },
}

impl Verdict {
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Deny { .. })
    }

    fn deny(region: &Region) -> Self {
        Self::Deny {
            owner_name: region.owner_name.clone(),
        }
    }
}

fn gate(actor: &ActorId, region: Option<&Region>) -> Verdict {
    match region {
        Some(region) if !can_act(actor, region) => Verdict::deny(region),
        _ => Verdict::Allow,
    }
}

/// Placing or breaking an ordinary block.
pub fn check_build(actor: &ActorId, region: Option<&Region>) -> Verdict {
    gate(actor, region)
}

/// Interacting with an entity. Only protected entity types are gated.
pub fn check_entity_interaction(
    actor: &ActorId,
    region: Option<&Region>,
    target: &EntityType,
    settings: &ProtectionSettings,
) -> Verdict {
    if !settings.is_protected_entity(target) {
        return Verdict::Allow;
    }
    gate(actor, region)
}

/// Interacting with a block. Only protected block types are gated; the
/// allow-list wins over the protected list.
pub fn check_block_interaction(
    actor: &ActorId,
    region: Option<&Region>,
    block: &BlockType,
    settings: &ProtectionSettings,
) -> Verdict {
    if !settings.is_protected_block(block) {
        return Verdict::Allow;
    }
    gate(actor, region)
}

/// Explosion whose origin lies in `region`.
pub fn check_explosion(region: Option<&Region>) -> Verdict {
    match region {
        Some(region) if !region.explosions_allowed => Verdict::deny(region),
        _ => Verdict::Allow,
    }
}

/// Actor-versus-actor damage where the victim stands in `region`.
///
/// Membership is irrelevant: the PvP toggle applies to everyone, the owner
/// included.
pub fn check_combat(region: Option<&Region>) -> Verdict {
    match region {
        Some(region) if !region.pvp_allowed => Verdict::deny(region),
        _ => Verdict::Allow,
    }
}

/// What breaking a marker-type block means.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerBreakDecision {
    /// Owner broke a linked marker: remove marker and region together.
    RemoveClaim,
    /// Owner broke a marker whose region is gone.
    RemoveOrphanMarker,
    /// Owner broke the anchor of a region whose marker record is gone.
    RemoveOrphanRegion,
    /// Someone else broke it: put the marker block back.
    Restore { owner_name: String },
    /// The block was never a marker; the ordinary break rule applies.
    NotAMarker,
}

/// Decide a marker-type block break from what the registries hold at that
/// position. `marker_region` is the region linked from `marker` (if it still
/// exists); `anchored_region` is a region whose centre is the broken block.
pub fn decide_marker_break(
    actor: &ActorId,
    marker: Option<&Marker>,
    marker_region: Option<&Region>,
    anchored_region: Option<&Region>,
) -> MarkerBreakDecision {
    match (marker, anchored_region) {
        (Some(marker), _) if marker.owner_id != *actor => MarkerBreakDecision::Restore {
            owner_name: marker.owner_name.clone(),
        },
        (Some(_), _) if marker_region.is_some() => MarkerBreakDecision::RemoveClaim,
        (Some(_), _) => MarkerBreakDecision::RemoveOrphanMarker,
        (None, Some(region)) if region.is_owner(actor) => MarkerBreakDecision::RemoveOrphanRegion,
        (None, Some(region)) => MarkerBreakDecision::Restore {
            owner_name: region.owner_name.clone(),
        },
        (None, None) => MarkerBreakDecision::NotAMarker,
    }
}
