//! Region settings.
//!
//! The settings menu is a conversation with the actor over several forms,
//! answered asynchronously while ticks keep running. It is split in two:
//! - [`SettingsSession`] walks the forms against a snapshot of the region
//!   and only gathers input, yielding [`SettingsCommand`]s.
//! - [`ApplySettings`] applies those commands synchronously, after checking
//!   that the region still exists and the actor still owns it.

mod apply;
mod session;

pub use apply::ApplySettings;
pub use session::SettingsSession;

use terraclaim_domain::{ActorId, RegionId};

/// A change requested through the settings menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommand {
    SetToggles {
        show_visuals: bool,
        pvp_allowed: bool,
        explosions_allowed: bool,
    },
    /// Display name as typed; resolved against connected actors on apply.
    AddMember { name: String },
    RemoveMember { member: ActorId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    pub id: ActorId,
    /// Display name when the member is connected
    pub name: Option<String>,
}

/// Region state as it was when the menu was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSnapshot {
    pub owner_name: String,
    pub show_visuals: bool,
    pub pvp_allowed: bool,
    pub explosions_allowed: bool,
    pub members: Vec<MemberEntry>,
}

/// Everything a settings session needs, detached from the live state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRequest {
    pub actor: ActorId,
    pub region_id: RegionId,
    pub snapshot: RegionSnapshot,
}
