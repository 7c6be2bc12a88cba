//! Player-facing texts.
//!
//! Colour codes follow the host's `§` formatting convention.

use terraclaim_domain::{ActorId, RegionId};

// =============================================================================
// Claims
// =============================================================================

pub fn claim_created(footprint: i32) -> Vec<String> {
    vec![
        "§aProtection area created!".to_string(),
        format!("§7Area size: {footprint}x{footprint} blocks"),
        "§aData saved - it persists after you leave the world!".to_string(),
    ]
}

pub fn already_claimed(owner_name: &str) -> String {
    format!("§eThis spot already belongs to the territory of {owner_name}. The block was placed as a normal block.")
}

pub fn claim_removed() -> Vec<String> {
    vec![
        "§cProtection area and protection marker removed!".to_string(),
        "§aChanges saved!".to_string(),
    ]
}

pub fn orphan_marker_removed() -> String {
    "§7Protection marker without an area removed.".to_string()
}

pub fn orphan_region_removed() -> String {
    "§cProtection area without a linked marker removed!".to_string()
}

pub fn claim_expired(region_id: &RegionId) -> Vec<String> {
    vec![
        format!(
            "§cYour protection area has expired! (id: {})",
            region_id.short(8)
        ),
        "§aChanges saved automatically".to_string(),
    ]
}

// =============================================================================
// Denials
// =============================================================================

pub fn place_denied(owner_name: &str) -> Vec<String> {
    vec![
        format!("§c🚫 You cannot place blocks in the territory of {owner_name}!"),
        "§7💡 Only the owner and members can build here".to_string(),
    ]
}

pub fn break_denied(owner_name: &str) -> Vec<String> {
    vec![
        format!("§cYou cannot break blocks in the territory of {owner_name}!"),
        "§7Only the owner and members can break blocks here".to_string(),
    ]
}

pub fn marker_break_denied(owner_name: &str) -> String {
    format!("§c🚫 You cannot break the protection marker of {owner_name}!")
}

pub fn entity_interaction_denied(target: &str, owner_name: &str) -> Vec<String> {
    vec![
        format!("§c🚫 You cannot interact with {target} in the territory of {owner_name}!"),
        "§7💡 Only the owner and members can interact here".to_string(),
    ]
}

pub fn block_interaction_denied(target: &str, owner_name: &str) -> Vec<String> {
    vec![
        format!("§c🚫 You cannot use {target} in the territory of {owner_name}!"),
        "§7💡 Only the owner and members can use this here".to_string(),
    ]
}

pub fn explosion_blocked() -> String {
    "§cAn explosion was prevented in this area!".to_string()
}

pub fn combat_victim_notice() -> String {
    "§c🛡 Combat is disabled in this area!".to_string()
}

pub fn combat_attacker_notice(owner_name: &str) -> Vec<String> {
    vec![
        "§c⚠ You cannot attack players in this area!".to_string(),
        format!("§7Combat in this area was disabled by {owner_name}"),
    ]
}

pub fn compensation_failed() -> String {
    "§c❌ Something went wrong while undoing your action.".to_string()
}

// =============================================================================
// Territory notifications
// =============================================================================

pub fn welcome_owner() -> Vec<String> {
    vec!["§aWelcome to your territory!".to_string()]
}

pub fn welcome_visitor(owner_name: &str) -> Vec<String> {
    vec![
        format!("§cYou entered the territory of §f{owner_name}"),
        "§7You cannot build or break blocks here".to_string(),
    ]
}

pub fn farewell_own() -> String {
    "§aYou left your own territory".to_string()
}

pub fn farewell_visitor(owner_name: &str) -> String {
    format!("§7You left the territory of §f{owner_name}")
}

pub fn indicator_owner(owner_name: &str) -> String {
    format!("§a🏠 Your territory §8| §bOwner:§d {owner_name}")
}

pub fn indicator_visitor(owner_name: &str) -> String {
    format!("§f⚠ Entered territory §8| §bOwner:§d {owner_name}")
}

// =============================================================================
// Inspection
// =============================================================================

pub fn not_region_owner(owner_name: &str, is_member: bool) -> Vec<String> {
    let mut lines = vec![
        "§c❌ You are not the owner of this area!".to_string(),
        format!("§7This area belongs to {owner_name}"),
    ];
    if is_member {
        lines.push("§a✓ You are a member of this area".to_string());
    }
    lines
}

pub fn marker_preview(footprint: i32) -> String {
    format!("§a🔍 Showing preview for protection area! §7({footprint}x{footprint} blocks)")
}

pub fn area_preview(footprint: i32) -> String {
    format!("§aShowing protection area preview! §7({footprint}x{footprint} area)")
}

pub fn claim_stats(total_regions: u32) -> String {
    format!("§7Your stats: protection areas created {total_regions} times")
}

pub fn settings_unavailable() -> String {
    "§c❌ Could not open the settings menu".to_string()
}

// =============================================================================
// Settings menu
// =============================================================================

pub const MENU_TITLE: &str = "§6Area settings";
pub const MENU_BODY: &str = "§fChoose the settings to manage";
pub const MENU_GENERAL: &str = "§aGeneral settings\n§8Visuals, PvP, explosions";
pub const MENU_MEMBERS: &str = "§bManage members\n§8Add/remove members";
pub const MENU_EXIT: &str = "§cExit";

pub const GENERAL_TITLE: &str = "§6General settings";
pub const TOGGLE_VISUALS: &str = "§aShow visuals";
pub const TOGGLE_PVP: &str = "§cEnable PvP";
pub const TOGGLE_EXPLOSIONS: &str = "§4Enable explosions";

pub const MEMBERS_TITLE: &str = "§6Manage members";
pub const MEMBERS_BODY: &str = "§fChoose an action";
pub const MEMBERS_LIST: &str = "§aList members\n§8Show all members";
pub const MEMBERS_ADD: &str = "§bAdd member\n§8Enter a player name";
pub const MEMBERS_REMOVE: &str = "§cRemove member\n§8Pick from the list";
pub const MEMBERS_BACK: &str = "§cBack";

pub const MEMBER_LIST_TITLE: &str = "§6Member list";
pub const MEMBER_LIST_OK: &str = "§aOK";
pub const MEMBER_LIST_BACK: &str = "§7Back";

pub const ADD_MEMBER_TITLE: &str = "§6Add member";
pub const ADD_MEMBER_LABEL: &str = "§fEnter a player name";
pub const ADD_MEMBER_PLACEHOLDER: &str = "Player name";

pub const REMOVE_MEMBER_TITLE: &str = "§6Remove member";
pub const REMOVE_MEMBER_BODY: &str = "§fChoose the member to remove";

pub fn menu_cancelled() -> String {
    "§7Settings menu cancelled".to_string()
}

pub fn menu_exited() -> String {
    "§7Left the settings menu".to_string()
}

pub fn general_cancelled() -> String {
    "§7General settings cancelled".to_string()
}

pub fn menu_failed() -> String {
    "§c❌ Something went wrong showing the menu".to_string()
}

pub fn no_members() -> String {
    "§7This area has no members".to_string()
}

pub fn no_members_to_remove() -> String {
    "§7There are no members to remove".to_string()
}

pub fn member_list_body(entries: &[String]) -> String {
    format!(
        "§fAll members §7({} total):\n{}",
        entries.len(),
        entries.join("\n")
    )
}

pub fn member_online(name: &str) -> String {
    format!("§a● {name} §7(online)")
}

pub fn member_offline(id: &ActorId) -> String {
    format!("§7○ ID: {} §7(offline)", id.short(8))
}

pub fn member_button(name: Option<&str>, id: &ActorId) -> String {
    match name {
        Some(name) => format!("§f{name}"),
        None => format!("§7ID: {}", id.short(8)),
    }
}

pub fn visuals_toggled(enabled: bool) -> String {
    if enabled {
        "§a✅ Visuals enabled".to_string()
    } else {
        "§c❌ Visuals disabled".to_string()
    }
}

pub fn pvp_toggled(enabled: bool) -> String {
    if enabled {
        "§c⚔ Combat enabled in this area".to_string()
    } else {
        "§a🛡 Combat disabled in this area".to_string()
    }
}

pub fn explosions_toggled(enabled: bool) -> String {
    if enabled {
        "§c💥 Explosions enabled in this area".to_string()
    } else {
        "§a🛡 Explosions disabled in this area".to_string()
    }
}

pub fn general_saved() -> String {
    "§a💾 General settings saved!".to_string()
}

pub fn member_name_missing() -> String {
    "§c❌ Please enter a player name".to_string()
}

pub fn cannot_add_self() -> String {
    "§c❌ You cannot add yourself as a member".to_string()
}

pub fn already_member(name: &str) -> String {
    format!("§e⚠ {name} is already a member")
}

pub fn member_added(name: &str) -> String {
    format!("§a✅ Added {name} as a member")
}

pub fn added_to_region(owner_name: &str) -> String {
    format!("§a🔔 You were added as a member in the territory of {owner_name}")
}

pub fn actor_not_found(name: &str) -> String {
    format!("§c❌ No player named {name} was found")
}

pub fn member_removed(name: Option<&str>, id: &ActorId) -> String {
    match name {
        Some(name) => format!("§c❌ Removed {name} from the members"),
        None => format!("§c❌ Removed member ID: {}", id.short(8)),
    }
}

pub fn removed_from_region(owner_name: &str) -> String {
    format!("§c🔔 You were removed from the territory of {owner_name}")
}

pub fn region_gone() -> String {
    "§c❌ This protection area no longer exists".to_string()
}
