//! Protection settings value object
//!
//! Every tunable of the claim system lives here. Settings are serde-friendly
//! so the engine binary can build them from environment overrides, and every
//! field has a default so partial configuration stays valid.
//!
//! The footprint radius is not a setting: it is the global
//! [`PROTECTION_RADIUS`](crate::PROTECTION_RADIUS) constant.

use serde::{Deserialize, Serialize};

use crate::value_objects::{BlockType, EntityType, ItemType};

/// Default lifetime of a non-permanent claim, in ticks.
pub const DEFAULT_CLAIM_LIFETIME_TICKS: u32 = 2400;
/// Ticks between outline refreshes of a visible region.
pub const VISUAL_PERIOD_TICKS: u64 = 10;
/// Ticks between periodic on-screen indicator refreshes.
pub const NOTIFICATION_INTERVAL_TICKS: u64 = 60;

/// All configurable protection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProtectionSettings {
    // ============================================================================
    // Claiming
    // ============================================================================

    /// Block type that acts as the claim marker
    pub marker_block: BlockType,
    /// Whether new claims never expire
    pub claims_permanent: bool,
    /// Lifetime of a new non-permanent claim, in ticks
    pub claim_lifetime_ticks: u32,

    // ============================================================================
    // Cadence
    // ============================================================================
    pub visual_period_ticks: u64,
    pub notification_interval_ticks: u64,
    /// Delay between the world-ready signal and the initial load
    pub initial_load_delay_ticks: u64,

    // ============================================================================
    // Inspection
    // ============================================================================

    /// Item that opens the settings menu / preview when used
    pub settings_item: ItemType,
    /// Farthest block (from the actor) a settings-item target may be
    pub inspect_ray_distance: f64,
    /// Blocks above the anchor at which outline points are drawn
    pub visual_height_offset: i32,

    // ============================================================================
    // Protection policy
    // ============================================================================

    /// Horizontal radius around an explosion within which actors are told it was blocked
    pub explosion_notice_radius: f64,
    pub protected_entities: Vec<EntityType>,
    pub protected_blocks: Vec<BlockType>,
    /// Block interactions that stay allowed inside foreign claims (e.g. resting)
    pub allowed_blocks: Vec<BlockType>,
}

impl ProtectionSettings {
    pub fn is_marker_block(&self, block: &BlockType) -> bool {
        *block == self.marker_block
    }

    pub fn is_protected_entity(&self, entity: &EntityType) -> bool {
        self.protected_entities.contains(entity)
    }

    pub fn is_protected_block(&self, block: &BlockType) -> bool {
        self.protected_blocks.contains(block) && !self.allowed_blocks.contains(block)
    }

    /// Footprint edge length in blocks.
    pub fn footprint_size(&self) -> i32 {
        crate::PROTECTION_RADIUS * 2 + 1
    }
}

impl Default for ProtectionSettings {
    fn default() -> Self {
        Self {
            marker_block: BlockType::from("minecraft:diamond_block"),
            claims_permanent: true,
            claim_lifetime_ticks: DEFAULT_CLAIM_LIFETIME_TICKS,
            visual_period_ticks: VISUAL_PERIOD_TICKS,
            notification_interval_ticks: NOTIFICATION_INTERVAL_TICKS,
            initial_load_delay_ticks: 20,
            settings_item: ItemType::from("minecraft:book"),
            inspect_ray_distance: 5.0,
            visual_height_offset: 1,
            explosion_notice_radius: 10.0,
            protected_entities: namespaced(&[
                "villager",
                "horse",
                "donkey",
                "mule",
                "llama",
                "parrot",
                "wolf",
                "cat",
                "armor_stand",
                "item_frame",
                "painting",
                "minecart",
                "chest_minecart",
                "hopper_minecart",
                "boat",
                "chest_boat",
            ]),
            protected_blocks: namespaced(&[
                "chest",
                "barrel",
                "furnace",
                "blast_furnace",
                "smoker",
                "brewing_stand",
                "dispenser",
                "dropper",
                "hopper",
                "shulker_box",
                "trapped_chest",
                "beacon",
                "anvil",
                "crafting_table",
                "enchanting_table",
                "lever",
                "button",
                "door",
                "trapdoor",
                "fence_gate",
                "campfire",
                "soul_campfire",
                "composter",
                "jukebox",
                "noteblock",
                "respawn_anchor",
            ]),
            allowed_blocks: namespaced(&["bed"]),
        }
    }
}

fn namespaced<T: for<'a> From<&'a str>>(names: &[&str]) -> Vec<T> {
    names
        .iter()
        .map(|name| T::from(format!("minecraft:{name}").as_str()))
        .collect()
}
