//! Host bridge message types
//!
//! One JSON object per line in each direction. The host sends
//! [`HostMessage`]s (world events, clock ticks, form answers) and the engine
//! answers with [`HostCommand`]s.
//!
//! ## Versioning Policy
//!
//! - New variants can be added at the end (forward compatible)
//! - Renaming variants is a breaking change
//! - Unknown inbound variants deserialize to `Unknown` and are ignored

use serde::{Deserialize, Serialize};

// =============================================================================
// Shared payload types
// =============================================================================

/// Continuous world coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WirePos {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Integer block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireBlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Snapshot of a connected actor at the time of the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub id: String,
    pub name: String,
    /// World partition id; unknown or missing ids fall back to the overworld
    #[serde(default)]
    pub dimension: Option<String>,
    pub position: WirePos,
}

/// A block reported by a host-side ray cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetBlock {
    pub block_type: String,
    pub location: WireBlockPos,
    #[serde(default)]
    pub dimension: Option<String>,
}

// =============================================================================
// Host Messages (Host → Engine)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    /// A block was placed (already applied by the host)
    BlockPlaced {
        actor: ActorSnapshot,
        block_type: String,
        location: WireBlockPos,
        #[serde(default)]
        dimension: Option<String>,
    },
    /// A block was broken (already applied by the host)
    BlockBroken {
        actor: ActorSnapshot,
        broken_type: String,
        location: WireBlockPos,
        #[serde(default)]
        dimension: Option<String>,
    },
    /// An explosion is about to happen; answered with `EventVerdict`
    Explosion {
        event_id: u64,
        origin: WirePos,
        #[serde(default)]
        dimension: Option<String>,
    },
    /// An actor is about to interact with an entity; answered with `EventVerdict`
    EntityInteraction {
        event_id: u64,
        actor: ActorSnapshot,
        target_type: String,
        #[serde(default)]
        target_position: Option<WirePos>,
    },
    /// An actor is about to interact with a block; answered with `EventVerdict`
    BlockInteraction {
        event_id: u64,
        actor: ActorSnapshot,
        block_type: String,
        location: WireBlockPos,
        #[serde(default)]
        dimension: Option<String>,
    },
    /// An actor took damage (already applied by the host)
    EntityDamaged {
        #[serde(default)]
        damager: Option<ActorSnapshot>,
        victim: ActorSnapshot,
        amount: f64,
    },
    /// An actor used an item
    ItemUsed {
        actor: ActorSnapshot,
        item_type: String,
        #[serde(default)]
        target: Option<TargetBlock>,
    },
    ActorDisconnected {
        actor_id: String,
    },
    /// The world finished loading
    WorldReady,
    /// Clock signal with the roster of connected actors
    Tick {
        tick: u64,
        #[serde(default)]
        actors: Vec<ActorSnapshot>,
    },
    /// Answer to a `ShowForm` command
    FormResponse {
        request_id: u64,
        reply: FormReply,
    },

    /// Unknown message type for forward compatibility
    #[serde(other)]
    Unknown,
}

/// An actor's answer to a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormReply {
    Selection { index: usize },
    Toggles { values: Vec<bool> },
    Text { value: String },
    Cancelled,
}

// =============================================================================
// Host Commands (Engine → Host)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    /// Answer to a cancelable event
    EventVerdict { event_id: u64, cancel: bool },
    SendText {
        actor_id: String,
        message: String,
    },
    /// Set (or clear, when `message` is `None`) the persistent on-screen line
    SetActionBar {
        actor_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    SpawnVisuals {
        dimension: String,
        points: Vec<WirePos>,
    },
    SetBlock {
        dimension: String,
        location: WireBlockPos,
        block_type: String,
    },
    GiveItem {
        actor_id: String,
        item_type: String,
        amount: u32,
    },
    RestoreHealth {
        actor_id: String,
    },
    ShowForm {
        request_id: u64,
        actor_id: String,
        form: FormSpec,
    },
}

/// Form layout the host renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormSpec {
    /// Button list; answered with `FormReply::Selection`
    Menu {
        title: String,
        body: String,
        buttons: Vec<String>,
    },
    /// Toggle list; answered with `FormReply::Toggles`
    Toggles {
        title: String,
        toggles: Vec<ToggleField>,
    },
    /// Single text field; answered with `FormReply::Text`
    TextInput {
        title: String,
        label: String,
        placeholder: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleField {
    pub label: String,
    pub value: bool,
}
