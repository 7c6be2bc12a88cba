//! Terraclaim Protocol - wire types between a game host and the engine
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and serde_json
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - raw strings and plain coordinates in payloads

pub mod messages;

pub use messages::{
    ActorSnapshot, FormReply, FormSpec, HostCommand, HostMessage, TargetBlock, ToggleField,
    WireBlockPos, WirePos,
};
