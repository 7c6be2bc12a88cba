//! Terraclaim Engine library.
//!
//! Territory claiming, access control and claim lifecycle on top of a game
//! host reached through ports.
//!
//! ## Structure
//!
//! - `stores/` - In-memory regions, markers, owner stats, deferred work, roster
//! - `use_cases/` - One struct per host event or scheduled job
//! - `infrastructure/` - Ports, persistence and configuration adapters
//! - `api/` - Host message dispatch and the JSON-lines bridge
//! - `app` - Service composition and the tick driver
//! - `messages` - Player-facing texts

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod messages;
pub mod stores;
pub mod use_cases;

/// Test fixtures module for scenario tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::{Ports, TerritoryService, TickReport};
