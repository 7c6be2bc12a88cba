//! Infrastructure layer - external dependency implementations.
//!
//! Contains:
//! - `ports` - trait definitions for external dependencies
//! - `persistence` - territory documents over the key-value port
//! - `key_value` - in-memory and file-backed key-value stores
//! - `clock` - wall-clock implementation
//! - `app_settings` - environment configuration

pub mod app_settings;
pub mod clock;
pub mod error;
pub mod key_value;
pub mod persistence;
pub mod ports;

pub use error::TerritoryError;
