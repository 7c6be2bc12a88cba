//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Key-value persistence (host storage, files, memory)
//! - Presentation (chat text, on-screen line, visual markers)
//! - World mutation (blocks, items, health)
//! - Interactive forms
//! - Clock (for testing)

mod error;
mod forms;
mod persistence;
mod presentation;
mod testing;
mod world;

pub use error::{FormError, PersistenceError, PresentationError, WorldError};
pub use forms::{FormResponse, FormsPort, SelectionMenu, TextInputForm, ToggleForm};
pub use persistence::PersistencePort;
pub use presentation::PresentationPort;
pub use testing::ClockPort;
pub use world::WorldPort;

#[cfg(test)]
pub use forms::MockFormsPort;
#[cfg(test)]
pub use persistence::MockPersistencePort;
#[cfg(test)]
pub use presentation::MockPresentationPort;
#[cfg(test)]
pub use testing::MockClockPort;
#[cfg(test)]
pub use world::MockWorldPort;
