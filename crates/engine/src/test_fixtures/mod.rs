//! Hand-written fakes and helpers for engine tests.
//!
//! Mocks from `mockall` cover failure injection; the fakes here record what
//! the engine asked for so scenario tests can assert on the whole sequence.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{actor_at, RecordingPresentation};
//!
//! let presentation = Arc::new(RecordingPresentation::new());
//! // ... drive a use case
//! assert_eq!(presentation.texts_for("alice").len(), 3);
//! ```

mod forms;
mod presentation;
mod world;

pub use forms::ScriptedForms;
pub use presentation::{Presented, RecordingPresentation};
pub use world::ScriptedWorld;

use terraclaim_domain::{ActorId, DimensionId, WorldPos};

use crate::stores::ConnectedActor;

/// A connected overworld actor whose display name equals its id.
pub fn actor_at(id: &str, position: WorldPos) -> ConnectedActor {
    ConnectedActor {
        id: ActorId::from(id),
        name: id.to_string(),
        dimension: DimensionId::overworld(),
        position,
    }
}
