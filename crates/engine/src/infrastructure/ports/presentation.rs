use terraclaim_domain::{ActorId, DimensionId, WorldPos};

use super::PresentationError;

/// Everything the engine shows to actors.
#[cfg_attr(test, mockall::automock)]
pub trait PresentationPort: Send + Sync {
    /// Chat-style message to one actor.
    fn send_text(&self, actor: &ActorId, message: &str) -> Result<(), PresentationError>;

    /// Persistent on-screen line. `None` clears it.
    fn set_persistent_display(
        &self,
        actor: &ActorId,
        message: Option<String>,
    ) -> Result<(), PresentationError>;

    /// Draw transient markers at the given points.
    fn request_visual_points(
        &self,
        dimension: &DimensionId,
        points: &[WorldPos],
    ) -> Result<(), PresentationError>;
}
