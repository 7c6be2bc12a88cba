//! Best-effort presentation.
//!
//! A message that cannot be delivered never changes the outcome of the
//! action that produced it, so presentation failures stop here.

use std::sync::Arc;

use terraclaim_domain::{ActorId, DimensionId, WorldPos};

use crate::infrastructure::ports::PresentationPort;

#[derive(Clone)]
pub struct Notices {
    presentation: Arc<dyn PresentationPort>,
}

impl Notices {
    pub fn new(presentation: Arc<dyn PresentationPort>) -> Self {
        Self { presentation }
    }

    pub fn send(&self, actor: &ActorId, message: &str) {
        if let Err(e) = self.presentation.send_text(actor, message) {
            tracing::debug!(actor_id = %actor, error = %e, "Message not delivered");
        }
    }

    pub fn send_all(&self, actor: &ActorId, lines: &[String]) {
        for line in lines {
            self.send(actor, line);
        }
    }

    /// Set (or clear with `None`) the persistent on-screen line.
    pub fn display(&self, actor: &ActorId, message: Option<String>) -> bool {
        match self.presentation.set_persistent_display(actor, message) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(actor_id = %actor, error = %e, "Indicator not updated");
                false
            }
        }
    }

    pub fn visuals(&self, dimension: &DimensionId, points: &[WorldPos]) {
        if let Err(e) = self.presentation.request_visual_points(dimension, points) {
            tracing::debug!(dimension = %dimension, error = %e, "Visual request dropped");
        }
    }
}
