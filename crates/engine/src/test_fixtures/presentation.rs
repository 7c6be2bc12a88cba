use std::sync::Mutex;

use terraclaim_domain::{ActorId, DimensionId, WorldPos};

use crate::infrastructure::ports::{PresentationError, PresentationPort};

/// One call made against the presentation port.
#[derive(Debug, Clone, PartialEq)]
pub enum Presented {
    Text { actor: ActorId, message: String },
    Display { actor: ActorId, message: Option<String> },
    Visuals { dimension: DimensionId, points: Vec<WorldPos> },
}

/// Records every presentation call in order.
#[derive(Debug, Default)]
pub struct RecordingPresentation {
    events: Mutex<Vec<Presented>>,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Presented> {
        self.events.lock().expect("presentation lock").clone()
    }

    pub fn texts_for(&self, actor: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Presented::Text { actor: to, message } if to.as_str() == actor => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn displays_for(&self, actor: &str) -> Vec<Option<String>> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Presented::Display { actor: to, message } if to.as_str() == actor => {
                    Some(message)
                }
                _ => None,
            })
            .collect()
    }

    pub fn visual_requests(&self) -> Vec<(DimensionId, Vec<WorldPos>)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Presented::Visuals { dimension, points } => Some((dimension, points)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Presented) {
        self.events.lock().expect("presentation lock").push(event);
    }
}

impl PresentationPort for RecordingPresentation {
    fn send_text(&self, actor: &ActorId, message: &str) -> Result<(), PresentationError> {
        self.push(Presented::Text {
            actor: actor.clone(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn set_persistent_display(
        &self,
        actor: &ActorId,
        message: Option<String>,
    ) -> Result<(), PresentationError> {
        self.push(Presented::Display {
            actor: actor.clone(),
            message,
        });
        Ok(())
    }

    fn request_visual_points(
        &self,
        dimension: &DimensionId,
        points: &[WorldPos],
    ) -> Result<(), PresentationError> {
        self.push(Presented::Visuals {
            dimension: dimension.clone(),
            points: points.to_vec(),
        });
        Ok(())
    }
}
