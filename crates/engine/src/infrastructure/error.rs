//! Engine boundary error taxonomy.
//!
//! Every failure a handler can hit is folded into one of four kinds. The
//! dispatcher logs and absorbs them; none of them may stop the tick loop.

use terraclaim_domain::DomainError;
use thiserror::Error;

use super::ports::{FormError, PersistenceError, WorldError};

#[derive(Debug, Error)]
pub enum TerritoryError {
    /// Serialize/deserialize or store I/O failed. In-memory state carries on
    /// unpersisted until the next successful save.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] PersistenceError),

    /// A dimension or other host reference could not be resolved.
    #[error("Lookup failure: {0}")]
    Lookup(String),

    /// A deferred rollback could not be applied.
    #[error("Compensation failure: {0}")]
    Compensation(String),

    /// The form collaborator failed.
    #[error("Form interaction failure: {0}")]
    FormInteraction(#[from] FormError),

    /// A domain rule rejected the operation.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl TerritoryError {
    pub fn lookup(message: impl ToString) -> Self {
        Self::Lookup(message.to_string())
    }

    pub fn compensation(message: impl ToString) -> Self {
        Self::Compensation(message.to_string())
    }

    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Persistence(_) => "persistence",
            Self::Lookup(_) => "lookup",
            Self::Compensation(_) => "compensation",
            Self::FormInteraction(_) => "form_interaction",
            Self::Domain(_) => "domain",
        }
    }
}

impl From<WorldError> for TerritoryError {
    fn from(error: WorldError) -> Self {
        match error {
            WorldError::UnknownDimension(dimension) => Self::Lookup(dimension),
            other => Self::Compensation(other.to_string()),
        }
    }
}
