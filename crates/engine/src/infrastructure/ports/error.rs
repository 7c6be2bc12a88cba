//! Error types for port operations.

/// Key-value store failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PersistenceError {
    /// Store I/O failed - includes operation name for tracing.
    #[error("Store error in {operation} for key {key}: {message}")]
    Store {
        operation: &'static str,
        key: String,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error for key {key}: {message}")]
    Serialization { key: String, message: String },
}

impl PersistenceError {
    pub fn store(operation: &'static str, key: impl ToString, message: impl ToString) -> Self {
        Self::Store {
            operation,
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    pub fn serialization(key: impl ToString, message: impl ToString) -> Self {
        Self::Serialization {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

/// World mutation failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WorldError {
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),
    #[error("World mutation rejected: {0}")]
    Rejected(String),
    #[error("Host unavailable")]
    Unavailable,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PresentationError {
    #[error("Actor not connected: {0}")]
    ActorNotConnected(String),
    #[error("Host unavailable")]
    Unavailable,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum FormError {
    #[error("Form could not be shown: {0}")]
    ShowFailed(String),
    #[error("Form answer did not match the form: {0}")]
    InvalidResponse(String),
    #[error("Host unavailable")]
    Unavailable,
}
