use thiserror::Error;
use uuid::Uuid;

/// Error type covering boundary validation and the persistence adapters.
///
/// The computation engine itself never produces these; every variant is raised
/// while accepting writes, loading files, or dispatching notifications.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Subscription not found: {0}")]
    NotFound(Uuid),
    #[error("Notification failed: {0}")]
    Notification(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SubscriptionError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        SubscriptionError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn missing(field: &'static str) -> Self {
        Self::validation(field, "is required")
    }

    /// Name of the offending field for validation errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SubscriptionError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
