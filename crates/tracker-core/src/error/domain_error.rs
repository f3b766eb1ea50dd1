//! Domain error type
//!
//! What the repository and directory ports can fail with. A missing emoji
//! score is not an error anywhere in this crate; untracked emojis are a
//! normal skip outcome decided by the policy.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Directory error: {0}")]
    DirectoryError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::DirectoryError(_) => "DIRECTORY_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this maps to a 404 rather than a server failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::ChannelNotFound(_))
    }

    /// Whether this maps to a 400
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}
