//! Application-level error type
//!
//! The umbrella error for everything above the domain layer: configuration
//! loading, datastore connectivity, and domain errors on their way to an
//! HTTP response.

use thiserror::Error;

use tracker_core::DomainError;

/// Errors surfaced by the application layers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// HTTP status this error maps to
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => 500,
            Self::Domain(e) if e.is_not_found() => 404,
            Self::Domain(e) if e.is_validation() => 400,
            Self::Domain(_) => 500,
        }
    }

    /// Stable machine-readable code for response bodies
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
