//! Service layer errors
//!
//! One error type for every service operation. "Not found" is a normal,
//! typed outcome of the read paths; write-unit failures arrive wrapped in
//! `DomainError` from the repositories.

use thiserror::Error;

use tracker_common::AppError;
use tracker_core::DomainError;

/// Error type shared by all services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// A typed "not found" for the given resource kind and external id
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) if e.is_not_found() => 404,
            Self::Domain(e) if e.is_validation() => 400,
            Self::Domain(_) | Self::Internal(_) => 500,
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
        }
    }

    /// Stable machine-readable code for response bodies
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("User", "U123");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "User not found: U123");
    }

    #[test]
    fn test_validation_error() {
        let err = ServiceError::validation("limit out of range");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_domain_error_passthrough() {
        let err = ServiceError::from(DomainError::ChannelNotFound("C1".to_string()));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "UNKNOWN_CHANNEL");
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError = ServiceError::not_found("Channel", "C456").into();
        assert_eq!(app_err.status_code(), 404);
    }
}
