//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use tracker_core::error::DomainError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(slack_id: &str) -> DomainError {
    DomainError::UserNotFound(slack_id.to_string())
}
