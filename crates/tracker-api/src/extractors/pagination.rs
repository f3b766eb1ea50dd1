//! Pagination extractors
//!
//! Extracts limit/offset pagination parameters from query strings. Two
//! flavors exist because the history endpoint allows a larger page size than
//! the listing endpoints.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::response::ApiError;

/// Default page size for history queries
const HISTORY_DEFAULT_LIMIT: i64 = 100;
/// Maximum page size for history queries
const HISTORY_MAX_LIMIT: i64 = 500;
/// Default page size for listing queries
const LIST_DEFAULT_LIMIT: i64 = 100;
/// Maximum page size for listing queries
const LIST_MAX_LIMIT: i64 = 500;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// Maximum number of items to return
    #[serde(default)]
    pub limit: Option<i64>,
    /// Number of items to skip
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Validated pagination for history endpoints (limit 1-500, default 100)
#[derive(Debug, Clone, Copy)]
pub struct HistoryPagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for HistoryPagination {
    fn default() -> Self {
        Self {
            limit: HISTORY_DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Validated pagination for listing endpoints (limit 1-500, default 100)
#[derive(Debug, Clone, Copy)]
pub struct ListPagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for ListPagination {
    fn default() -> Self {
        Self {
            limit: LIST_DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

fn clamp(params: PaginationParams, default_limit: i64, max_limit: i64) -> (i64, i64) {
    let limit = params.limit.unwrap_or(default_limit).clamp(1, max_limit);
    let offset = params.offset.unwrap_or(0).max(0);
    (limit, offset)
}

#[async_trait]
impl<S> FromRequestParts<S> for HistoryPagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        let (limit, offset) = clamp(params, HISTORY_DEFAULT_LIMIT, HISTORY_MAX_LIMIT);
        Ok(Self { limit, offset })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ListPagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        let (limit, offset) = clamp(params, LIST_DEFAULT_LIMIT, LIST_MAX_LIMIT);
        Ok(Self { limit, offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pagination() {
        let pagination = HistoryPagination::default();
        assert_eq!(pagination.limit, HISTORY_DEFAULT_LIMIT);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn test_limit_clamping() {
        let (limit, offset) = clamp(
            PaginationParams {
                limit: Some(9999),
                offset: Some(-3),
            },
            HISTORY_DEFAULT_LIMIT,
            HISTORY_MAX_LIMIT,
        );
        assert_eq!(limit, HISTORY_MAX_LIMIT);
        assert_eq!(offset, 0);

        let (limit, _) = clamp(
            PaginationParams {
                limit: Some(0),
                offset: None,
            },
            HISTORY_DEFAULT_LIMIT,
            HISTORY_MAX_LIMIT,
        );
        assert_eq!(limit, 1);
    }

    #[test]
    fn test_explicit_values_pass_through() {
        let (limit, offset) = clamp(
            PaginationParams {
                limit: Some(25),
                offset: Some(50),
            },
            LIST_DEFAULT_LIMIT,
            LIST_MAX_LIMIT,
        );
        assert_eq!(limit, 25);
        assert_eq!(offset, 50);
    }
}
