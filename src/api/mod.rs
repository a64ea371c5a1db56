//! HTTP API handlers.
//!
//! Every successful response uses the `{ "success": true, "data": ... }`
//! envelope; failures come back through `AppError`'s `IntoResponse` impl
//! with the matching error envelope.

pub mod foods;
pub mod restaurants;
pub mod search;
pub mod stats;
pub mod vloggers;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Success response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Wrap a payload in the success envelope.
pub fn success<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data,
    })
}

/// Query parameter for ranking endpoints.
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// Default number of entries a ranking returns.
pub const DEFAULT_RANKING_LIMIT: usize = 5;
/// Upper bound on a caller-supplied ranking limit.
pub const MAX_RANKING_LIMIT: usize = 25;

/// Clamp a caller-supplied ranking limit to the allowed range.
pub fn clamp_limit(limit: Option<usize>) -> usize {
    limit
        .unwrap_or(DEFAULT_RANKING_LIMIT)
        .clamp(1, MAX_RANKING_LIMIT)
}
