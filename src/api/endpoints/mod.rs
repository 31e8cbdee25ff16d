//! Route handlers.

pub mod download;
pub mod health;
pub mod pages;
pub mod result;
pub mod upload;

use crate::api::error::ApiError;

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Resource not found".into())
}
