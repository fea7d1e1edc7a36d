// src/handlers/mod.rs

use axum::http::Uri;

use crate::error::AppError;

pub mod markdown;
pub mod pagination;

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
