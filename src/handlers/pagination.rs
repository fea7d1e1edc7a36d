// src/handlers/pagination.rs

use axum::{Json, extract::Query, response::IntoResponse};

use crate::{
    error::AppError,
    pagination::{self, PageParams},
};

/// Resolves the requested page against the installed pagination defaults.
pub async fn page_settings(
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let resolved = params.resolve(&pagination::defaults())?;

    Ok(Json(resolved))
}
