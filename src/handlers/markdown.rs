// src/handlers/markdown.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::preview::{PreviewRequest, PreviewResponse},
    render::{Rendered, SafeRenderer},
};

/// Renders a Markdown description the way it will be displayed.
/// Never fails on the Markdown itself; only oversized payloads are rejected.
pub async fn preview(
    State(renderer): State<Arc<SafeRenderer>>,
    Json(payload): Json<PreviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Fallback text is raw user input; escape it before it goes out as HTML.
    let response = match renderer.render_detailed(payload.text.as_deref()) {
        Rendered::Html(html) => PreviewResponse {
            html,
            fallback: false,
        },
        Rendered::Fallback(text) => PreviewResponse {
            html: ammonia::clean_text(&text),
            fallback: true,
        },
    };

    Ok(Json(response))
}
