use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO for rendering a Markdown preview.
#[derive(Debug, Deserialize, Validate)]
pub struct PreviewRequest {
    /// Markdown source. `null` or missing renders the placeholder.
    #[validate(length(max = 100000, message = "Text must be at most 100000 chars"))]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// Always safe to insert as HTML.
    pub html: String,
    /// Rendering failed and `html` is the escaped source text.
    pub fallback: bool,
}
