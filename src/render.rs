// src/render.rs

//! Markdown descriptions to display-safe HTML.
//!
//! [`SafeRenderer`] composes a [`MarkdownConverter`], an [`HtmlSanitizer`] and
//! a [`WarnLog`]. It always produces something displayable: sanitized HTML,
//! the [`NO_DESCRIPTION`] placeholder for blank input, or the raw input when
//! rendering fails.

use std::sync::{Arc, LazyLock};

use crate::{
    error::RenderError,
    utils::{
        html::{AllowList, AllowListSanitizer, DESCRIPTION_ALLOW_LIST},
        markdown::{Dialect, GfmConverter, MarkdownOptions},
    },
};

/// Returned for absent, empty or whitespace-only input.
pub const NO_DESCRIPTION: &str = "No description provided.";

/// Text to HTML.
pub trait MarkdownConverter: Send + Sync {
    fn to_html(&self, text: &str, dialect: Dialect) -> Result<String, RenderError>;
}

/// HTML to HTML restricted to an allow-list.
pub trait HtmlSanitizer: Send + Sync {
    fn sanitize(&self, html: &str, allow: &AllowList) -> Result<String, RenderError>;
}

/// Where render failures are reported.
pub trait WarnLog: Send + Sync {
    fn warn(&self, message: &str);
}

impl<T: WarnLog + ?Sized> WarnLog for Arc<T> {
    fn warn(&self, message: &str) {
        (**self).warn(message)
    }
}

/// Forwards warnings to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingWarnLog;

impl WarnLog for TracingWarnLog {
    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Outcome of [`SafeRenderer::render_detailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Sanitized HTML, or the [`NO_DESCRIPTION`] placeholder.
    Html(String),
    /// Rendering failed; the original text, unescaped.
    Fallback(String),
}

impl Rendered {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Rendered::Fallback(_))
    }

    pub fn into_string(self) -> String {
        match self {
            Rendered::Html(s) | Rendered::Fallback(s) => s,
        }
    }
}

pub struct SafeRenderer {
    converter: Box<dyn MarkdownConverter>,
    sanitizer: Box<dyn HtmlSanitizer>,
    log: Box<dyn WarnLog>,
    allow: &'static AllowList,
}

impl SafeRenderer {
    pub fn new<C, S, L>(converter: C, sanitizer: S, log: L) -> Self
    where
        C: MarkdownConverter + 'static,
        S: HtmlSanitizer + 'static,
        L: WarnLog + 'static,
    {
        Self {
            converter: Box::new(converter),
            sanitizer: Box::new(sanitizer),
            log: Box::new(log),
            allow: &DESCRIPTION_ALLOW_LIST,
        }
    }

    /// pulldown-cmark, ammonia and `tracing`.
    pub fn with_defaults(options: MarkdownOptions) -> Self {
        Self::new(GfmConverter::new(options), AllowListSanitizer, TracingWarnLog)
    }

    /// Renders `text` as sanitized HTML.
    ///
    /// Blank input yields [`NO_DESCRIPTION`]. If conversion or sanitization
    /// fails, a warning is logged and the original text is returned unchanged.
    pub fn render(&self, text: Option<&str>) -> String {
        self.render_detailed(text).into_string()
    }

    /// Like [`SafeRenderer::render`], but tells the caller whether the result
    /// is HTML or raw fallback text that still needs escaping.
    pub fn render_detailed(&self, text: Option<&str>) -> Rendered {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return Rendered::Html(NO_DESCRIPTION.to_string());
        };

        match self.try_render(text) {
            Ok(html) => Rendered::Html(html),
            Err(e) => {
                self.log.warn(&format!("Markdown render failed: {}", e));
                Rendered::Fallback(text.to_string())
            }
        }
    }

    fn try_render(&self, text: &str) -> Result<String, RenderError> {
        let html = self.converter.to_html(text, Dialect::Gfm)?;
        self.sanitizer.sanitize(&html, self.allow)
    }
}

impl Default for SafeRenderer {
    fn default() -> Self {
        Self::with_defaults(MarkdownOptions::default())
    }
}

static DEFAULT_RENDERER: LazyLock<SafeRenderer> = LazyLock::new(SafeRenderer::default);

/// [`SafeRenderer::render`] on a process-wide renderer with default options.
pub fn render_markdown(text: Option<&str>) -> String {
    DEFAULT_RENDERER.render(text)
}
