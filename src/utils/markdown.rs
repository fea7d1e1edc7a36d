use pulldown_cmark::{Event, Options, Parser, html};

use crate::{error::RenderError, render::MarkdownConverter};

/// Markdown flavour handed to the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// GitHub-flavored Markdown: tables, strikethrough, task lists, footnotes.
    #[default]
    Gfm,
    CommonMark,
}

impl Dialect {
    fn parser_options(self) -> Options {
        match self {
            Dialect::Gfm => {
                Options::ENABLE_TABLES
                    | Options::ENABLE_STRIKETHROUGH
                    | Options::ENABLE_TASKLISTS
                    | Options::ENABLE_FOOTNOTES
            }
            Dialect::CommonMark => Options::empty(),
        }
    }
}

/// Tuning for [`GfmConverter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Inputs longer than this are rejected instead of parsed.
    pub max_input_bytes: usize,
    /// Render single newlines inside a paragraph as `<br />`, like GitHub comments.
    pub hard_wrap: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: 64 * 1024,
            hard_wrap: true,
        }
    }
}

/// Markdown to HTML through pulldown-cmark.
///
/// Raw HTML in the source is passed through untouched; callers are expected
/// to run the output through an [`crate::render::HtmlSanitizer`].
#[derive(Debug, Clone, Default)]
pub struct GfmConverter {
    options: MarkdownOptions,
}

impl GfmConverter {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }
}

impl MarkdownConverter for GfmConverter {
    fn to_html(&self, text: &str, dialect: Dialect) -> Result<String, RenderError> {
        if text.len() > self.options.max_input_bytes {
            return Err(RenderError::InputTooLarge {
                len: text.len(),
                max: self.options.max_input_bytes,
            });
        }

        let hard_wrap = self.options.hard_wrap;
        let parser = Parser::new_ext(text, dialect.parser_options()).map(|event| match event {
            Event::SoftBreak if hard_wrap => Event::HardBreak,
            other => other,
        });

        let mut output = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut output, parser);

        Ok(output)
    }
}
