use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::Builder;

use crate::{error::RenderError, render::HtmlSanitizer};

/// Tags kept in rendered descriptions.
pub const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "em", "a", "code", "pre", "ul", "ol", "li", "blockquote", "h1", "h2",
    "h3", "h4", "h5", "h6", "del", "hr",
];

/// Attributes kept on any allowed tag.
pub const ALLOWED_ATTRIBUTES: &[&str] = &["href", "title", "rel", "target"];

/// Tags whose content is dropped along with the tag itself.
const CONTENT_STRIPPED_TAGS: &[&str] = &["script", "style"];

/// The allow-list used for every rendered description.
pub static DESCRIPTION_ALLOW_LIST: LazyLock<AllowList> =
    LazyLock::new(|| AllowList::new(ALLOWED_TAGS, ALLOWED_ATTRIBUTES));

/// Prebuilt cleaner for [`DESCRIPTION_ALLOW_LIST`], the list used on every render.
static DESCRIPTION_CLEANER: LazyLock<Builder<'static>> =
    LazyLock::new(|| AllowListSanitizer::builder(&DESCRIPTION_ALLOW_LIST));

/// Immutable set of permitted tag and attribute names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    tags: HashSet<&'static str>,
    attributes: HashSet<&'static str>,
}

impl AllowList {
    pub fn new(tags: &[&'static str], attributes: &[&'static str]) -> Self {
        Self {
            tags: tags.iter().copied().collect(),
            attributes: attributes.iter().copied().collect(),
        }
    }

    pub fn tags(&self) -> &HashSet<&'static str> {
        &self.tags
    }

    pub fn attributes(&self) -> &HashSet<&'static str> {
        &self.attributes
    }

    pub fn permits_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn permits_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }
}

/// Clean HTML content using the ammonia library.
///
/// This employs a whitelist-based sanitization strategy: only tags and
/// attributes on the given [`AllowList`] survive, everything else is stripped
/// rather than escaped.
///
/// Note:
/// 1. `<script>` and `<style>` are removed together with their content.
/// 2. `href` values still go through ammonia's URL scheme filter, so
///    `javascript:` links lose their target.
/// 3. When `rel` is allowed, author-supplied values are kept as-is and no
///    `rel` is injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowListSanitizer;

impl AllowListSanitizer {
    fn builder(allow: &AllowList) -> Builder<'static> {
        // ammonia panics if a content-stripped tag is also allowed.
        let clean_content: HashSet<&'static str> = CONTENT_STRIPPED_TAGS
            .iter()
            .copied()
            .filter(|tag| !allow.permits_tag(tag))
            .collect();

        let mut builder = Builder::default();
        builder
            .tags(allow.tags().clone())
            .clean_content_tags(clean_content)
            .tag_attributes(HashMap::new())
            .generic_attributes(allow.attributes().clone());

        // Same constraint for `rel`: ammonia refuses to both inject and allow it.
        if allow.permits_attribute("rel") {
            builder.link_rel(None);
        }

        builder
    }
}

impl HtmlSanitizer for AllowListSanitizer {
    fn sanitize(&self, html: &str, allow: &AllowList) -> Result<String, RenderError> {
        if *allow == *DESCRIPTION_ALLOW_LIST {
            return Ok(DESCRIPTION_CLEANER.clean(html).to_string());
        }
        Ok(Self::builder(allow).clean(html).to_string())
    }
}
