//! Meta tags: the protocol's wire format.
//!
//! HTML documents are parsed with `scraper` into a tag tree; only `<meta>`
//! elements are kept, in document order.

use scraper::{Html, Selector};
use std::fmt;
use std::sync::OnceLock;

/// A `<meta>` element reduced to the attributes the protocol reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    /// `property` attribute, `None` when the element has none
    pub property: Option<String>,
    /// `content` attribute, `None` when the element has none
    pub content: Option<String>,
    /// Serialized element as found in the source document
    pub html: String,
}

impl MetaTag {
    /// Builds a tag from a property/content pair, serializing it the way
    /// [`render_meta`] would.
    pub fn new(property: impl Into<String>, content: impl Into<String>) -> Self {
        let property = property.into();
        let content = content.into();
        let html = render_meta(&property, &content);
        Self {
            property: Some(property),
            content: Some(content),
            html,
        }
    }

    /// Builds a tag that has a `property` but no `content` attribute.
    pub fn without_content(property: impl Into<String>) -> Self {
        let property = property.into();
        let html = format!("<meta property=\"{}\">", escape_html(&property));
        Self {
            property: Some(property),
            content: None,
            html,
        }
    }
}

impl fmt::Display for MetaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

fn meta_selector() -> &'static Selector {
    static META_SELECTOR: OnceLock<Selector> = OnceLock::new();
    META_SELECTOR.get_or_init(|| Selector::parse("meta").expect("static selector is valid"))
}

/// Collects every `<meta>` element of an HTML document in document order.
///
/// The HTML parser is error-tolerant, so this never fails; a document with
/// no meta tags yields an empty list.
pub fn extract_meta_tags(html: &str) -> Vec<MetaTag> {
    let document = Html::parse_document(html);
    document
        .select(meta_selector())
        .map(|element| {
            let attrs = element.value();
            MetaTag {
                property: attrs.attr("property").map(str::to_string),
                content: attrs.attr("content").map(str::to_string),
                html: element.html(),
            }
        })
        .collect()
}

/// Serializes a single property/content pair as a self-closing meta tag.
pub fn render_meta(property: &str, content: &str) -> String {
    format!(
        "<meta property=\"{}\" content=\"{}\"/>",
        escape_html(property),
        escape_html(content)
    )
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
