//! Best-effort extraction of component documentation from local doc pages.
//!
//! Documentation pages are semi-structured HTML kept next to the server (one
//! page per component). Extraction is a sequence of independent, best-effort
//! steps: each pattern that fails to match yields an empty or default value
//! for its field only, and a missing or unreadable page yields a mechanical
//! default record. Nothing in this module ever fails outward — documentation
//! absence must never abort the calling tool.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Normalised documentation for one component.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationRecord {
    /// Page title, derived from the component name when no page exists.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Prose content (description plus Features/Usage sections).
    pub content: String,
    /// Verbatim code examples.
    pub examples: Vec<String>,
    /// Accessibility notes, absent when the page carries none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<AccessibilityInfo>,
    /// Prop tables. Extraction is not implemented; this is always absent and
    /// callers treat absence as "no API docs".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_reference: Option<ApiReference>,
}

/// Accessibility notes scraped from a documentation page.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityInfo {
    /// Keyboard shortcuts and their effects.
    pub keyboard_support: Vec<String>,
    /// ARIA attributes the component uses.
    pub aria_attributes: Vec<String>,
    /// Usage recommendations.
    pub best_practices: Vec<String>,
}

impl AccessibilityInfo {
    fn is_empty(&self) -> bool {
        self.keyboard_support.is_empty()
            && self.aria_attributes.is_empty()
            && self.best_practices.is_empty()
    }
}

/// Component prop documentation. Declared for the record shape; never
/// produced (see [`DocumentationRecord::api_reference`]).
#[derive(Debug, Clone, Serialize)]
pub struct ApiReference {
    /// Documented props.
    pub props: Vec<PropDoc>,
}

/// One documented prop.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropDoc {
    /// Prop name.
    pub name: String,
    /// Prop type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Default value, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Prop description.
    pub description: String,
    /// Whether the prop is required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// Extracts documentation records from a local docs directory.
pub struct DocsExtractor {
    root: PathBuf,
    /// Names whose page file does not follow the capitalised-name convention.
    special_paths: HashMap<&'static str, &'static str>,
}

impl DocsExtractor {
    /// Creates an extractor rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        // Multi-word component names keep PascalCase page files, which the
        // single-capital fallback cannot derive.
        let special_paths: HashMap<&'static str, &'static str> = [
            ("alert-dialog", "AlertDialog.html"),
            ("dropdown-menu", "DropdownMenu.html"),
            ("icon-button", "IconButton.html"),
            ("radio-group", "RadioGroup.html"),
            ("scroll-area", "ScrollArea.html"),
        ]
        .into_iter()
        .collect();

        Self {
            root: root.into(),
            special_paths,
        }
    }

    /// Resolves the documentation page path for a component name.
    ///
    /// The special-case table wins; every other name falls back to the
    /// capitalised-name convention (`button` → `Button.html`).
    #[must_use]
    pub fn page_path(&self, name: &str) -> PathBuf {
        if let Some(relative) = self.special_paths.get(name) {
            return self.root.join(relative);
        }
        self.root.join(format!("{}.html", capitalise(name)))
    }

    /// Extracts the documentation record for `name`.
    ///
    /// Never fails: a missing or unreadable page yields a default record, and
    /// any individual pattern that does not match leaves only its own field
    /// empty.
    pub async fn extract(&self, name: &str) -> DocumentationRecord {
        let path = self.page_path(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(markup) => extract_from_markup(name, &markup),
            Err(e) => {
                tracing::debug!(
                    component = %name,
                    path = %path.display(),
                    error = %e,
                    "documentation page not readable, using default record"
                );
                default_record(name)
            }
        }
    }
}

/// Builds the mechanical fallback record for a name with no documentation.
#[must_use]
pub fn default_record(name: &str) -> DocumentationRecord {
    let title = title_from_name(name);
    DocumentationRecord {
        description: format!("{title} component"),
        content: format!("Documentation for {title} is not yet available."),
        title,
        examples: Vec::new(),
        accessibility: None,
        api_reference: None,
    }
}

/// Runs every extraction step over a documentation page.
#[must_use]
pub fn extract_from_markup(name: &str, markup: &str) -> DocumentationRecord {
    let fallback = default_record(name);

    let title = extract_title(markup).unwrap_or(fallback.title);
    let description = extract_description(markup).unwrap_or(fallback.description);

    let mut content_parts = vec![description.clone()];
    if let Some(features) = extract_section(markup, "Features") {
        content_parts.push(features);
    }
    if let Some(usage) = extract_section(markup, "Usage") {
        content_parts.push(usage);
    }
    let content = if content_parts.len() == 1 && extract_description(markup).is_none() {
        fallback.content
    } else {
        content_parts.join("\n\n")
    };

    let accessibility = AccessibilityInfo {
        keyboard_support: extract_classed_list(markup, "keyboard-support"),
        aria_attributes: extract_classed_list(markup, "aria-attributes"),
        best_practices: extract_classed_list(markup, "best-practices"),
    };

    DocumentationRecord {
        title,
        description,
        content,
        examples: extract_examples(markup),
        accessibility: if accessibility.is_empty() {
            None
        } else {
            Some(accessibility)
        },
        api_reference: extract_api_reference(markup),
    }
}

/// Title: the first top-level heading.
fn extract_title(markup: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?s)<h1[^>]*>(.*?)</h1>").unwrap());
    re.captures(markup)
        .map(|c| clean_text(c.get(1).map_or("", |m| m.as_str())))
        .filter(|t| !t.is_empty())
}

/// Description: the specifically-classed paragraph under the title.
fn extract_description(markup: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"(?s)<p[^>]*class="[^"]*component-description[^"]*"[^>]*>(.*?)</p>"#).unwrap()
    });
    re.captures(markup)
        .map(|c| clean_text(c.get(1).map_or("", |m| m.as_str())))
        .filter(|t| !t.is_empty())
}

/// A prose section anchored by its `<h2>` heading, up to the next heading.
fn extract_section(markup: &str, heading: &str) -> Option<String> {
    let pattern = format!(r"(?s)<h2[^>]*>\s*{}\s*</h2>(.*?)(?:<h2|\z)", regex::escape(heading));
    let re = Regex::new(&pattern).ok()?;
    re.captures(markup)
        .map(|c| clean_text(c.get(1).map_or("", |m| m.as_str())))
        .filter(|t| !t.is_empty())
        .map(|body| format!("{heading}\n{body}"))
}

/// Verbatim code blocks tagged as examples.
fn extract_examples(markup: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"(?s)<pre[^>]*>\s*<code[^>]*class="[^"]*language-tsx[^"]*"[^>]*>(.*?)</code>\s*</pre>"#)
            .unwrap()
    });
    re.captures_iter(markup)
        .map(|c| unescape(c.get(1).map_or("", |m| m.as_str()).trim()))
        .filter(|e| !e.is_empty())
        .collect()
}

/// List items from a specifically-classed `<ul>` container.
fn extract_classed_list(markup: &str, class: &str) -> Vec<String> {
    static ITEM_RE: OnceLock<Regex> = OnceLock::new();
    let pattern = format!(
        r#"(?s)<ul[^>]*class="[^"]*{}[^"]*"[^>]*>(.*?)</ul>"#,
        regex::escape(class)
    );
    let Ok(container_re) = Regex::new(&pattern) else {
        return Vec::new();
    };
    let Some(body) = container_re
        .captures(markup)
        .and_then(|c| c.get(1).map(|m| m.as_str().to_string()))
    else {
        return Vec::new();
    };

    let item_re = ITEM_RE.get_or_init(|| Regex::new(r"(?s)<li[^>]*>(.*?)</li>").unwrap());
    item_re
        .captures_iter(&body)
        .map(|c| clean_text(c.get(1).map_or("", |m| m.as_str())))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Prop-table extraction. Intentionally not implemented: the page format for
/// prop tables was never settled, so this always yields absent.
#[allow(clippy::missing_const_for_fn)]
fn extract_api_reference(_markup: &str) -> Option<ApiReference> {
    None
}

/// Strips markup tags, unescapes entities, and collapses whitespace.
fn clean_text(fragment: &str) -> String {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap());
    let without_tags = tag_re.replace_all(fragment, " ");
    unescape(&without_tags)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Undoes the HTML entity escaping used by the doc pages.
fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Derives a display title from a component name: `alert-dialog` becomes
/// `Alert Dialog`.
#[must_use]
pub fn title_from_name(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(capitalise)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-cases the first character of a word.
fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
