//! Static documentation catalog.
//!
//! A fixed table of documentation sections and item slugs, unrelated to the
//! registry's data. Search over it is a linear case-insensitive substring
//! scan; there is nothing to fetch and nothing to cache.

use serde::Serialize;

/// One documentation section with its item slugs.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DocSection {
    /// Section key.
    pub name: &'static str,
    /// Section display title.
    pub title: &'static str,
    /// Item slugs in this section.
    pub items: &'static [&'static str],
}

/// The fixed documentation catalog: guides, components, api.
pub const SECTIONS: &[DocSection] = &[
    DocSection {
        name: "guides",
        title: "Guides",
        items: &[
            "getting-started",
            "installation",
            "theming",
            "brutalist-principles",
            "accessibility",
        ],
    },
    DocSection {
        name: "components",
        title: "Components",
        items: &[
            "accordion",
            "alert-dialog",
            "button",
            "card",
            "checkbox",
            "dialog",
            "dropdown-menu",
            "input",
            "select",
            "tabs",
            "toast",
            "tooltip",
        ],
    },
    DocSection {
        name: "api",
        title: "API",
        items: &[
            "registry-index",
            "component-schema",
            "install-command",
            "mcp-tools",
        ],
    },
];

/// Returns the catalog itself.
#[must_use]
pub const fn sections() -> &'static [DocSection] {
    SECTIONS
}

/// Searches the catalog for `query`, optionally restricted to one section.
///
/// Case-insensitive substring match against section and item names; results
/// are `"section/item"` paths in catalog order.
#[must_use]
pub fn search_documentation(query: &str, section: Option<&str>) -> Vec<String> {
    let needle = query.trim().to_lowercase();

    SECTIONS
        .iter()
        .filter(|s| section.map_or(true, |wanted| s.name == wanted))
        .flat_map(|s| {
            s.items
                .iter()
                .filter(|item| {
                    needle.is_empty()
                        || item.to_lowercase().contains(&needle)
                        || s.name.contains(&needle)
                })
                .map(|item| format!("{}/{item}", s.name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_three_sections() {
        let names: Vec<_> = sections().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["guides", "components", "api"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let results = search_documentation("BUTTON", None);
        assert!(results.contains(&"components/button".to_string()));
    }

    #[test]
    fn search_matches_section_names_too() {
        let results = search_documentation("guides", None);
        assert_eq!(results.len(), SECTIONS[0].items.len());
    }

    #[test]
    fn section_filter_restricts_results() {
        let results = search_documentation("in", Some("guides"));
        assert!(results.iter().all(|r| r.starts_with("guides/")));
        assert!(results.contains(&"guides/installation".to_string()));
    }

    #[test]
    fn unknown_section_yields_nothing() {
        assert!(search_documentation("button", Some("nope")).is_empty());
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(search_documentation("zzzzz", None).is_empty());
    }

    #[test]
    fn blank_query_returns_whole_catalog() {
        let results = search_documentation("  ", None);
        let total: usize = SECTIONS.iter().map(|s| s.items.len()).sum();
        assert_eq!(results.len(), total);
    }
}
