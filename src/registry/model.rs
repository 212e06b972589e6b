//! Typed registry documents.
//!
//! The registry publishes two document shapes: an index (`index.json`) listing
//! every component, and one detail document per component (`{name}.json`).
//! Both are decoded into the immutable value types here at the trust boundary;
//! nothing past the registry client touches raw JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::RegistryError;

/// The registry index document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryIndex {
    /// Registry display name.
    pub name: String,
    /// Registry description.
    #[serde(default)]
    pub description: String,
    /// Registry version string.
    #[serde(default)]
    pub version: String,
    /// Target UI framework (e.g. "react").
    #[serde(default)]
    pub framework: String,
    /// Base URL the component detail documents hang off.
    #[serde(default)]
    pub base_url: String,
    /// Every published component, in curated order.
    pub components: Vec<ComponentSummary>,
    /// Category key to category metadata, in declaration order.
    ///
    /// Components reference these keys by name. The cross-reference is not
    /// validated; a component may list a key absent from this map.
    #[serde(default)]
    pub categories: IndexMap<String, CategoryInfo>,
    /// Optional registry metadata block.
    #[serde(default)]
    pub meta: Option<RegistryMeta>,
}

/// One component's entry in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSummary {
    /// Unique component key.
    pub name: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Registry item type (e.g. "registry:ui").
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Category keys this component belongs to.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Curation flag for highlighted components.
    #[serde(default)]
    pub featured: bool,
    /// URL of the component's detail document.
    #[serde(default)]
    pub url: String,
}

/// Metadata for one category key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInfo {
    /// Category display title.
    pub title: String,
    /// Category description.
    #[serde(default)]
    pub description: String,
}

/// Optional registry-level metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryMeta {
    /// ISO-8601 timestamp of the last registry update.
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Component count as published by the registry.
    #[serde(default)]
    pub total_components: Option<u64>,
    /// Registry maintainer.
    #[serde(default)]
    pub maintainer: Option<String>,
}

/// The full detail document for one component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDetail {
    /// Unique component key.
    pub name: String,
    /// Component version string.
    #[serde(default)]
    pub version: String,
    /// Component description.
    #[serde(default)]
    pub description: String,
    /// Source files that make up the component.
    #[serde(default)]
    pub files: Vec<ComponentFile>,
    /// Package dependencies, published as either a list or a name-to-version
    /// map depending on registry version.
    #[serde(default)]
    pub dependencies: Option<Dependencies>,
    /// Brutalist styling flags and theme.
    #[serde(default)]
    pub brutalist_features: Option<BrutalistFeatures>,
    /// Category keys, when the detail document repeats them.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Fields newer registry versions may add; carried through untouched.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ComponentDetail {
    /// Checks structural invariants the schema cannot express.
    ///
    /// Every file entry must carry at least one of `path`/`name`, otherwise
    /// the document is rejected as malformed.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] naming the offending file index.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for (i, file) in self.files.iter().enumerate() {
            if file.path.is_none() && file.name.is_none() {
                return Err(RegistryError::Parse {
                    message: format!(
                        "component '{}': files[{i}] has neither 'path' nor 'name'",
                        self.name
                    ),
                });
            }
        }
        Ok(())
    }
}

/// A single file within a component detail document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentFile {
    /// File path relative to the consumer's project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// File name, used by older registry versions instead of `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Registry file type (e.g. "registry:ui", "registry:example").
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Install target path override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Source language (e.g. "tsx", "css").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Verbatim file content.
    #[serde(default)]
    pub content: String,
}

impl ComponentFile {
    /// Returns the best available identifier for this file.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.path
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }
}

/// Dependencies as published by the registry: a bare list of package names,
/// or a package-to-version map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependencies {
    /// Plain list of package names.
    List(Vec<String>),
    /// Package name to version requirement.
    Map(IndexMap<String, String>),
}

impl Dependencies {
    /// Returns the dependency package names regardless of publication form.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        match self {
            Self::List(names) => names.clone(),
            Self::Map(map) => map.keys().cloned().collect(),
        }
    }
}

/// Brutalist styling block on a component detail document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrutalistFeatures {
    /// Theme name, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Boolean styling flags (hard shadows, thick borders, and so on).
    #[serde(flatten)]
    pub flags: IndexMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_index_json() -> Value {
        json!({
            "name": "brutalist-components",
            "description": "Neo-brutalist UI components",
            "version": "1.2.0",
            "framework": "react",
            "baseUrl": "https://brutalistcomponents.dev/registry",
            "components": [
                {
                    "name": "button",
                    "title": "Button",
                    "description": "A chunky button",
                    "type": "registry:ui",
                    "categories": ["action"],
                    "featured": true,
                    "url": "https://brutalistcomponents.dev/registry/button.json"
                }
            ],
            "categories": {
                "action": {"title": "Actions", "description": "Interactive elements"}
            },
            "meta": {
                "lastUpdated": "2026-08-01T00:00:00Z",
                "totalComponents": 1,
                "maintainer": "brutalist-components"
            }
        })
    }

    #[test]
    fn parse_index() {
        let index: RegistryIndex = serde_json::from_value(minimal_index_json()).unwrap();
        assert_eq!(index.name, "brutalist-components");
        assert_eq!(index.base_url, "https://brutalistcomponents.dev/registry");
        assert_eq!(index.components.len(), 1);
        assert_eq!(index.components[0].kind, "registry:ui");
        assert!(index.components[0].featured);
        assert_eq!(index.categories["action"].title, "Actions");
        assert_eq!(
            index.meta.unwrap().last_updated.as_deref(),
            Some("2026-08-01T00:00:00Z")
        );
    }

    #[test]
    fn index_missing_components_is_rejected() {
        let result: Result<RegistryIndex, _> =
            serde_json::from_value(json!({"name": "x", "categories": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn category_order_survives_round_trip() {
        let json = r#"{"name":"r","components":[],"categories":{
            "zeta":{"title":"Z"},"alpha":{"title":"A"},"mid":{"title":"M"}}}"#;
        let index: RegistryIndex = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = index.categories.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn parse_detail_with_list_dependencies() {
        let detail: ComponentDetail = serde_json::from_value(json!({
            "name": "button",
            "version": "1.0.0",
            "files": [{"path": "components/ui/button.tsx", "content": "export {}"}],
            "dependencies": ["class-variance-authority", "clsx"]
        }))
        .unwrap();
        assert!(detail.validate().is_ok());
        assert_eq!(
            detail.dependencies.unwrap().names(),
            vec!["class-variance-authority", "clsx"]
        );
    }

    #[test]
    fn parse_detail_with_map_dependencies() {
        let detail: ComponentDetail = serde_json::from_value(json!({
            "name": "dialog",
            "files": [{"name": "dialog.tsx", "content": ""}],
            "dependencies": {"@radix-ui/react-dialog": "^1.0.0"}
        }))
        .unwrap();
        assert_eq!(
            detail.dependencies.unwrap().names(),
            vec!["@radix-ui/react-dialog"]
        );
    }

    #[test]
    fn detail_file_without_path_or_name_fails_validation() {
        let detail: ComponentDetail = serde_json::from_value(json!({
            "name": "broken",
            "files": [{"content": "orphan"}]
        }))
        .unwrap();
        let err = detail.validate().unwrap_err();
        assert!(err.to_string().contains("files[0]"));
    }

    #[test]
    fn brutalist_features_keeps_flags_and_theme() {
        let detail: ComponentDetail = serde_json::from_value(json!({
            "name": "card",
            "files": [],
            "brutalistFeatures": {"theme": "concrete", "hardShadow": true, "thickBorder": true}
        }))
        .unwrap();
        let features = detail.brutalist_features.unwrap();
        assert_eq!(features.theme.as_deref(), Some("concrete"));
        assert_eq!(features.flags["hardShadow"], json!(true));
    }

    #[test]
    fn component_file_identifier_prefers_path() {
        let file = ComponentFile {
            path: Some("a/b.tsx".to_string()),
            name: Some("b.tsx".to_string()),
            kind: None,
            target: None,
            language: None,
            content: String::new(),
        };
        assert_eq!(file.identifier(), "a/b.tsx");
    }
}
