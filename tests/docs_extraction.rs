//! Integration tests for documentation extraction against real files.
//!
//! These tests write documentation pages to a temporary directory and drive
//! [`DocsExtractor`] end to end, including the special-case page names and
//! the never-fails fallback for absent pages.

use tempfile::TempDir;

use brutalist_registry_mcp::docs::DocsExtractor;

const BUTTON_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
<h1>Button</h1>
<p class="component-description">A heavy bordered button for decisive actions.</p>
<h2>Features</h2>
<ul>
  <li>Thick borders</li>
  <li>Hard shadows</li>
</ul>
<h2>Usage</h2>
<p>Import the component and drop it in.</p>
<pre><code class="language-tsx">&lt;Button&gt;Click me&lt;/Button&gt;</code></pre>
<h2>Accessibility</h2>
<ul class="keyboard-support">
  <li>Enter activates the button</li>
  <li>Space activates the button</li>
</ul>
<ul class="aria-attributes">
  <li>aria-disabled when disabled</li>
</ul>
</body>
</html>
"#;

const ALERT_DIALOG_PAGE: &str = r#"<html>
<body>
<h1>Alert Dialog</h1>
<p class="component-description">A modal that demands an answer.</p>
</body>
</html>
"#;

fn extractor_with_pages(pages: &[(&str, &str)]) -> (TempDir, DocsExtractor) {
    let dir = TempDir::new().unwrap();
    for (file, markup) in pages {
        std::fs::write(dir.path().join(file), markup).unwrap();
    }
    let extractor = DocsExtractor::new(dir.path());
    (dir, extractor)
}

#[tokio::test]
async fn test_extract_full_page() {
    let (_dir, extractor) = extractor_with_pages(&[("Button.html", BUTTON_PAGE)]);

    let record = extractor.extract("button").await;

    assert_eq!(record.title, "Button");
    assert_eq!(
        record.description,
        "A heavy bordered button for decisive actions."
    );
    assert!(record.content.contains("Features"));
    assert!(record.content.contains("Thick borders"));
    assert!(record.content.contains("Usage"));
    assert_eq!(record.examples, vec!["<Button>Click me</Button>"]);

    let accessibility = record.accessibility.expect("accessibility present");
    assert_eq!(
        accessibility.keyboard_support,
        vec!["Enter activates the button", "Space activates the button"]
    );
    assert_eq!(
        accessibility.aria_attributes,
        vec!["aria-disabled when disabled"]
    );
    assert!(accessibility.best_practices.is_empty());
    assert!(record.api_reference.is_none());
}

#[tokio::test]
async fn test_special_page_name_is_resolved() {
    let (_dir, extractor) = extractor_with_pages(&[("AlertDialog.html", ALERT_DIALOG_PAGE)]);

    let record = extractor.extract("alert-dialog").await;

    assert_eq!(record.title, "Alert Dialog");
    assert_eq!(record.description, "A modal that demands an answer.");
}

#[tokio::test]
async fn test_missing_page_yields_default_record() {
    let (_dir, extractor) = extractor_with_pages(&[]);

    let record = extractor.extract("toggle-switch").await;

    assert_eq!(record.title, "Toggle Switch");
    assert_eq!(record.description, "Toggle Switch component");
    assert!(record
        .content
        .contains("Documentation for Toggle Switch is not yet available."));
    assert!(record.examples.is_empty());
    assert!(record.accessibility.is_none());
}

#[tokio::test]
async fn test_unreadable_root_never_fails() {
    let extractor = DocsExtractor::new("/nonexistent/docs/root");

    let record = extractor.extract("button").await;

    assert_eq!(record.title, "Button");
    assert!(record.accessibility.is_none());
}
