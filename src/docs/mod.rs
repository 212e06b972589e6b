//! Component documentation: best-effort page scraping and the static catalog.
//!
//! This path is independent of the registry client and its cache. Records are
//! built from a fresh file read on every call and documentation absence is
//! never an error.

pub mod catalog;
pub mod extractor;

pub use catalog::{search_documentation, sections, DocSection};
pub use extractor::{
    default_record, AccessibilityInfo, ApiReference, DocsExtractor, DocumentationRecord,
};
