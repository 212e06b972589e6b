//! Registry access: cache, typed documents, client, and query layer.
//!
//! The registry is the remote source of truth: one index document plus one
//! detail document per component. Control flow for every registry-backed tool
//! is the same single hop — consult the [`cache`], fetch and validate on a
//! miss, reshape, return. The [`query`] layer is pure given a fetched index.

pub mod cache;
pub mod client;
pub mod error;
pub mod model;
pub mod query;

pub use cache::{ResponseCache, DEFAULT_TTL};
pub use client::{resolve_base_url, HttpTransport, RegistryClient, RegistryTransport};
pub use error::{RegistryError, RegistryResult};
pub use model::{ComponentDetail, ComponentFile, ComponentSummary, RegistryIndex};
