//! brutalist-registry-mcp: MCP server for the brutalist UI component registry
//!
//! This library exposes a remote JSON registry of UI component metadata to AI
//! assistants as MCP tools and resources, with a best-effort HTML-scraping
//! fallback for component documentation.
//!
//! # Architecture
//!
//! Each exposed operation is a direct, single-hop translation: validate the
//! input shape, perform one (optionally cached) network fetch or local file
//! read, reshape the JSON, return it.
//!
//! - **Registry client**: fetches and validates the index and per-component
//!   detail documents through an in-memory TTL cache
//! - **Query layer**: pure filters and aggregations over a fetched index
//! - **Documentation extractor**: scrapes local doc pages, never fails outward
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`docs`] — Documentation extraction and the static catalog
//! - [`error`] — Error types
//! - [`mcp`] — MCP protocol implementation
//! - [`registry`] — Registry client, cache, and query layer

pub mod config;
pub mod docs;
pub mod error;
pub mod mcp;
pub mod registry;
