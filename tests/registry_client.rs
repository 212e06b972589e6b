//! Integration tests for the registry client and query pipeline.
//!
//! These tests drive [`RegistryClient`] through a mock transport with canned
//! JSON bodies, verifying cache behaviour, error mapping, and the query
//! wrappers end to end without touching the network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use brutalist_registry_mcp::registry::client::TransportError;
use brutalist_registry_mcp::registry::{
    RegistryClient, RegistryError, RegistryTransport, ResponseCache, DEFAULT_TTL,
};

// =============================================================================
// Mock Transport
// =============================================================================

/// Transport serving canned bodies keyed by URL, counting every call.
///
/// URLs with no canned body answer 404.
struct MockTransport {
    responses: HashMap<String, Value>,
    calls: AtomicUsize,
}

impl MockTransport {
    fn new(responses: HashMap<String, Value>) -> Self {
        Self {
            responses,
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistryTransport for MockTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(url)
            .cloned()
            .ok_or(TransportError::NotFound)
    }
}

/// Transport that fails every call with a generic network error.
struct FailingTransport;

#[async_trait]
impl RegistryTransport for FailingTransport {
    async fn get_json(&self, _url: &str) -> Result<Value, TransportError> {
        Err(TransportError::Failed("connection refused".to_string()))
    }
}

// =============================================================================
// Fixtures
// =============================================================================

const BASE: &str = "https://registry.test/registry";

fn index_body() -> Value {
    json!({
        "name": "Brutalist Components",
        "description": "Raw, unapologetic UI components",
        "version": "1.2.0",
        "framework": "react",
        "baseUrl": BASE,
        "components": [
            {
                "name": "button",
                "title": "Button",
                "description": "A heavy bordered button",
                "type": "registry:ui",
                "categories": ["action"],
                "featured": true,
                "url": "/components/button"
            },
            {
                "name": "card",
                "title": "Card",
                "description": "A stark content card",
                "type": "registry:ui",
                "categories": ["display"],
                "featured": false,
                "url": "/components/card"
            }
        ],
        "categories": {
            "action": { "title": "Action", "description": "Things you press" },
            "display": { "title": "Display", "description": "Things you read" }
        },
        "meta": {
            "lastUpdated": "2026-08-01T00:00:00Z",
            "totalComponents": 2
        }
    })
}

fn button_body() -> Value {
    json!({
        "name": "button",
        "version": "1.0.0",
        "description": "A heavy bordered button",
        "files": [
            {
                "path": "components/ui/button.tsx",
                "type": "registry:ui",
                "language": "tsx",
                "content": "export function Button() {}"
            }
        ],
        "dependencies": ["clsx"],
        "categories": ["action"]
    })
}

fn client_with(
    responses: HashMap<String, Value>,
    ttl: Duration,
) -> RegistryClient<MockTransport> {
    RegistryClient::with_transport(
        MockTransport::new(responses),
        BASE,
        ResponseCache::new(ttl),
    )
}

fn index_responses() -> HashMap<String, Value> {
    HashMap::from([(format!("{BASE}/index.json"), index_body())])
}

// =============================================================================
// Cache Behaviour
// =============================================================================

#[tokio::test]
async fn test_index_served_from_cache_within_ttl() {
    let client = client_with(index_responses(), DEFAULT_TTL);

    let first = client.fetch_index().await.unwrap();
    let second = client.fetch_index().await.unwrap();

    assert_eq!(first.name, "Brutalist Components");
    assert_eq!(second.components.len(), 2);
    assert_eq!(client.transport().call_count(), 1);
}

#[tokio::test]
async fn test_index_refetched_once_stale() {
    // A zero TTL makes every cached entry immediately stale.
    let client = client_with(index_responses(), Duration::ZERO);

    client.fetch_index().await.unwrap();
    client.fetch_index().await.unwrap();

    assert_eq!(client.transport().call_count(), 2);
}

#[tokio::test]
async fn test_component_detail_cached_per_name() {
    let responses = HashMap::from([(format!("{BASE}/button.json"), button_body())]);
    let client = client_with(responses, DEFAULT_TTL);

    let first = client.fetch_component("button").await.unwrap();
    let second = client.fetch_component("button").await.unwrap();

    assert_eq!(first.name, "button");
    assert_eq!(second.files.len(), 1);
    assert_eq!(client.transport().call_count(), 1);
}

#[tokio::test]
async fn test_query_wrappers_share_the_cached_index() {
    let client = client_with(index_responses(), DEFAULT_TTL);

    let featured = client.featured_components().await.unwrap();
    let categories = client.categories().await.unwrap();
    let info = client.registry_info().await.unwrap();
    let search = client.search("but", Some("action"), Some(true)).await.unwrap();

    assert_eq!(featured.total, 1);
    assert_eq!(featured.components[0].name, "button");
    assert_eq!(categories.total, 2);
    assert_eq!(categories.categories["action"].count, 1);
    assert_eq!(info.stats.total_components, 2);
    assert_eq!(info.stats.featured_components, 1);
    assert_eq!(search.total, 1);
    assert_eq!(search.results[0].name, "button");

    // Four queries, one underlying index fetch.
    assert_eq!(client.transport().call_count(), 1);
}

// =============================================================================
// Error Mapping
// =============================================================================

#[tokio::test]
async fn test_missing_component_maps_to_not_found_naming_it() {
    let client = client_with(index_responses(), DEFAULT_TTL);

    let err = client.fetch_component("missing").await.unwrap_err();

    assert!(matches!(err, RegistryError::NotFound { ref name } if name == "missing"));
    assert!(err.to_string().contains("missing"));
}

#[tokio::test]
async fn test_missing_index_is_a_fetch_error() {
    // A 404 on the index has no component to name.
    let client = client_with(HashMap::new(), DEFAULT_TTL);

    let err = client.fetch_index().await.unwrap_err();

    assert!(matches!(err, RegistryError::Fetch { .. }));
}

#[tokio::test]
async fn test_network_failure_is_a_fetch_error() {
    let client = RegistryClient::with_transport(
        FailingTransport,
        BASE,
        ResponseCache::new(DEFAULT_TTL),
    );

    let err = client.fetch_index().await.unwrap_err();

    assert!(matches!(err, RegistryError::Fetch { .. }));
    assert!(err.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_wrong_shape_index_is_a_parse_error() {
    let responses = HashMap::from([(
        format!("{BASE}/index.json"),
        json!({ "name": "broken", "components": "not an array" }),
    )]);
    let client = client_with(responses, DEFAULT_TTL);

    let err = client.fetch_index().await.unwrap_err();

    assert!(matches!(err, RegistryError::Parse { .. }));
}

#[tokio::test]
async fn test_file_without_identifier_is_rejected_and_not_cached() {
    let responses = HashMap::from([(
        format!("{BASE}/anon.json"),
        json!({
            "name": "anon",
            "files": [{ "type": "registry:ui", "content": "" }]
        }),
    )]);
    let client = client_with(responses, DEFAULT_TTL);

    let first = client.fetch_component("anon").await.unwrap_err();
    let second = client.fetch_component("anon").await.unwrap_err();

    assert!(matches!(first, RegistryError::Parse { .. }));
    assert!(matches!(second, RegistryError::Parse { .. }));
    // Invalid bodies must not enter the cache, so both calls hit the wire.
    assert_eq!(client.transport().call_count(), 2);
}
