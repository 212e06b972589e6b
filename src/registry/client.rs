//! Registry client: fetches and validates registry documents through the cache.
//!
//! The client owns the resolved base URL (fixed for the process lifetime), a
//! [`ResponseCache`], and a transport. The transport is a trait seam so tests
//! can substitute canned responses and count network calls; production uses
//! [`HttpTransport`] over `reqwest`.

use std::env;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::cache::ResponseCache;
use super::error::{RegistryError, RegistryResult};
use super::model::{ComponentDetail, RegistryIndex};

/// Cache key for the registry index document.
const INDEX_CACHE_KEY: &str = "registry-index";

/// Production registry endpoint.
pub const PRODUCTION_REGISTRY_URL: &str = "https://brutalistcomponents.dev/registry";

/// Development registry endpoint, selected by `BRUTALIST_ENV=development`.
pub const DEVELOPMENT_REGISTRY_URL: &str = "http://localhost:3000/registry";

/// Environment variable carrying an explicit base-URL override.
pub const REGISTRY_URL_ENV: &str = "BRUTALIST_REGISTRY_URL";

/// Environment variable selecting the runtime mode.
pub const RUNTIME_MODE_ENV: &str = "BRUTALIST_ENV";

/// Resolves the registry base URL once at startup.
///
/// Priority: explicit override (CLI/config), else the `BRUTALIST_REGISTRY_URL`
/// environment variable, else the development endpoint when
/// `BRUTALIST_ENV=development`, else the production default. Trailing slashes
/// are stripped so URL joining stays uniform.
#[must_use]
pub fn resolve_base_url(explicit: Option<&str>) -> String {
    let url = explicit.map_or_else(
        || {
            env::var(REGISTRY_URL_ENV).unwrap_or_else(|_| {
                let dev = env::var(RUNTIME_MODE_ENV)
                    .map(|v| v.eq_ignore_ascii_case("development"))
                    .unwrap_or(false);
                if dev {
                    DEVELOPMENT_REGISTRY_URL.to_string()
                } else {
                    PRODUCTION_REGISTRY_URL.to_string()
                }
            })
        },
        str::to_string,
    );
    url.trim_end_matches('/').to_string()
}

/// Transport-level failure classification.
///
/// Only the component fetch distinguishes not-found from generic failure;
/// the classification happens here so the client can map accordingly.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server responded 404.
    #[error("resource not found")]
    NotFound,
    /// The response body was not valid JSON.
    #[error("invalid JSON body: {0}")]
    Malformed(String),
    /// Any other transport failure (network, non-2xx, timeout).
    #[error("{0}")]
    Failed(String),
}

/// Performs a single JSON GET against the registry.
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    /// Fetches `url` and decodes the body as JSON.
    async fn get_json(&self, url: &str) -> Result<Value, TransportError>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a fresh HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegistryTransport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Failed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TransportError::NotFound);
        }
        if !status.is_success() {
            return Err(TransportError::Failed(format!(
                "registry returned HTTP {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

/// Client for the component registry.
pub struct RegistryClient<T: RegistryTransport = HttpTransport> {
    transport: T,
    cache: ResponseCache,
    base_url: String,
}

impl RegistryClient<HttpTransport> {
    /// Creates a production client against the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>, cache: ResponseCache) -> Self {
        Self::with_transport(HttpTransport::new(), base_url, cache)
    }
}

impl<T: RegistryTransport> RegistryClient<T> {
    /// Creates a client over an arbitrary transport.
    #[must_use]
    pub fn with_transport(transport: T, base_url: impl Into<String>, cache: ResponseCache) -> Self {
        Self {
            transport,
            cache,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the resolved base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches and validates the registry index, serving from cache while
    /// fresh.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Fetch`] on any transport failure (a 404 on the index
    /// is not distinguished), [`RegistryError::Parse`] on shape mismatch.
    pub async fn fetch_index(&self) -> RegistryResult<RegistryIndex> {
        if let Some(body) = self.cache.get(INDEX_CACHE_KEY) {
            tracing::trace!("registry index served from cache");
            return parse_index(body);
        }

        let url = format!("{}/index.json", self.base_url);
        tracing::debug!(url = %url, "fetching registry index");
        let body = self.get(&url, None).await?;
        let index = parse_index(body.clone())?;
        self.cache.insert(INDEX_CACHE_KEY, body);
        Ok(index)
    }

    /// Fetches and validates one component's detail document, serving from
    /// cache while fresh.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] naming the component on a 404,
    /// [`RegistryError::Fetch`] on other transport failures,
    /// [`RegistryError::Parse`] on shape mismatch (including a file entry
    /// with neither `path` nor `name`).
    pub async fn fetch_component(&self, name: &str) -> RegistryResult<ComponentDetail> {
        let key = format!("component-{name}");
        if let Some(body) = self.cache.get(&key) {
            tracing::trace!(component = %name, "component detail served from cache");
            return parse_detail(body);
        }

        let url = format!("{}/{name}.json", self.base_url);
        tracing::debug!(url = %url, component = %name, "fetching component detail");
        let body = self.get(&url, Some(name)).await?;
        let detail = parse_detail(body.clone())?;
        self.cache.insert(&key, body);
        Ok(detail)
    }

    /// Issues one transport GET, mapping transport failures to registry
    /// errors. `component` is set only for detail fetches, where a 404 has
    /// its own meaning.
    async fn get(&self, url: &str, component: Option<&str>) -> RegistryResult<Value> {
        self.transport.get_json(url).await.map_err(|e| match e {
            TransportError::NotFound => component.map_or_else(
                || RegistryError::Fetch {
                    message: "registry returned HTTP 404".to_string(),
                },
                |name| RegistryError::NotFound {
                    name: name.to_string(),
                },
            ),
            TransportError::Malformed(message) => RegistryError::Parse { message },
            TransportError::Failed(message) => RegistryError::Fetch { message },
        })
    }
}

fn parse_index(body: Value) -> RegistryResult<RegistryIndex> {
    serde_json::from_value(body).map_err(|e| RegistryError::Parse {
        message: e.to_string(),
    })
}

fn parse_detail(body: Value) -> RegistryResult<ComponentDetail> {
    let detail: ComponentDetail =
        serde_json::from_value(body).map_err(|e| RegistryError::Parse {
            message: e.to_string(),
        })?;
    detail.validate()?;
    Ok(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_wins() {
        let url = resolve_base_url(Some("https://example.test/registry/"));
        assert_eq!(url, "https://example.test/registry");
    }

    #[test]
    fn default_is_production() {
        // Explicit override absent and env untouched in the test runner.
        if env::var(REGISTRY_URL_ENV).is_err() && env::var(RUNTIME_MODE_ENV).is_err() {
            assert_eq!(resolve_base_url(None), PRODUCTION_REGISTRY_URL);
        }
    }

    #[test]
    fn client_strips_trailing_slash() {
        let client = RegistryClient::new("https://example.test/registry/", ResponseCache::default());
        assert_eq!(client.base_url(), "https://example.test/registry");
    }
}
