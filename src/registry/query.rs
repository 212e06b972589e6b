//! Query layer over a fetched registry index.
//!
//! Everything here is a pure function of an [`RegistryIndex`]; the async
//! wrappers on [`RegistryClient`] fetch the index first and therefore inherit
//! its failure modes unchanged (no retry, no partial results). Result order
//! always preserves the index's curated order; there is no ranking.

use indexmap::IndexMap;
use serde::Serialize;

use super::client::{RegistryClient, RegistryTransport};
use super::error::RegistryResult;
use super::model::{CategoryInfo, ComponentSummary, RegistryIndex};

/// Result of a component search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Matching components, index order preserved.
    pub results: Vec<ComponentSummary>,
    /// Number of matches.
    pub total: usize,
    /// The text query as given.
    pub query: String,
    /// The filters as given.
    pub filters: SearchFilters,
}

/// Optional search filters, echoed back in the response.
#[derive(Debug, Clone, Serialize)]
pub struct SearchFilters {
    /// Category key filter.
    pub category: Option<String>,
    /// Featured-flag filter.
    pub featured: Option<bool>,
}

/// Components belonging to one category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryComponentsResponse {
    /// The category key as given.
    pub category: String,
    /// Category metadata, `null` when the key is absent from the index's
    /// category map (even if components list the key).
    pub category_info: Option<CategoryInfo>,
    /// Components listing this category, index order preserved.
    pub components: Vec<ComponentSummary>,
    /// Number of components.
    pub total: usize,
}

/// Category metadata enriched with a component count.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    /// Category display title.
    pub title: String,
    /// Category description.
    pub description: String,
    /// Number of components listing this category key; zero is possible.
    pub count: usize,
}

/// All categories with component counts.
#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    /// Category key to metadata-with-count, map order preserved.
    pub categories: IndexMap<String, CategoryCount>,
    /// Number of categories.
    pub total: usize,
}

/// Curated (featured) components.
#[derive(Debug, Clone, Serialize)]
pub struct FeaturedResponse {
    /// Components with `featured: true`, index order preserved.
    pub components: Vec<ComponentSummary>,
    /// Number of featured components.
    pub total: usize,
}

/// Registry identity block for [`RegistryInfoResponse`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySummary {
    /// Registry name.
    pub name: String,
    /// Registry description.
    pub description: String,
    /// Registry version.
    pub version: String,
    /// Target framework.
    pub framework: String,
    /// Registry base URL.
    pub base_url: String,
}

/// Aggregate statistics for [`RegistryInfoResponse`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
    /// Total component count.
    pub total_components: usize,
    /// Featured component count.
    pub featured_components: usize,
    /// Category count.
    pub categories_count: usize,
    /// Last-updated timestamp, `null` when the index carries no metadata.
    pub last_updated: Option<String>,
}

/// Registry overview and statistics.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryInfoResponse {
    /// Registry identity.
    pub registry: RegistrySummary,
    /// Aggregate statistics.
    pub stats: RegistryStats,
}

/// Searches components by category, featured flag, and free text.
///
/// Filter order: category membership, then featured equality, then a
/// case-insensitive substring match on name/title/description. A blank or
/// all-whitespace query applies no text filter, so it matches everything the
/// earlier filters let through.
#[must_use]
pub fn search(
    index: &RegistryIndex,
    query: &str,
    category: Option<&str>,
    featured: Option<bool>,
) -> SearchResponse {
    let needle = query.trim().to_lowercase();

    let results: Vec<ComponentSummary> = index
        .components
        .iter()
        .filter(|c| category.map_or(true, |cat| c.categories.iter().any(|k| k == cat)))
        .filter(|c| featured.map_or(true, |f| c.featured == f))
        .filter(|c| {
            needle.is_empty()
                || c.name.to_lowercase().contains(&needle)
                || c.title.to_lowercase().contains(&needle)
                || c.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    SearchResponse {
        total: results.len(),
        results,
        query: query.to_string(),
        filters: SearchFilters {
            category: category.map(str::to_string),
            featured,
        },
    }
}

/// Returns the components listing `category`.
///
/// `category_info` is `null` when the key is absent from the index's category
/// map, regardless of how many components list it.
#[must_use]
pub fn components_by_category(index: &RegistryIndex, category: &str) -> CategoryComponentsResponse {
    let components: Vec<ComponentSummary> = index
        .components
        .iter()
        .filter(|c| c.categories.iter().any(|k| k == category))
        .cloned()
        .collect();

    CategoryComponentsResponse {
        category: category.to_string(),
        category_info: index.categories.get(category).cloned(),
        total: components.len(),
        components,
    }
}

/// Aggregates component counts per category key.
///
/// Categories with zero matching components still appear with `count: 0`.
#[must_use]
pub fn categories(index: &RegistryIndex) -> CategoriesResponse {
    let categories: IndexMap<String, CategoryCount> = index
        .categories
        .iter()
        .map(|(key, info)| {
            let count = index
                .components
                .iter()
                .filter(|c| c.categories.iter().any(|k| k == key))
                .count();
            (
                key.clone(),
                CategoryCount {
                    title: info.title.clone(),
                    description: info.description.clone(),
                    count,
                },
            )
        })
        .collect();

    CategoriesResponse {
        total: categories.len(),
        categories,
    }
}

/// Returns the featured components in index order.
#[must_use]
pub fn featured_components(index: &RegistryIndex) -> FeaturedResponse {
    let components: Vec<ComponentSummary> = index
        .components
        .iter()
        .filter(|c| c.featured)
        .cloned()
        .collect();

    FeaturedResponse {
        total: components.len(),
        components,
    }
}

/// Summarises the registry and its aggregate statistics.
#[must_use]
pub fn registry_info(index: &RegistryIndex) -> RegistryInfoResponse {
    RegistryInfoResponse {
        registry: RegistrySummary {
            name: index.name.clone(),
            description: index.description.clone(),
            version: index.version.clone(),
            framework: index.framework.clone(),
            base_url: index.base_url.clone(),
        },
        stats: RegistryStats {
            total_components: index.components.len(),
            featured_components: index.components.iter().filter(|c| c.featured).count(),
            categories_count: index.categories.len(),
            last_updated: index.meta.as_ref().and_then(|m| m.last_updated.clone()),
        },
    }
}

impl<T: RegistryTransport> RegistryClient<T> {
    /// Fetches the index and runs [`search`] over it.
    ///
    /// # Errors
    ///
    /// Propagates [`fetch_index`](RegistryClient::fetch_index) errors
    /// unchanged.
    pub async fn search(
        &self,
        query: &str,
        category: Option<&str>,
        featured: Option<bool>,
    ) -> RegistryResult<SearchResponse> {
        Ok(search(&self.fetch_index().await?, query, category, featured))
    }

    /// Fetches the index and runs [`components_by_category`] over it.
    ///
    /// # Errors
    ///
    /// Propagates [`fetch_index`](RegistryClient::fetch_index) errors
    /// unchanged.
    pub async fn components_by_category(
        &self,
        category: &str,
    ) -> RegistryResult<CategoryComponentsResponse> {
        Ok(components_by_category(&self.fetch_index().await?, category))
    }

    /// Fetches the index and runs [`categories`] over it.
    ///
    /// # Errors
    ///
    /// Propagates [`fetch_index`](RegistryClient::fetch_index) errors
    /// unchanged.
    pub async fn categories(&self) -> RegistryResult<CategoriesResponse> {
        Ok(categories(&self.fetch_index().await?))
    }

    /// Fetches the index and runs [`featured_components`] over it.
    ///
    /// # Errors
    ///
    /// Propagates [`fetch_index`](RegistryClient::fetch_index) errors
    /// unchanged.
    pub async fn featured_components(&self) -> RegistryResult<FeaturedResponse> {
        Ok(featured_components(&self.fetch_index().await?))
    }

    /// Fetches the index and runs [`registry_info`] over it.
    ///
    /// # Errors
    ///
    /// Propagates [`fetch_index`](RegistryClient::fetch_index) errors
    /// unchanged.
    pub async fn registry_info(&self) -> RegistryResult<RegistryInfoResponse> {
        Ok(registry_info(&self.fetch_index().await?))
    }
}
