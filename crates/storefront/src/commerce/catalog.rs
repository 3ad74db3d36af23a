//! Catalog API client (products and categories).
//!
//! Thin wrapper over the backend's REST endpoints. No caching: results must
//! reflect the backend at request time, so every call is a fresh round trip.

use std::collections::BTreeMap;
use std::sync::Arc;

use padma_core::{CategoryId, ProductId, ProductStatus};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use tracing::instrument;

use crate::commerce::types::{Category, Product, ProductPage, RawCategory, RawProduct};
use crate::commerce::{CommerceError, api_error};
use crate::config::CommerceConfig;

/// Header carrying the total match count for paginated collections.
const TOTAL_HEADER: &str = "X-WP-Total";

/// Maximum page size the backend accepts for category listings.
const CATEGORY_PAGE_SIZE: u32 = 100;

// =============================================================================
// Filter Parameters
// =============================================================================

/// Sort field for product queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    Date,
    Price,
    Title,
    Popularity,
    Rating,
}

/// Sort direction for product queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filter parameters for product queries.
///
/// Serialized directly into query parameters. Recognized options are typed;
/// anything else can be passed through unvalidated via [`Self::extra`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orderby: Option<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_id_csv"
    )]
    pub include: Vec<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Unrecognized filters, passed through to the backend unvalidated.
    ///
    /// Appended as a second query-pair set rather than flattened: the query
    /// serializer cannot handle `#[serde(flatten)]` next to numeric fields.
    #[serde(skip)]
    pub extra: BTreeMap<String, String>,
}

impl ProductFilters {
    /// Filters for published products (the only status the storefront shows).
    #[must_use]
    pub fn published() -> Self {
        Self {
            status: Some(ProductStatus::Publish),
            ..Self::default()
        }
    }

    /// Set the page number.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Set the sort field.
    #[must_use]
    pub fn orderby(mut self, orderby: OrderBy) -> Self {
        self.orderby = Some(orderby);
        self
    }

    /// Set the sort direction.
    #[must_use]
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Restrict to a single category.
    #[must_use]
    pub fn category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }
}

/// Serialize a list of IDs as the comma-separated form the backend expects.
fn serialize_id_csv<S: Serializer>(ids: &[ProductId], serializer: S) -> Result<S::Ok, S::Error> {
    let csv = ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    serializer.serialize_str(&csv)
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the commerce backend's catalog endpoints.
///
/// Cheaply cloneable; holds the HTTP connection pool behind an `Arc`.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    api_url: String,
    credentials: Option<(String, SecretString)>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CommerceConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.trim_end_matches('/').to_string(),
                credentials: config
                    .consumer_key
                    .clone()
                    .zip(config.consumer_secret.clone()),
            }),
        }
    }

    /// Build a GET request for a catalog path, attaching the Basic auth
    /// header only when service credentials are configured.
    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{path}", self.inner.api_url);
        let request = self.inner.client.get(url);
        match &self.inner.credentials {
            Some((key, secret)) => request.basic_auth(key, Some(secret.expose_secret())),
            None => request,
        }
    }

    /// Send a request and map non-success statuses to [`CommerceError::Api`].
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, CommerceError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(response)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a page of products matching the filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        filters: &ProductFilters,
    ) -> Result<Vec<Product>, CommerceError> {
        let response = self
            .send(self.get("products").query(filters).query(&filters.extra))
            .await?;
        let raw = response.json::<Vec<RawProduct>>().await?;
        Ok(raw.into_iter().map(Product::from).collect())
    }

    /// Get a page of products plus the backend's total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products_with_meta(
        &self,
        filters: &ProductFilters,
    ) -> Result<ProductPage, CommerceError> {
        let response = self
            .send(self.get("products").query(filters).query(&filters.extra))
            .await?;

        let total = response
            .headers()
            .get(TOTAL_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);

        let raw = response.json::<Vec<RawProduct>>().await?;
        Ok(ProductPage {
            products: raw.into_iter().map(Product::from).collect(),
            total,
        })
    }

    /// Get a single product by its slug.
    ///
    /// Absence is a data value, not an error: the backend answers slug
    /// queries with an empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>, CommerceError> {
        let response = self
            .send(self.get("products").query(&[("slug", slug)]))
            .await?;
        let raw = response.json::<Vec<RawProduct>>().await?;
        Ok(raw.into_iter().next().map(Product::from))
    }

    /// Cheap connectivity probe for readiness checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or unhealthy.
    pub async fn ping(&self) -> Result<(), CommerceError> {
        self.send(self.get("products").query(&[("per_page", 1)]))
            .await
            .map(|_| ())
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// Get all product categories.
    ///
    /// The catalog is small enough that a single max-size page covers it.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, CommerceError> {
        let response = self
            .send(
                self.get("products/categories")
                    .query(&[("per_page", CATEGORY_PAGE_SIZE)]),
            )
            .await?;
        let raw = response.json::<Vec<RawCategory>>().await?;
        Ok(raw.into_iter().map(Category::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_serialize_empty() {
        let filters = ProductFilters::default();
        let value = serde_json::to_value(&filters).expect("serialize");
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn test_published_filters_carry_status() {
        let filters = ProductFilters::published();
        let value = serde_json::to_value(&filters).expect("serialize");
        assert_eq!(value, serde_json::json!({"status": "publish"}));
    }

    #[test]
    fn test_full_filters_serialize_expected_keys() {
        let filters = ProductFilters::published()
            .page(2)
            .per_page(12)
            .orderby(OrderBy::Popularity)
            .order(SortOrder::Desc)
            .category(CategoryId::new(9));
        let value = serde_json::to_value(&filters).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "page": 2,
                "per_page": 12,
                "status": "publish",
                "orderby": "popularity",
                "order": "desc",
                "category": 9,
            })
        );
    }

    #[test]
    fn test_include_serializes_as_csv() {
        let filters = ProductFilters {
            include: vec![ProductId::new(3), ProductId::new(7), ProductId::new(11)],
            ..ProductFilters::default()
        };
        let value = serde_json::to_value(&filters).expect("serialize");
        assert_eq!(value, serde_json::json!({"include": "3,7,11"}));
    }

    #[test]
    fn test_extra_filters_stay_out_of_typed_serialization() {
        let mut filters = ProductFilters::default();
        filters
            .extra
            .insert("featured".to_string(), "true".to_string());
        // The typed part serializes without the extras; the client appends
        // them as a second query-pair set
        let value = serde_json::to_value(&filters).expect("serialize");
        assert_eq!(value, serde_json::json!({}));
        assert_eq!(filters.extra.get("featured").map(String::as_str), Some("true"));
    }
}
