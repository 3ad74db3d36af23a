//! Product-list (shop) page loader.
//!
//! Turns the page's free-form query string into backend filter parameters.
//! The fetch is two-phase by necessity: the category filter needs the
//! resolved category id, so categories (and SEO, which is independent) load
//! first and the filtered product page second. Do not "fix" this into a
//! single join - it cannot be fully parallelized without speculative
//! fetching.

use tracing::instrument;

use crate::commerce::types::Category;
use crate::commerce::{OrderBy, ProductFilters, SortOrder};
use crate::error::Result;
use crate::initial_data::InitialData;
use crate::seo::{meta, schema};
use crate::state::AppState;

/// Fixed key set this loader writes.
pub mod keys {
    /// Built page metadata for `/shop`.
    pub const SEO: &str = "seo:/shop";
    /// The filtered product page.
    pub const PRODUCTS: &str = "shop:products";
    /// Total matching products across all pages.
    pub const TOTAL: &str = "shop:total";
    /// The full category set (for the filter sidebar).
    pub const CATEGORIES: &str = "shop:categories";
    /// The resolved active category (null when none selected/matched).
    pub const ACTIVE_CATEGORY: &str = "shop:activeCategory";
}

/// Products per listing page.
pub const PAGE_SIZE: u32 = 12;

/// Recognized listing query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    /// Category slug to filter by.
    pub category: Option<String>,
    /// Sort token (see [`map_sort_token`]).
    pub orderby: Option<String>,
    /// Page number (1-based).
    pub page: Option<u32>,
}

/// Parse a free-form URL query string into the recognized parameters.
///
/// Unknown parameters are ignored; empty values count as absent.
#[must_use]
pub fn parse_query(raw: &str) -> ListingQuery {
    let mut query = ListingQuery::default();
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "category" => query.category = Some(value.into_owned()),
            "orderby" => query.orderby = Some(value.into_owned()),
            "page" => query.page = value.parse().ok(),
            _ => {}
        }
    }
    query
}

/// Map a sort token to the backend `{orderby, order}` pair.
///
/// The token set is closed; unknown or missing tokens default to newest
/// first (`date desc`).
#[must_use]
pub fn map_sort_token(token: Option<&str>) -> (OrderBy, SortOrder) {
    match token.unwrap_or_default() {
        "price-asc" => (OrderBy::Price, SortOrder::Asc),
        "price-desc" => (OrderBy::Price, SortOrder::Desc),
        "title-asc" => (OrderBy::Title, SortOrder::Asc),
        "title-desc" => (OrderBy::Title, SortOrder::Desc),
        "popularity" => (OrderBy::Popularity, SortOrder::Desc),
        "rating" => (OrderBy::Rating, SortOrder::Desc),
        _ => (OrderBy::Date, SortOrder::Desc),
    }
}

/// Resolve a category slug against the fetched category set.
///
/// Linear scan; the dataset is small, no index needed.
#[must_use]
pub fn resolve_category<'a>(categories: &'a [Category], slug: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.slug == slug)
}

/// Build the backend filters for a parsed query.
///
/// A category slug with no match in the set simply omits the category
/// filter.
fn build_filters(query: &ListingQuery, categories: &[Category]) -> ProductFilters {
    let (orderby, order) = map_sort_token(query.orderby.as_deref());

    let mut filters = ProductFilters::published()
        .per_page(PAGE_SIZE)
        .orderby(orderby)
        .order(order);

    if let Some(page) = query.page {
        filters = filters.page(page);
    }
    if let Some(category) = query
        .category
        .as_deref()
        .and_then(|slug| resolve_category(categories, slug))
    {
        filters = filters.category(category.id);
    }

    filters
}

/// Load the shop listing data bag for a raw query string.
///
/// # Errors
///
/// Propagates backend failures unmodified.
#[instrument(skip(state))]
pub async fn load(state: &AppState, raw_query: &str) -> Result<InitialData> {
    let query = parse_query(raw_query);

    // Phase 1: categories and SEO metadata are independent of each other
    let (categories, seo) = tokio::try_join!(
        state.catalog().get_categories(),
        state.seo().get_metadata_for_route("/shop"),
    )?;

    // Phase 2: the product fetch needs the resolved category id
    let filters = build_filters(&query, &categories);
    let page = state.catalog().get_products_with_meta(&filters).await?;

    let active_category = query
        .category
        .as_deref()
        .and_then(|slug| resolve_category(&categories, slug))
        .cloned();

    let site = state.site();
    let schemas = vec![schema::breadcrumb(site, &[("Home", "/"), ("Shop", "/shop")])];
    let page_meta = meta::build_page_meta(site, "/shop", Some("Shop"), seo, schemas);

    let mut bag = InitialData::new();
    bag.insert(keys::SEO, &page_meta)?;
    bag.insert(keys::PRODUCTS, &page.products)?;
    bag.insert(keys::TOTAL, &page.total)?;
    bag.insert(keys::CATEGORIES, &categories)?;
    bag.insert(keys::ACTIVE_CATEGORY, &active_category)?;
    Ok(bag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use padma_core::CategoryId;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: CategoryId::new(3),
                slug: "scarves".to_string(),
                name: "Scarves".to_string(),
                description: String::new(),
                image: None,
                count: 12,
            },
            Category {
                id: CategoryId::new(9),
                slug: "totes".to_string(),
                name: "Totes".to_string(),
                description: String::new(),
                image: None,
                count: 4,
            },
        ]
    }

    #[test]
    fn test_sort_token_table() {
        assert_eq!(
            map_sort_token(Some("price-asc")),
            (OrderBy::Price, SortOrder::Asc)
        );
        assert_eq!(
            map_sort_token(Some("price-desc")),
            (OrderBy::Price, SortOrder::Desc)
        );
        assert_eq!(
            map_sort_token(Some("title-asc")),
            (OrderBy::Title, SortOrder::Asc)
        );
        assert_eq!(
            map_sort_token(Some("title-desc")),
            (OrderBy::Title, SortOrder::Desc)
        );
        assert_eq!(
            map_sort_token(Some("popularity")),
            (OrderBy::Popularity, SortOrder::Desc)
        );
        assert_eq!(
            map_sort_token(Some("rating")),
            (OrderBy::Rating, SortOrder::Desc)
        );
        assert_eq!(
            map_sort_token(Some("date")),
            (OrderBy::Date, SortOrder::Desc)
        );
    }

    #[test]
    fn test_unknown_sort_tokens_default_to_date_desc() {
        assert_eq!(map_sort_token(None), (OrderBy::Date, SortOrder::Desc));
        assert_eq!(map_sort_token(Some("")), (OrderBy::Date, SortOrder::Desc));
        assert_eq!(
            map_sort_token(Some("cheapest")),
            (OrderBy::Date, SortOrder::Desc)
        );
        assert_eq!(
            map_sort_token(Some("PRICE-ASC")),
            (OrderBy::Date, SortOrder::Desc)
        );
    }

    #[test]
    fn test_parse_query_recognized_params() {
        let query = parse_query("category=scarves&orderby=price-asc&page=2&utm_source=mail");
        assert_eq!(
            query,
            ListingQuery {
                category: Some("scarves".to_string()),
                orderby: Some("price-asc".to_string()),
                page: Some(2),
            }
        );
    }

    #[test]
    fn test_parse_query_empty_values_are_absent() {
        let query = parse_query("category=&orderby=");
        assert_eq!(query, ListingQuery::default());
    }

    #[test]
    fn test_parse_query_decodes_percent_encoding() {
        let query = parse_query("category=hand%20loom");
        assert_eq!(query.category.as_deref(), Some("hand loom"));
    }

    #[test]
    fn test_resolve_category_by_slug() {
        let set = categories();
        assert_eq!(
            resolve_category(&set, "totes").map(|c| c.id),
            Some(CategoryId::new(9))
        );
        assert!(resolve_category(&set, "sarees").is_none());
    }

    #[test]
    fn test_build_filters_resolves_category_id() {
        let query = parse_query("category=scarves&orderby=popularity");
        let filters = build_filters(&query, &categories());
        assert_eq!(filters.category, Some(CategoryId::new(3)));
        assert_eq!(filters.orderby, Some(OrderBy::Popularity));
        assert_eq!(filters.order, Some(SortOrder::Desc));
        assert_eq!(filters.per_page, Some(PAGE_SIZE));
    }

    #[test]
    fn test_build_filters_omits_unknown_category() {
        let query = parse_query("category=sarees");
        let filters = build_filters(&query, &categories());
        assert_eq!(filters.category, None);
        // Unknown slug does not disturb the default sort
        assert_eq!(filters.orderby, Some(OrderBy::Date));
        assert_eq!(filters.order, Some(SortOrder::Desc));
    }
}
