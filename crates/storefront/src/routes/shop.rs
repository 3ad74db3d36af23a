//! Shop (product listing) route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{RawQuery, State};
use tracing::instrument;

use crate::commerce::types::{Category, Product};
use crate::error::Result;
use crate::filters;
use crate::loaders::listing::{self, keys};
use crate::middleware::CspNonce;
use crate::seo::PageMeta;
use crate::state::AppState;

use super::categories::CategoryView;
use super::products::ProductView;

/// Sort options offered by the listing UI, as `(token, label)` pairs.
const SORT_OPTIONS: &[(&str, &str)] = &[
    ("date", "Newest"),
    ("popularity", "Best selling"),
    ("rating", "Top rated"),
    ("price-asc", "Price: low to high"),
    ("price-desc", "Price: high to low"),
    ("title-asc", "Name: A to Z"),
    ("title-desc", "Name: Z to A"),
];

/// Shop listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopIndexTemplate {
    pub meta: PageMeta,
    pub nonce: String,
    pub initial_data_script: String,
    pub products: Vec<ProductView>,
    pub categories: Vec<CategoryView>,
    pub active_category: Option<CategoryView>,
    /// Currently selected sort token.
    pub sort: String,
    pub sort_options: &'static [(&'static str, &'static str)],
    pub current_page: u32,
    pub total_pages: u64,
    pub total: u64,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_page: u32,
    pub next_page: u32,
}

/// Display the shop listing page.
///
/// The raw query string goes to the listing loader verbatim; the handler
/// only re-parses it for UI state (selected sort, current page).
#[instrument(skip(state, nonce))]
pub async fn index(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
    CspNonce(nonce): CspNonce,
) -> Result<ShopIndexTemplate> {
    let raw_query = raw_query.unwrap_or_default();
    let bag = listing::load(&state, &raw_query).await?;

    let meta: PageMeta = bag.require(keys::SEO)?;
    let products: Vec<Product> = bag.require(keys::PRODUCTS)?;
    let total: u64 = bag.require(keys::TOTAL)?;
    let categories: Vec<Category> = bag.require(keys::CATEGORIES)?;
    let active_category: Option<Category> = bag.get(keys::ACTIVE_CATEGORY);
    let initial_data_script = bag.to_embed_script(&nonce)?;

    let query = listing::parse_query(&raw_query);
    let sort = query.orderby.unwrap_or_else(|| "date".to_string());
    let current_page = query.page.unwrap_or(1).max(1);
    let total_pages = total.div_ceil(u64::from(listing::PAGE_SIZE)).max(1);
    let has_prev = current_page > 1;
    let has_next = u64::from(current_page) < total_pages;

    Ok(ShopIndexTemplate {
        meta,
        nonce,
        initial_data_script,
        products: products.iter().map(ProductView::from).collect(),
        categories: categories.iter().map(CategoryView::from).collect(),
        active_category: active_category.as_ref().map(CategoryView::from),
        sort,
        sort_options: SORT_OPTIONS,
        current_page,
        total_pages,
        total,
        has_prev,
        has_next,
        prev_page: current_page.saturating_sub(1),
        next_page: current_page.saturating_add(1),
    })
}
