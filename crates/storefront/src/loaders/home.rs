//! Home page loader.

use tracing::instrument;

use crate::commerce::{OrderBy, ProductFilters, SortOrder};
use crate::error::Result;
use crate::initial_data::InitialData;
use crate::seo::{meta, schema};
use crate::state::AppState;

/// Fixed key set this loader writes.
pub mod keys {
    /// Built page metadata for `/`.
    pub const SEO: &str = "seo:/";
    /// Best-selling products, ordered by popularity.
    pub const BEST_SELLERS: &str = "home:bestSellers";
    /// Latest products, ordered by date descending.
    pub const ALL_PRODUCTS: &str = "home:allProducts";
}

/// Products per home-page strip.
pub const PAGE_SIZE: u32 = 10;

/// Load the home page data bag.
///
/// Fetches SEO metadata, best sellers, and latest products concurrently.
/// Either product fetch failing fails the whole load; SEO absence degrades
/// to site fallbacks.
///
/// # Errors
///
/// Propagates backend failures unmodified.
#[instrument(skip(state))]
pub async fn load(state: &AppState) -> Result<InitialData> {
    let best_sellers_filters = ProductFilters::published()
        .per_page(PAGE_SIZE)
        .orderby(OrderBy::Popularity)
        .order(SortOrder::Desc);
    let latest_filters = ProductFilters::published()
        .per_page(PAGE_SIZE)
        .orderby(OrderBy::Date)
        .order(SortOrder::Desc);

    let (seo, best_sellers, all_products) = tokio::try_join!(
        state.seo().get_metadata_for_route("/"),
        state.catalog().get_products(&best_sellers_filters),
        state.catalog().get_products(&latest_filters),
    )?;

    let site = state.site();
    let schemas = vec![schema::website(site), schema::organization(site)];
    let page_meta = meta::build_page_meta(site, "/", None, seo, schemas);

    let mut bag = InitialData::new();
    bag.insert(keys::SEO, &page_meta)?;
    bag.insert(keys::BEST_SELLERS, &best_sellers)?;
    bag.insert(keys::ALL_PRODUCTS, &all_products)?;
    Ok(bag)
}
