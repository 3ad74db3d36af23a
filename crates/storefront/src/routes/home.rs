//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::commerce::types::Product;
use crate::error::Result;
use crate::filters;
use crate::loaders::home::{self, keys};
use crate::middleware::CspNonce;
use crate::seo::PageMeta;
use crate::state::AppState;

use super::products::ProductView;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub meta: PageMeta,
    pub nonce: String,
    pub initial_data_script: String,
    /// Best sellers strip (ordered by popularity).
    pub best_sellers: Vec<ProductView>,
    /// Latest products strip (ordered by date descending).
    pub latest_products: Vec<ProductView>,
}

/// Display the home page.
#[instrument(skip(state, nonce))]
pub async fn home(
    State(state): State<AppState>,
    CspNonce(nonce): CspNonce,
) -> Result<HomeTemplate> {
    let bag = home::load(&state).await?;

    let meta: PageMeta = bag.require(keys::SEO)?;
    let best_sellers: Vec<Product> = bag.require(keys::BEST_SELLERS)?;
    let latest_products: Vec<Product> = bag.require(keys::ALL_PRODUCTS)?;
    let initial_data_script = bag.to_embed_script(&nonce)?;

    Ok(HomeTemplate {
        meta,
        nonce,
        initial_data_script,
        best_sellers: best_sellers.iter().map(ProductView::from).collect(),
        latest_products: latest_products.iter().map(ProductView::from).collect(),
    })
}
