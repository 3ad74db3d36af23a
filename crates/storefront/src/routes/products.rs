//! Product-detail route handler and shared product view types.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use padma_core::{CurrencyCode, Price};
use tracing::instrument;

use crate::commerce::types::Product;
use crate::error::Result;
use crate::filters;
use crate::loaders::product::{self, product_key, seo_key};
use crate::middleware::CspNonce;
use crate::seo::PageMeta;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductView {
    /// Backend product id; the client cart/wishlist stores dedupe on it.
    pub id: i64,
    pub slug: String,
    pub name: String,
    /// Formatted display price.
    pub price: String,
    /// Formatted pre-sale price, only when the product is on sale.
    pub regular_price: Option<String>,
    pub image_url: String,
    pub image_alt: String,
    pub rating: Option<f64>,
}

/// Image display data for templates.
#[derive(Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// Format a backend decimal string for display, falling back to the raw
/// string when it does not parse.
fn format_price(raw: &str) -> String {
    Price::parse(raw, CurrencyCode::BDT).map_or_else(|_| raw.to_owned(), |p| p.to_string())
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let image_alt = product
            .images
            .first()
            .and_then(|img| img.alt.clone())
            .unwrap_or_else(|| product.name.clone());

        Self {
            id: product.id.as_i64(),
            slug: product.slug.clone(),
            name: product.name.clone(),
            price: product.display_price(),
            regular_price: product
                .on_sale()
                .then(|| format_price(&product.regular_price)),
            image_url: product.featured_image().to_owned(),
            image_alt,
            rating: product.average_rating,
        }
    }
}

/// Full product data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub price: String,
    pub regular_price: Option<String>,
    pub short_description: String,
    pub images: Vec<ImageView>,
    pub rating: Option<f64>,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        let card = ProductView::from(product);
        let images = if product.images.is_empty() {
            vec![ImageView {
                url: card.image_url.clone(),
                alt: card.image_alt.clone(),
            }]
        } else {
            product
                .images
                .iter()
                .map(|img| ImageView {
                    url: img.url.clone(),
                    alt: img.alt.clone().unwrap_or_else(|| product.name.clone()),
                })
                .collect()
        };

        Self {
            id: card.id,
            slug: card.slug,
            name: card.name,
            price: card.price,
            regular_price: card.regular_price,
            short_description: product.short_description.clone(),
            images,
            rating: card.rating,
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub meta: PageMeta,
    pub nonce: String,
    pub initial_data_script: String,
    pub product: ProductDetailView,
}

/// Product not-found template (soft 404).
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub meta: PageMeta,
    pub nonce: String,
    pub initial_data_script: String,
    pub slug: String,
}

/// Display product detail page.
///
/// An unknown slug renders the not-found state with a 404 status; no error
/// escapes for that case.
#[instrument(skip(state, nonce))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    CspNonce(nonce): CspNonce,
) -> Result<Response> {
    let bag = product::load(&state, &slug).await?;
    let meta: PageMeta = bag.require(&seo_key(&slug))?;
    let initial_data_script = bag.to_embed_script(&nonce)?;

    match bag.get::<Product>(&product_key(&slug)) {
        Some(product) => Ok(ProductShowTemplate {
            meta,
            nonce,
            initial_data_script,
            product: ProductDetailView::from(&product),
        }
        .into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            ProductNotFoundTemplate {
                meta,
                nonce,
                initial_data_script,
                slug,
            },
        )
            .into_response()),
    }
}
