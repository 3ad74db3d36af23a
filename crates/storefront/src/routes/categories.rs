//! Category route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::commerce::types::{Category, Product};
use crate::error::Result;
use crate::filters;
use crate::loaders::category::{self, category_key, keys, products_key, seo_show_key};
use crate::middleware::CspNonce;
use crate::seo::PageMeta;
use crate::state::AppState;

use super::products::{ImageView, ProductView};

/// Category display data for templates.
#[derive(Clone)]
pub struct CategoryView {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<ImageView>,
    pub count: i64,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            slug: category.slug.clone(),
            name: category.name.clone(),
            description: if category.description.is_empty() {
                None
            } else {
                Some(category.description.clone())
            },
            image: category.image.as_ref().map(|img| ImageView {
                url: img.url.clone(),
                alt: img.alt.clone().unwrap_or_else(|| category.name.clone()),
            }),
            count: category.count,
        }
    }
}

/// Category listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub meta: PageMeta,
    pub nonce: String,
    pub initial_data_script: String,
    pub categories: Vec<CategoryView>,
}

/// Single category page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/show.html")]
pub struct CategoryShowTemplate {
    pub meta: PageMeta,
    pub nonce: String,
    pub initial_data_script: String,
    pub category: CategoryView,
    pub products: Vec<ProductView>,
}

/// Category not-found template (soft 404).
#[derive(Template, WebTemplate)]
#[template(path = "categories/not_found.html")]
pub struct CategoryNotFoundTemplate {
    pub meta: PageMeta,
    pub nonce: String,
    pub initial_data_script: String,
    pub slug: String,
}

/// Display category listing page.
#[instrument(skip(state, nonce))]
pub async fn index(
    State(state): State<AppState>,
    CspNonce(nonce): CspNonce,
) -> Result<CategoriesIndexTemplate> {
    let bag = category::load_index(&state).await?;

    let meta: PageMeta = bag.require(keys::SEO_INDEX)?;
    let categories: Vec<Category> = bag.require(keys::ALL)?;
    let initial_data_script = bag.to_embed_script(&nonce)?;

    Ok(CategoriesIndexTemplate {
        meta,
        nonce,
        initial_data_script,
        categories: categories.iter().map(CategoryView::from).collect(),
    })
}

/// Display a single category with its products.
///
/// An unknown slug renders the not-found state with a 404 status.
#[instrument(skip(state, nonce))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    CspNonce(nonce): CspNonce,
) -> Result<Response> {
    let bag = category::load_show(&state, &slug).await?;
    let meta: PageMeta = bag.require(&seo_show_key(&slug))?;
    let initial_data_script = bag.to_embed_script(&nonce)?;

    match bag.get::<Category>(&category_key(&slug)) {
        Some(category) => {
            let products: Vec<Product> = bag.require(&products_key(&slug))?;
            Ok(CategoryShowTemplate {
                meta,
                nonce,
                initial_data_script,
                category: CategoryView::from(&category),
                products: products.iter().map(ProductView::from).collect(),
            }
            .into_response())
        }
        None => Ok((
            StatusCode::NOT_FOUND,
            CategoryNotFoundTemplate {
                meta,
                nonce,
                initial_data_script,
                slug,
            },
        )
            .into_response()),
    }
}
