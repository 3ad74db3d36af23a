//! Category-list and single-category page loaders.

use tracing::instrument;

use crate::commerce::ProductFilters;
use crate::error::Result;
use crate::initial_data::InitialData;
use crate::loaders::listing::resolve_category;
use crate::seo::{meta, schema};
use crate::state::AppState;

/// Fixed key set for the category index.
pub mod keys {
    /// Built page metadata for `/categories`.
    pub const SEO_INDEX: &str = "seo:/categories";
    /// The full category set.
    pub const ALL: &str = "categories:all";
}

/// Bag key for a single category (null sentinel when the slug is unknown).
#[must_use]
pub fn category_key(slug: &str) -> String {
    format!("category:{slug}")
}

/// Bag key for a single category's products.
#[must_use]
pub fn products_key(slug: &str) -> String {
    format!("category:{slug}:products")
}

/// Bag key for a single category's built page metadata.
#[must_use]
pub fn seo_show_key(slug: &str) -> String {
    format!("seo:/category/{slug}")
}

/// Products per category page.
pub const PAGE_SIZE: u32 = 12;

/// Load the category index data bag.
///
/// # Errors
///
/// Propagates backend failures unmodified.
#[instrument(skip(state))]
pub async fn load_index(state: &AppState) -> Result<InitialData> {
    let (categories, seo) = tokio::try_join!(
        state.catalog().get_categories(),
        state.seo().get_metadata_for_route("/categories"),
    )?;

    let site = state.site();
    let schemas = vec![schema::breadcrumb(
        site,
        &[("Home", "/"), ("Categories", "/categories")],
    )];
    let page_meta = meta::build_page_meta(site, "/categories", Some("Categories"), seo, schemas);

    let mut bag = InitialData::new();
    bag.insert(keys::SEO_INDEX, &page_meta)?;
    bag.insert(keys::ALL, &categories)?;
    Ok(bag)
}

/// Load a single category's data bag.
///
/// Resolves the slug against the full category set. An unknown slug fails
/// soft: the bag carries a null sentinel under [`category_key`] and no
/// product fetch happens.
///
/// # Errors
///
/// Propagates backend failures unmodified.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn load_show(state: &AppState, slug: &str) -> Result<InitialData> {
    let path = format!("/category/{slug}");

    let (categories, seo) = tokio::try_join!(
        state.catalog().get_categories(),
        state.seo().get_metadata_for_route(&path),
    )?;

    let site = state.site();
    let mut bag = InitialData::new();

    let Some(category) = resolve_category(&categories, slug).cloned() else {
        let page_meta = meta::build_page_meta(site, &path, None, seo, Vec::new());
        bag.insert_null(category_key(slug));
        bag.insert(seo_show_key(slug), &page_meta)?;
        return Ok(bag);
    };

    let filters = ProductFilters::published()
        .per_page(PAGE_SIZE)
        .category(category.id);
    let products = state.catalog().get_products(&filters).await?;

    let schemas = vec![
        schema::breadcrumb(
            site,
            &[
                ("Home", "/"),
                ("Categories", "/categories"),
                (category.name.as_str(), path.as_str()),
            ],
        ),
        schema::collection_page(site, &category),
    ];
    let page_meta = meta::build_page_meta(site, &path, Some(&category.name), seo, schemas);

    bag.insert(category_key(slug), &category)?;
    bag.insert(products_key(slug), &products)?;
    bag.insert(seo_show_key(slug), &page_meta)?;
    Ok(bag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_namespaced_by_slug() {
        assert_eq!(category_key("scarves"), "category:scarves");
        assert_eq!(products_key("scarves"), "category:scarves:products");
        assert_eq!(seo_show_key("scarves"), "seo:/category/scarves");
    }
}
