//! Product-detail page loader.

use tracing::instrument;

use crate::error::Result;
use crate::initial_data::InitialData;
use crate::seo::{meta, schema};
use crate::state::AppState;

/// Bag key for the product record (null sentinel when absent).
#[must_use]
pub fn product_key(slug: &str) -> String {
    format!("product:{slug}")
}

/// Bag key for the built page metadata.
#[must_use]
pub fn seo_key(slug: &str) -> String {
    format!("seo:/product/{slug}")
}

/// Load the product-detail data bag for a slug.
///
/// Fetches the product and its SEO metadata concurrently. An absent product
/// is not an error: the bag carries a null sentinel under
/// [`product_key`] and the page renders a not-found state.
///
/// # Errors
///
/// Propagates backend failures unmodified.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn load(state: &AppState, slug: &str) -> Result<InitialData> {
    let path = format!("/product/{slug}");

    let (product, seo) = tokio::try_join!(
        state.catalog().get_product_by_slug(slug),
        state.seo().get_metadata_for_route(&path),
    )?;

    let site = state.site();
    let mut bag = InitialData::new();

    let page_meta = match &product {
        Some(product) => {
            let schemas = vec![
                schema::breadcrumb(
                    site,
                    &[
                        ("Home", "/"),
                        ("Shop", "/shop"),
                        (product.name.as_str(), path.as_str()),
                    ],
                ),
                schema::product(site, product),
            ];
            meta::build_page_meta(site, &path, Some(&product.name), seo, schemas)
        }
        None => meta::build_page_meta(site, &path, None, seo, Vec::new()),
    };

    match product {
        Some(product) => bag.insert(product_key(slug), &product)?,
        None => bag.insert_null(product_key(slug)),
    }
    bag.insert(seo_key(slug), &page_meta)?;
    Ok(bag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_namespaced_by_slug() {
        assert_eq!(product_key("jamdani-scarf"), "product:jamdani-scarf");
        assert_eq!(seo_key("jamdani-scarf"), "seo:/product/jamdani-scarf");
    }
}
