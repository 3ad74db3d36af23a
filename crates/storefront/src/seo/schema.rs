//! JSON-LD structured-data builders.
//!
//! Each page type emits an ordered sequence of schema.org objects. Generated
//! schemas always precede any backend-supplied ones (the page-metadata
//! builder handles the concatenation).

use serde_json::{Value, json};

use crate::commerce::types::{Category, Product};
use crate::seo::meta::SiteContext;

/// `WebSite` schema for the store.
#[must_use]
pub fn website(site: &SiteContext) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": site.name,
        "url": site.base_url,
    })
}

/// `Organization` schema for the store.
#[must_use]
pub fn organization(site: &SiteContext) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": site.name,
        "url": site.base_url,
        "logo": format!("{}/static/images/logo.svg", site.base_url),
    })
}

/// `BreadcrumbList` schema from ordered `(name, path)` pairs.
#[must_use]
pub fn breadcrumb(site: &SiteContext, items: &[(&str, &str)]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(i, (name, path))| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": name,
                "item": site.absolute_url(path),
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

/// `Product` schema for a product-detail page.
#[must_use]
pub fn product(site: &SiteContext, product: &Product) -> Value {
    let mut value = json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": product.name,
        "url": site.absolute_url(&format!("/product/{}", product.slug)),
        "image": product.images.iter().map(|i| i.url.as_str()).collect::<Vec<_>>(),
        "offers": {
            "@type": "Offer",
            "price": product.price,
            "priceCurrency": "BDT",
            "availability": "https://schema.org/InStock",
            "url": site.absolute_url(&format!("/product/{}", product.slug)),
        },
    });

    if let Some(rating) = product.average_rating {
        value["aggregateRating"] = json!({
            "@type": "AggregateRating",
            "ratingValue": rating,
            "bestRating": 5,
        });
    }

    value
}

/// `CollectionPage` schema for a category page.
#[must_use]
pub fn collection_page(site: &SiteContext, category: &Category) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "CollectionPage",
        "name": category.name,
        "url": site.absolute_url(&format!("/category/{}", category.slug)),
        "description": category.description,
    })
}
