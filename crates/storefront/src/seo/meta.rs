//! Page metadata building with documented fallbacks.
//!
//! User-visible metadata must never render blank: when the backend feed has
//! no data for a route, the builder substitutes the site name and a generic
//! description rather than leaving fields empty.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::seo::client::SeoMetadata;
use crate::seo::{audit, normalize_route_path};

/// Generic description used when neither the feed nor the page provides one.
pub const DEFAULT_DESCRIPTION: &str =
    "Handpicked clothing, crafts and homeware from Bangladeshi artisans, delivered nationwide.";

/// Open Graph type applied when the feed does not specify one.
const DEFAULT_OG_TYPE: &str = "website";

/// Twitter card type applied when the feed does not specify one.
const DEFAULT_TWITTER_CARD: &str = "summary_large_image";

/// Site-wide values the metadata builder falls back to.
#[derive(Debug, Clone)]
pub struct SiteContext {
    /// Store display name.
    pub name: String,
    /// Public base URL, no trailing slash.
    pub base_url: String,
}

impl SiteContext {
    /// Create a site context, normalizing the base URL.
    #[must_use]
    pub fn new(name: &str, base_url: &str) -> Self {
        Self {
            name: name.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Absolute URL for a route path.
    #[must_use]
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, normalize_route_path(path))
    }
}

/// Built metadata for one rendered page.
///
/// All headline fields are guaranteed non-empty; social-image fields stay
/// optional because there is no sensible fallback image for every route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub og_title: String,
    pub og_description: String,
    pub og_type: String,
    pub og_url: String,
    pub og_image: Option<String>,
    pub twitter_card: String,
    pub twitter_title: String,
    pub twitter_description: String,
    pub twitter_image: Option<String>,
    /// JSON-LD objects in emission order: generated schemas first,
    /// backend-supplied schemas appended last.
    pub schemas: Vec<Value>,
}

/// Build the metadata for a page.
///
/// `fallback_title` is the page's own best title (e.g., the product name);
/// when neither the feed nor the page provides one, the site name is used.
/// `generated_schemas` are the storefront's own JSON-LD objects; any
/// feed-supplied schemas are appended after them.
#[must_use]
pub fn build_page_meta(
    site: &SiteContext,
    path: &str,
    fallback_title: Option<&str>,
    backend: Option<SeoMetadata>,
    generated_schemas: Vec<Value>,
) -> PageMeta {
    let backend = backend.unwrap_or_default();

    let title = first_non_empty(&[
        &backend.title,
        fallback_title.unwrap_or(""),
        &site.name,
    ]);
    let description = first_non_empty(&[&backend.description, DEFAULT_DESCRIPTION]);
    let canonical = first_non_empty(&[&backend.canonical, &site.absolute_url(path)]);

    let og_title = first_non_empty(&[&backend.og_title, &title]);
    let og_description = first_non_empty(&[&backend.og_description, &description]);
    let og_type = first_non_empty(&[&backend.og_type, DEFAULT_OG_TYPE]);
    let og_url = first_non_empty(&[&backend.og_url, &canonical]);
    let og_image = non_empty(backend.og_image);

    let twitter_card = first_non_empty(&[&backend.twitter_card, DEFAULT_TWITTER_CARD]);
    let twitter_title = first_non_empty(&[&backend.twitter_title, &og_title]);
    let twitter_description = first_non_empty(&[&backend.twitter_description, &og_description]);
    let twitter_image = non_empty(backend.twitter_image).or_else(|| og_image.clone());

    let mut schemas = generated_schemas;
    schemas.extend(backend.schema);

    let meta = PageMeta {
        title,
        description,
        canonical,
        og_title,
        og_description,
        og_type,
        og_url,
        og_image,
        twitter_card,
        twitter_title,
        twitter_description,
        twitter_image,
        schemas,
    };

    let report = audit::audit(&meta);
    if report.score < audit::MAX_SCORE {
        tracing::debug!(
            path = %path,
            score = report.score,
            notes = ?report.notes,
            "page metadata below full score"
        );
    }

    meta
}

/// First non-empty candidate, owned.
fn first_non_empty(candidates: &[&str]) -> String {
    candidates
        .iter()
        .find(|c| !c.is_empty())
        .map_or_else(String::new, |c| (*c).to_owned())
}

/// Empty string to `None`.
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn site() -> SiteContext {
        SiteContext::new("Padma Bazar", "https://padmabazar.com/")
    }

    #[test]
    fn test_no_backend_metadata_yields_non_empty_fields() {
        let meta = build_page_meta(&site(), "/", None, None, Vec::new());
        assert!(!meta.title.is_empty());
        assert!(!meta.description.is_empty());
        assert_eq!(meta.title, "Padma Bazar");
        assert_eq!(meta.description, DEFAULT_DESCRIPTION);
        assert_eq!(meta.canonical, "https://padmabazar.com/");
    }

    #[test]
    fn test_fallback_title_preferred_over_site_name() {
        let meta = build_page_meta(&site(), "/product/jamdani-scarf", Some("Jamdani Scarf"), None, Vec::new());
        assert_eq!(meta.title, "Jamdani Scarf");
        assert_eq!(
            meta.canonical,
            "https://padmabazar.com/product/jamdani-scarf"
        );
    }

    #[test]
    fn test_backend_metadata_wins() {
        let backend = SeoMetadata {
            title: "Jamdani Scarf | Padma Bazar".to_string(),
            description: "Handwoven jamdani scarf.".to_string(),
            canonical: "https://padmabazar.com/product/jamdani-scarf".to_string(),
            ..SeoMetadata::default()
        };
        let meta = build_page_meta(
            &site(),
            "/product/jamdani-scarf",
            Some("Jamdani Scarf"),
            Some(backend),
            Vec::new(),
        );
        assert_eq!(meta.title, "Jamdani Scarf | Padma Bazar");
        assert_eq!(meta.description, "Handwoven jamdani scarf.");
    }

    #[test]
    fn test_social_fields_default_from_headline_fields() {
        let meta = build_page_meta(&site(), "/shop", Some("Shop"), None, Vec::new());
        assert_eq!(meta.og_title, "Shop");
        assert_eq!(meta.og_description, DEFAULT_DESCRIPTION);
        assert_eq!(meta.og_type, "website");
        assert_eq!(meta.og_url, meta.canonical);
        assert_eq!(meta.twitter_card, "summary_large_image");
        assert_eq!(meta.twitter_title, "Shop");
        assert_eq!(meta.og_image, None);
    }

    #[test]
    fn test_generated_schemas_precede_backend_schemas() {
        let backend = SeoMetadata {
            schema: vec![json!({"@type": "FAQPage"})],
            ..SeoMetadata::default()
        };
        let generated = vec![json!({"@type": "WebSite"}), json!({"@type": "BreadcrumbList"})];
        let meta = build_page_meta(&site(), "/", None, Some(backend), generated);

        let types: Vec<&str> = meta
            .schemas
            .iter()
            .filter_map(|s| s["@type"].as_str())
            .collect();
        assert_eq!(types, vec!["WebSite", "BreadcrumbList", "FAQPage"]);
    }

    #[test]
    fn test_twitter_image_falls_back_to_og_image() {
        let backend = SeoMetadata {
            og_image: "https://cdn.test/scarf.jpg".to_string(),
            ..SeoMetadata::default()
        };
        let meta = build_page_meta(&site(), "/", None, Some(backend), Vec::new());
        assert_eq!(meta.twitter_image.as_deref(), Some("https://cdn.test/scarf.jpg"));
    }
}
