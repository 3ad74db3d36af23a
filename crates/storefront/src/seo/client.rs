//! Per-route SEO metadata feed client.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::commerce::{CommerceError, api_error};
use crate::seo::normalize_route_path;

/// Per-route SEO metadata as the backend feed sends it.
///
/// Fields default to empty; empty means "not provided" and the page-metadata
/// builder substitutes fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub canonical: String,
    #[serde(default)]
    pub og_title: String,
    #[serde(default)]
    pub og_description: String,
    #[serde(default)]
    pub og_image: String,
    #[serde(default)]
    pub og_type: String,
    #[serde(default)]
    pub og_url: String,
    #[serde(default)]
    pub twitter_card: String,
    #[serde(default)]
    pub twitter_title: String,
    #[serde(default)]
    pub twitter_description: String,
    #[serde(default)]
    pub twitter_image: String,
    /// Backend-supplied JSON-LD objects, in feed order.
    #[serde(default)]
    pub schema: Vec<serde_json::Value>,
}

/// Client for the per-route SEO metadata feed.
#[derive(Clone)]
pub struct SeoClient {
    inner: Arc<SeoClientInner>,
}

struct SeoClientInner {
    client: reqwest::Client,
    endpoint: String,
}

impl SeoClient {
    /// Create a new SEO metadata client.
    #[must_use]
    pub fn new(seo_api_url: &str) -> Self {
        Self {
            inner: Arc::new(SeoClientInner {
                client: reqwest::Client::new(),
                endpoint: seo_api_url.trim_end_matches('/').to_string(),
            }),
        }
    }

    /// Get metadata for a route path.
    ///
    /// The path is normalized before lookup. A 404 from the feed means the
    /// route has no metadata and returns `Ok(None)` - callers fall back to
    /// site defaults.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or non-404 error statuses.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get_metadata_for_route(
        &self,
        path: &str,
    ) -> Result<Option<SeoMetadata>, CommerceError> {
        let normalized = normalize_route_path(path);

        let response = self
            .inner
            .client
            .get(&self.inner.endpoint)
            .query(&[("path", normalized.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        // The feed answers unknown-but-routable paths with a JSON null
        let metadata = response.json::<Option<SeoMetadata>>().await?;
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_defaults_for_sparse_payload() {
        let metadata: SeoMetadata =
            serde_json::from_str(r#"{"title": "Shop | Padma Bazar"}"#).expect("valid payload");
        assert_eq!(metadata.title, "Shop | Padma Bazar");
        assert!(metadata.description.is_empty());
        assert!(metadata.schema.is_empty());
    }

    #[test]
    fn test_metadata_null_is_absent() {
        let metadata: Option<SeoMetadata> = serde_json::from_str("null").expect("valid payload");
        assert!(metadata.is_none());
    }

    #[test]
    fn test_metadata_carries_schema_order() {
        let metadata: SeoMetadata = serde_json::from_str(
            r#"{"schema": [{"@type": "WebSite"}, {"@type": "Organization"}]}"#,
        )
        .expect("valid payload");
        assert_eq!(metadata.schema.len(), 2);
        assert_eq!(metadata.schema[0]["@type"], "WebSite");
    }
}
