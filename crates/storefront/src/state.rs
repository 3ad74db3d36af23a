//! Application state shared across handlers.

use std::sync::Arc;

use crate::commerce::{AccountClient, CatalogClient};
use crate::config::StorefrontConfig;
use crate::seo::{SeoClient, SiteContext};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the backend clients and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    site: SiteContext,
    catalog: CatalogClient,
    seo: SeoClient,
    accounts: AccountClient,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let site = SiteContext::new(&config.site_name, &config.base_url);
        let catalog = CatalogClient::new(&config.commerce);
        let seo = SeoClient::new(&config.seo_api_url);
        let accounts = AccountClient::new(&config.commerce);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                site,
                catalog,
                seo,
                accounts,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the site context used for metadata fallbacks and absolute URLs.
    #[must_use]
    pub fn site(&self) -> &SiteContext {
        &self.inner.site
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the SEO metadata client.
    #[must_use]
    pub fn seo(&self) -> &SeoClient {
        &self.inner.seo
    }

    /// Get a reference to the account API client.
    #[must_use]
    pub fn accounts(&self) -> &AccountClient {
        &self.inner.accounts
    }
}
