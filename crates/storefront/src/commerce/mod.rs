//! Commerce backend API clients.
//!
//! # Architecture
//!
//! - The backend is a WooCommerce-style REST API; all calls go through
//!   `reqwest` with JSON bodies
//! - The backend is source of truth - NO local sync, NO caching, every call
//!   is a fresh round trip
//! - Catalog reads authenticate with a Basic header built from the configured
//!   consumer key/secret pair (when configured)
//! - Account operations (login, signup, order history) authenticate with a
//!   bearer token from the backend's JWT endpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use padma_storefront::commerce::{CatalogClient, ProductFilters};
//!
//! let catalog = CatalogClient::new(&config.commerce);
//!
//! // Latest published products
//! let filters = ProductFilters::published().per_page(10);
//! let products = catalog.get_products(&filters).await?;
//!
//! // Single product by slug (absence is not an error)
//! let product = catalog.get_product_by_slug("rickshaw-art-tote").await?;
//! ```

mod account;
mod catalog;
pub mod types;

pub use account::AccountClient;
pub use catalog::{CatalogClient, OrderBy, ProductFilters, SortOrder};
pub use types::*;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when interacting with the commerce backend.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// HTTP request failed (network, TLS, or body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    ///
    /// `message` carries the backend's error payload when one was sent,
    /// otherwise the status text.
    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error payload shape used by the backend (`{"code": ..., "message": ...}`).
#[derive(Debug, Deserialize)]
struct RawApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Map a non-success response to [`CommerceError::Api`].
///
/// Reads the body and extracts the backend's error message when the payload
/// parses; falls back to the HTTP status text. Never retries.
pub(crate) async fn api_error(response: reqwest::Response) -> CommerceError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<RawApiError>(&body)
        .ok()
        .filter(|e| !e.message.is_empty())
        .map_or_else(
            || {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            },
            |e| {
                if e.code.is_empty() {
                    e.message
                } else {
                    format!("{} ({})", e.message, e.code)
                }
            },
        );

    tracing::error!(
        status = %status,
        body = %body.chars().take(500).collect::<String>(),
        "Commerce API returned non-success status"
    );

    CommerceError::Api {
        status: status.as_u16(),
        message,
    }
}
