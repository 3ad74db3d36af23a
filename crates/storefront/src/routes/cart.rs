//! Cart page route handler.
//!
//! The cart itself lives in the browser (`static/js/storefront.js` keeps a
//! localStorage-backed store, deduplicated by product id). The server only
//! renders the shell the store hydrates into.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::filters;
use crate::middleware::CspNonce;
use crate::seo::{PageMeta, meta};
use crate::state::AppState;

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartTemplate {
    pub meta: PageMeta,
    pub nonce: String,
    pub initial_data_script: String,
}

/// Display the cart page shell.
#[instrument(skip(state, nonce))]
pub async fn show(State(state): State<AppState>, CspNonce(nonce): CspNonce) -> CartTemplate {
    // Crawl-disallowed page: site fallbacks only, no metadata feed call
    let page_meta =
        meta::build_page_meta(state.site(), "/cart", Some("Your Cart"), None, Vec::new());

    CartTemplate {
        meta: page_meta,
        nonce,
        initial_data_script: String::new(),
    }
}
