//! Wishlist page route handler.
//!
//! Same shape as the cart: the wishlist store lives in the browser, the
//! server renders the shell.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::filters;
use crate::middleware::CspNonce;
use crate::seo::{PageMeta, meta};
use crate::state::AppState;

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistTemplate {
    pub meta: PageMeta,
    pub nonce: String,
    pub initial_data_script: String,
}

/// Display the wishlist page shell.
#[instrument(skip(state, nonce))]
pub async fn show(State(state): State<AppState>, CspNonce(nonce): CspNonce) -> WishlistTemplate {
    let page_meta =
        meta::build_page_meta(state.site(), "/wishlist", Some("Wishlist"), None, Vec::new());

    WishlistTemplate {
        meta: page_meta,
        nonce,
        initial_data_script: String::new(),
    }
}
