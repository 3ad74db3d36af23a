//! Checkout confirmation route handler.
//!
//! Checkout itself happens on the commerce backend; the storefront only
//! renders the confirmation landing page the backend redirects to.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::Redirect;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CspNonce;
use crate::seo::{PageMeta, meta};
use crate::state::AppState;

/// Redirect `/checkout` to the backend-hosted checkout.
///
/// Payment and fulfilment stay on the commerce backend; the storefront never
/// sees card data.
#[instrument(skip(state))]
pub async fn start(State(state): State<AppState>) -> Result<Redirect> {
    let mut checkout_url = url::Url::parse(&state.config().commerce.api_url)
        .map_err(|e| AppError::Internal(format!("invalid commerce API URL: {e}")))?;
    checkout_url.set_path("/checkout");
    checkout_url.set_query(None);
    Ok(Redirect::to(checkout_url.as_str()))
}

/// Confirmation query parameters set by the backend redirect.
#[derive(Debug, Deserialize)]
pub struct ConfirmationQuery {
    /// Customer-facing order number.
    pub order: Option<String>,
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub meta: PageMeta,
    pub nonce: String,
    pub initial_data_script: String,
    pub order_number: Option<String>,
}

/// Display the order confirmation page.
#[instrument(skip(state, nonce))]
pub async fn confirmation(
    State(state): State<AppState>,
    Query(query): Query<ConfirmationQuery>,
    CspNonce(nonce): CspNonce,
) -> ConfirmationTemplate {
    let page_meta = meta::build_page_meta(
        state.site(),
        "/checkout/confirmation",
        Some("Order Confirmed"),
        None,
        Vec::new(),
    );

    ConfirmationTemplate {
        meta: page_meta,
        nonce,
        initial_data_script: String::new(),
        order_number: query.order,
    }
}
