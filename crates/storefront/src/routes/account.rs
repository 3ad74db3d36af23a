//! Account route handlers (login, signup, order history).
//!
//! Authentication delegates to the commerce backend's JWT endpoint; the
//! issued token lives in the server-side session and never reaches the
//! browser. Account pages are crawl-disallowed, so metadata uses site
//! fallbacks without hitting the feed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use padma_core::{BdPhone, CurrencyCode, Price};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::commerce::CommerceError;
use crate::commerce::types::{AuthSession, OrderSummary};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CspNonce;
use crate::middleware::session::session_keys;
use crate::seo::{PageMeta, meta};
use crate::state::AppState;

// =============================================================================
// Views & Templates
// =============================================================================

/// Order display data for the order-history table.
#[derive(Clone)]
pub struct OrderView {
    pub number: String,
    pub status: &'static str,
    pub date: String,
    pub total: String,
    pub item_count: usize,
}

impl From<&OrderSummary> for OrderView {
    fn from(order: &OrderSummary) -> Self {
        // Only format totals in the store currency; anything else shows raw
        let total = if order.currency == "BDT" {
            Price::parse(&order.total, CurrencyCode::BDT)
                .map_or_else(|_| order.total.clone(), |p| p.to_string())
        } else {
            format!("{} {}", order.total, order.currency)
        };

        Self {
            number: order.number.clone(),
            status: order.status.label(),
            date: order.date_created.format("%-d %b %Y").to_string(),
            total,
            item_count: order.line_items.len(),
        }
    }
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/login.html")]
pub struct LoginTemplate {
    pub meta: PageMeta,
    pub nonce: String,
    pub initial_data_script: String,
    pub error: Option<String>,
    /// Refill value after a failed attempt.
    pub username: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/register.html")]
pub struct RegisterTemplate {
    pub meta: PageMeta,
    pub nonce: String,
    pub initial_data_script: String,
    pub error: Option<String>,
    pub email: String,
    pub username: String,
    pub phone: String,
}

/// Account overview template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub meta: PageMeta,
    pub nonce: String,
    pub initial_data_script: String,
    pub display_name: String,
    pub email: String,
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "account/orders.html")]
pub struct OrdersTemplate {
    pub meta: PageMeta,
    pub nonce: String,
    pub initial_data_script: String,
    pub orders: Vec<OrderView>,
}

// =============================================================================
// Forms
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Register form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    pub password: String,
    /// Bangladeshi mobile number in any accepted shape; optional.
    #[serde(default)]
    pub phone: String,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the authenticated session, if any.
async fn current_auth(session: &Session) -> Option<AuthSession> {
    session
        .get::<AuthSession>(session_keys::AUTH)
        .await
        .ok()
        .flatten()
}

/// Store the authenticated session.
async fn set_auth(session: &Session, auth: &AuthSession) -> Result<()> {
    session
        .insert(session_keys::AUTH, auth)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store session: {e}")))
}

fn page_meta(state: &AppState, path: &str, title: &str) -> PageMeta {
    meta::build_page_meta(state.site(), path, Some(title), None, Vec::new())
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
#[instrument(skip(state, nonce))]
pub async fn login_page(State(state): State<AppState>, CspNonce(nonce): CspNonce) -> LoginTemplate {
    LoginTemplate {
        meta: page_meta(&state, "/account/login", "Log in"),
        nonce,
        initial_data_script: String::new(),
        error: None,
        username: String::new(),
    }
}

/// Log in against the backend JWT endpoint.
#[instrument(skip(state, session, nonce, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match state.accounts().login(&form.username, &form.password).await {
        Ok(auth) => {
            set_auth(&session, &auth).await?;
            Ok(Redirect::to("/account").into_response())
        }
        // The backend answers bad credentials with a 4xx and a message we
        // deliberately do not echo
        Err(CommerceError::Api {
            status: 400..=499, ..
        }) => Ok(LoginTemplate {
            meta: page_meta(&state, "/account/login", "Log in"),
            nonce,
            initial_data_script: String::new(),
            error: Some("Invalid username or password.".to_string()),
            username: form.username,
        }
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Display the register page.
#[instrument(skip(state, nonce))]
pub async fn register_page(
    State(state): State<AppState>,
    CspNonce(nonce): CspNonce,
) -> RegisterTemplate {
    RegisterTemplate {
        meta: page_meta(&state, "/account/register", "Create account"),
        nonce,
        initial_data_script: String::new(),
        error: None,
        email: String::new(),
        username: String::new(),
        phone: String::new(),
    }
}

/// Create a customer account on the backend.
#[instrument(skip(state, nonce, form))]
pub async fn register(
    State(state): State<AppState>,
    CspNonce(nonce): CspNonce,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let form_error = |state: &AppState, nonce: String, form: RegisterForm, message: String| {
        RegisterTemplate {
            meta: page_meta(state, "/account/register", "Create account"),
            nonce,
            initial_data_script: String::new(),
            error: Some(message),
            email: form.email,
            username: form.username,
            phone: form.phone,
        }
        .into_response()
    };

    // Normalize the phone up front; the backend stores it verbatim
    let phone = if form.phone.trim().is_empty() {
        None
    } else {
        match BdPhone::normalize(&form.phone) {
            Some(normalized) => Some(normalized),
            None => {
                return Ok(form_error(
                    &state,
                    nonce,
                    form,
                    "Enter a valid Bangladeshi mobile number (e.g., 01712345678).".to_string(),
                ));
            }
        }
    };

    match state
        .accounts()
        .register(&form.email, &form.username, &form.password, phone.as_deref())
        .await
    {
        Ok(_) => Ok(Redirect::to("/account/login").into_response()),
        Err(CommerceError::Api {
            status: 400..=499,
            message,
        }) => Ok(form_error(&state, nonce, form, message)),
        Err(e) => Err(e.into()),
    }
}

/// Log out and clear the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;
    Ok(Redirect::to("/"))
}

/// Account overview; redirects to login when unauthenticated.
#[instrument(skip(state, session, nonce))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
) -> Response {
    let Some(auth) = current_auth(&session).await else {
        return Redirect::to("/account/login").into_response();
    };

    AccountTemplate {
        meta: page_meta(&state, "/account", "My Account"),
        nonce,
        initial_data_script: String::new(),
        display_name: auth.display_name,
        email: auth.email,
    }
    .into_response()
}

/// Order history; redirects to login when unauthenticated or expired.
#[instrument(skip(state, session, nonce))]
pub async fn orders(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
) -> Result<Response> {
    let Some(auth) = current_auth(&session).await else {
        return Ok(Redirect::to("/account/login").into_response());
    };

    let orders = match state.accounts().get_orders(&auth.token).await {
        Ok(orders) => orders,
        // Expired/revoked token: back through login rather than a 502
        Err(CommerceError::Api {
            status: 401 | 403, ..
        }) => {
            let _ = session.flush().await;
            return Ok(Redirect::to("/account/login").into_response());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(OrdersTemplate {
        meta: page_meta(&state, "/account/orders", "Order History"),
        nonce,
        initial_data_script: String::new(),
        orders: orders.iter().map(OrderView::from).collect(),
    }
    .into_response())
}
