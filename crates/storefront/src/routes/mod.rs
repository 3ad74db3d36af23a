//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /shop                   - Product listing (query: category, orderby, page)
//! GET  /product/{slug}         - Product detail (soft 404 on unknown slug)
//! GET  /categories             - Category listing
//! GET  /category/{slug}        - Single category (soft 404 on unknown slug)
//!
//! # Client-store shells (cart/wishlist state lives in the browser)
//! GET  /cart                   - Cart page
//! GET  /wishlist               - Wishlist page
//! GET  /checkout               - Redirect to backend-hosted checkout
//! GET  /checkout/confirmation  - Order confirmation page
//!
//! # Account (JWT session against the commerce backend)
//! GET  /account/login          - Login page
//! POST /account/login          - Login action
//! GET  /account/register       - Register page
//! POST /account/register       - Register action
//! POST /account/logout         - Logout action
//! GET  /account                - Account overview
//! GET  /account/orders         - Order history
//!
//! # SEO
//! GET  /robots.txt             - Crawl directives + sitemap reference
//! ```

pub mod account;
pub mod cart;
pub mod categories;
pub mod checkout;
pub mod home;
pub mod products;
pub mod robots;
pub mod shop;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the account routes router.
///
/// The login and register pages (and their actions) sit behind the strict
/// auth rate limiter.
pub fn account_routes() -> Router<AppState> {
    let auth_pages = Router::new()
        .route("/login", get(account::login_page).post(account::login))
        .route(
            "/register",
            get(account::register_page).post(account::register),
        )
        .route_layer(auth_rate_limiter());

    Router::new()
        .route("/", get(account::index))
        .route("/logout", post(account::logout))
        .route("/orders", get(account::orders))
        .merge(auth_pages)
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .route("/shop", get(shop::index))
        .route("/product/{slug}", get(products::show))
        .route("/categories", get(categories::index))
        .route("/category/{slug}", get(categories::show))
        // Client-store shells
        .route("/cart", get(cart::show))
        .route("/wishlist", get(wishlist::show))
        .route("/checkout", get(checkout::start))
        .route("/checkout/confirmation", get(checkout::confirmation))
        // Account
        .nest("/account", account_routes())
        // SEO
        .route("/robots.txt", get(robots::robots_txt))
}
