//! Robots directive route handler.
//!
//! Fixed, non-algorithmic contract: crawl-disallow the stateful pages and
//! point crawlers at the sitemap.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Paths crawlers must not index.
const DISALLOWED_PATHS: &[&str] = &[
    "/cart",
    "/checkout",
    "/account",
    "/orders",
    "/wishlist",
    "/search",
    "/wp-admin",
];

/// Serve `robots.txt`.
pub async fn robots_txt(State(state): State<AppState>) -> Response {
    let mut body = String::from("User-agent: *\n");
    for path in DISALLOWED_PATHS {
        body.push_str("Disallow: ");
        body.push_str(path);
        body.push('\n');
    }
    body.push_str("\nSitemap: ");
    body.push_str(&state.site().absolute_url("/sitemap.xml"));
    body.push('\n');

    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}
