//! Request ID middleware for tracing and error correlation.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest inbound ID we accept before minting our own.
const MAX_INBOUND_ID_LEN: usize = 64;

/// Ensure every request has a usable request ID.
///
/// A sane `x-request-id` from an upstream proxy is kept so log lines can be
/// joined across hops; anything absent, oversized, or non-ASCII is replaced
/// with a fresh UUID. The ID is recorded in the current tracing span, tagged
/// on the Sentry scope, and echoed in the response headers.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let inbound = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| !id.is_empty() && id.len() <= MAX_INBOUND_ID_LEN);

    let request_id = match inbound {
        Some(id) => id.to_owned(),
        None => Uuid::new_v4().simple().to_string(),
    };

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
