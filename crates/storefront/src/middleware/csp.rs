//! Per-request CSP nonce for the initial-data embed.
//!
//! The only inline script the storefront emits is the initial-data bridge
//! embed. Each request gets a fresh random nonce; the embed and the CSP
//! header (built in `security_headers`) both carry it, so any other inline
//! script the browser encounters is refused.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

/// Entropy per nonce. 18 bytes encodes to 24 base64 characters, no padding.
const NONCE_BYTES: usize = 18;

/// A per-request CSP nonce.
#[derive(Clone, Debug)]
pub struct CspNonce(pub String);

impl CspNonce {
    /// Generate a fresh random nonce.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; NONCE_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// The nonce value, for `nonce="..."` attributes and the CSP header.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Attach a fresh nonce to the request extensions.
///
/// Must run before `security_headers_middleware`, which reads the nonce
/// when building the CSP header.
pub async fn csp_nonce_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(CspNonce::generate());
    next.run(request).await
}

impl<S> FromRequestParts<S> for CspNonce
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // An empty nonce satisfies nothing in the CSP header, so a
        // misconfigured stack fails closed rather than open
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_else(|| {
            tracing::warn!("CSP nonce missing from request extensions; check middleware order");
            Self(String::new())
        }))
    }
}
