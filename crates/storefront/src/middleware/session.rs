//! Session middleware configuration.
//!
//! Sessions hold exactly one thing: the backend-issued JWT for logged-in
//! customers. The in-memory store is deliberate - losing sessions on restart
//! only means customers log in again; all durable state lives in the
//! commerce backend.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "padma_session";

/// Session expiry time in seconds (24 hours - matches the backend JWT TTL).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Well-known session keys.
pub mod session_keys {
    /// The authenticated [`AuthSession`](crate::commerce::types::AuthSession).
    pub const AUTH: &str = "auth.session";
}

/// Create the session layer with an in-memory store.
///
/// `base_url` determines whether the cookie is marked `Secure`.
#[must_use]
pub fn create_session_layer(base_url: &str) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    // Determine if we're in production (HTTPS)
    let is_secure = base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
