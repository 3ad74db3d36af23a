//! Account API client (JWT login, signup, order history).
//!
//! Authentication is fully delegated to the backend: the JWT endpoint issues
//! tokens, and authenticated reads send them back as bearer headers. The
//! storefront stores the token in the server-side session only.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::commerce::types::{AuthSession, Customer, OrderSummary, RawOrder};
use crate::commerce::{CommerceError, api_error};
use crate::config::CommerceConfig;

/// Raw token payload from the JWT endpoint.
#[derive(Debug, Deserialize)]
struct RawToken {
    token: String,
    user_email: String,
    #[serde(default)]
    user_display_name: String,
}

/// Client for the commerce backend's account endpoints.
#[derive(Clone)]
pub struct AccountClient {
    inner: Arc<AccountClientInner>,
}

struct AccountClientInner {
    client: reqwest::Client,
    api_url: String,
    auth_url: String,
    credentials: Option<(String, SecretString)>,
}

impl AccountClient {
    /// Create a new account client.
    #[must_use]
    pub fn new(config: &CommerceConfig) -> Self {
        Self {
            inner: Arc::new(AccountClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.trim_end_matches('/').to_string(),
                auth_url: config.auth_url.trim_end_matches('/').to_string(),
                credentials: config
                    .consumer_key
                    .clone()
                    .zip(config.consumer_secret.clone()),
            }),
        }
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::Api` with the backend's message on bad
    /// credentials (401/403), or a transport error if the call fails.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthSession, CommerceError> {
        let response = self
            .inner
            .client
            .post(format!("{}/token", self.inner.auth_url))
            .json(&json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let raw = response.json::<RawToken>().await?;
        Ok(AuthSession {
            token: raw.token,
            email: raw.user_email,
            display_name: raw.user_display_name,
        })
    }

    /// Create a new customer account.
    ///
    /// Uses the service credential pair; customer creation is a privileged
    /// backend operation. `phone` must already be normalized to E.164
    /// (see [`padma_core::BdPhone`]).
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::Api` when the backend rejects the signup
    /// (duplicate email, weak password policy), or a transport error.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
        phone: Option<&str>,
    ) -> Result<Customer, CommerceError> {
        let mut payload = json!({
            "email": email,
            "username": username,
            "password": password,
        });
        if let Some(phone) = phone {
            payload["billing"] = json!({ "phone": phone });
        }

        let mut request = self
            .inner
            .client
            .post(format!("{}/customers", self.inner.api_url))
            .json(&payload);

        if let Some((key, secret)) = &self.inner.credentials {
            request = request.basic_auth(key, Some(secret.expose_secret()));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json::<Customer>().await?)
    }

    /// Fetch the authenticated customer's order history.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::Api` when the token is expired or invalid,
    /// or a transport error.
    #[instrument(skip(self, token))]
    pub async fn get_orders(&self, token: &str) -> Result<Vec<OrderSummary>, CommerceError> {
        let response = self
            .inner
            .client
            .get(format!("{}/orders", self.inner.api_url))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let raw = response.json::<Vec<RawOrder>>().await?;
        Ok(raw.into_iter().map(OrderSummary::from).collect())
    }
}
