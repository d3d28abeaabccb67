use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{debug, error::ProviderError, spotify::auth::client_credentials};

/// Seconds a token must still be valid for before it is handed out.
///
/// Keeps a token from expiring between the check and its use upstream.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl Token {
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now > Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS)
    }
}

/// Single-slot cache for an application bearer token.
///
/// The slot is only written by [`TokenCache::get_token`] while holding the lock,
/// so concurrent requests that find the token expired wait for one refresh
/// instead of each hitting the token endpoint.
pub struct TokenCache {
    http: Client,
    token_url: String,
    slot: Mutex<Option<Token>>,
}

impl TokenCache {
    pub fn new(http: Client, token_url: impl Into<String>) -> Self {
        TokenCache {
            http,
            token_url: token_url.into(),
            slot: Mutex::new(None),
        }
    }

    /// Starts the cache with an already obtained token.
    pub fn with_token(mut self, token: Token) -> Self {
        self.slot = Mutex::new(Some(token));
        self
    }

    /// Returns a token valid for at least [`TOKEN_EXPIRY_MARGIN_SECS`] more seconds.
    ///
    /// Performs a client-credentials exchange only when the cached token is
    /// missing or about to expire.
    ///
    /// # Errors
    ///
    /// [`ProviderError::Authentication`] when the exchange fails.
    pub async fn get_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String, ProviderError> {
        let mut slot = self.slot.lock().await;
        let now = Utc::now();

        if let Some(token) = slot.as_ref().filter(|t| t.is_valid_at(now)) {
            return Ok(token.value.clone());
        }

        debug!("Requesting new application token from {}", self.token_url);
        let token = client_credentials(&self.http, &self.token_url, client_id, client_secret).await?;
        let value = token.value.clone();
        *slot = Some(token);

        Ok(value)
    }

    pub async fn current(&self) -> Option<Token> {
        self.slot.lock().await.clone()
    }
}
