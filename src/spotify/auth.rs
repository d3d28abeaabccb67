use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{Duration, Utc};
use reqwest::Client;

use crate::{
    error::ProviderError, management::Token, spotify::REQUEST_TIMEOUT, types::TokenResponse,
    warning,
};

/// Builds the `Authorization` header value for the client-credentials grant.
pub fn basic_authorization(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", client_id, client_secret))
    )
}

/// Exchanges application credentials for a bearer token.
///
/// Uses the OAuth 2.0 client-credentials grant: the credentials travel as HTTP
/// Basic auth and the form body is `grant_type=client_credentials`. No user is
/// involved, so the token only grants access to public catalog data.
///
/// # Returns
///
/// A [`Token`] whose expiry is `now + expires_in` seconds.
///
/// # Errors
///
/// Every failure (transport error, undecodable body, empty access token or an
/// unrepresentable lifetime) is reported as [`ProviderError::Authentication`];
/// the underlying reason is logged.
pub async fn client_credentials(
    http: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<Token, ProviderError> {
    let response = http
        .post(token_url)
        .header(
            reqwest::header::AUTHORIZATION,
            basic_authorization(client_id, client_secret),
        )
        .form(&[("grant_type", "client_credentials")])
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await
        .map_err(|e| {
            warning!("Token request failed: {}", e);
            ProviderError::Authentication
        })?;

    let requested_at = Utc::now();
    if !response.status().is_success() {
        warning!("Token endpoint returned status {}", response.status());
        return Err(ProviderError::Authentication);
    }

    let json = response.json::<TokenResponse>().await.map_err(|e| {
        warning!("Cannot decode token response: {}", e);
        ProviderError::Authentication
    })?;

    if json.access_token.is_empty() {
        warning!("No token returned from Spotify API");
        return Err(ProviderError::Authentication);
    }

    let Some(expires_at) = Duration::try_seconds(json.expires_in)
        .and_then(|lifetime| requested_at.checked_add_signed(lifetime))
    else {
        warning!("Token lifetime out of range: {} seconds", json.expires_in);
        return Err(ProviderError::Authentication);
    };

    Ok(Token::new(json.access_token, expires_at))
}
