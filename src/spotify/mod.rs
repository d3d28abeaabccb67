//! # Spotify Provider
//!
//! Implements the track, album and playlist lookups against the Spotify Web API.
//!
//! ## Authentication
//!
//! The service only reads public catalog data, so it authenticates as the
//! application itself using the client-credentials grant ([`auth`]). The bearer
//! token is kept in a [`TokenCache`] and refreshed lazily shortly before it
//! expires.
//!
//! ## API Coverage
//!
//! - `GET /tracks/{id}` - a single track with its album
//! - `GET /albums/{id}` - album metadata and the first page of its tracks,
//!   followed by `next` links to `/albums/{id}/tracks`
//! - `GET /playlists/{id}/tracks` - playlist entries, paginated through `next`
//!
//! Every request carries a `fields` filter so that Spotify only returns the
//! attributes the normalized [`crate::types::Track`] needs.
//!
//! ## Error Handling
//!
//! Upstream statuses map onto [`ProviderError`]: 400 becomes an invalid
//! identifier, 404 a missing resource, anything else a generic upstream error.
//! No request is retried.

pub mod auth;
mod catalog;

use std::{sync::Arc, time::Duration};

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::{
    config::{self, ClientCredentials},
    error::ProviderError,
    management::{Token, TokenCache},
    provider::{Capabilities, Provider},
    types::LookupKind,
    warning,
};

pub const IDENTIFIER: &str = "spotify";

/// Timeout applied to every request sent to Spotify.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const TRACK_FIELDS: &str =
    "artists(name),name,album(name,album_type,release_date,release_date_precision)";
pub const ALBUM_FIELDS: &str =
    "name,album_type,release_date,release_date_precision,tracks(next,items(artists(name),name))";
pub const PLAYLIST_FIELDS: &str = "next,items(track(artists(name),name,album(name,album_type,release_date,release_date_precision)))";

pub struct SpotifyProvider {
    credentials: ClientCredentials,
    api_url: String,
    http: Client,
    tokens: TokenCache,
    new_release_days: u32,
}

impl SpotifyProvider {
    /// Creates a provider talking to the configured Spotify endpoints.
    pub fn new(credentials: ClientCredentials, new_release_days: u32) -> Self {
        Self::with_endpoints(
            credentials,
            new_release_days,
            config::spotify_api_url(),
            config::spotify_apitoken_url(),
        )
    }

    pub fn with_endpoints(
        credentials: ClientCredentials,
        new_release_days: u32,
        api_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        let http = Client::new();
        Self {
            credentials,
            api_url: api_url.into(),
            tokens: TokenCache::new(http.clone(), token_url),
            http,
            new_release_days,
        }
    }

    /// Seeds the token cache, e.g. with a token obtained elsewhere.
    pub fn with_token(mut self, token: Token) -> Self {
        self.tokens = self.tokens.with_token(token);
        self
    }

    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    pub fn new_release_days(&self) -> u32 {
        self.new_release_days
    }

    async fn token(&self) -> Result<String, ProviderError> {
        self.tokens
            .get_token(&self.credentials.client_id, &self.credentials.client_secret)
            .await
    }

    /// Builds an API URL from path segments plus the `fields` filter.
    ///
    /// Segments are percent-encoded, so an identifier can never escape its
    /// path segment.
    fn endpoint(&self, segments: &[&str], fields: &str) -> Result<String, ProviderError> {
        let mut url = Url::parse(&self.api_url).map_err(|e| {
            ProviderError::Internal(format!("invalid Spotify API URL {}: {}", self.api_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::Internal(format!(
                    "Spotify API URL {} cannot be a base",
                    self.api_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair("fields", fields);

        Ok(url.into())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
        kind: LookupKind,
        identifier: &str,
    ) -> Result<T, ProviderError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ProviderError::Internal(format!("request to Spotify failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warning!(
                "Spotify API returned status {} for {} {}",
                status,
                kind,
                identifier
            );
            return Err(ProviderError::from_status(status, kind, identifier));
        }

        response.json::<T>().await.map_err(|e| {
            ProviderError::Internal(format!("cannot decode Spotify {} response: {}", kind, e))
        })
    }
}

impl Provider for SpotifyProvider {
    fn identifier(&self) -> &str {
        IDENTIFIER
    }

    fn capabilities(self: Arc<Self>) -> Capabilities {
        Capabilities::new()
            .with_playlist(self.clone())
            .with_album(self.clone())
            .with_track(self)
    }
}
