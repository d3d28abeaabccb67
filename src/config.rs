//! Configuration management for the playlister service.
//!
//! This module holds the service defaults and loads the values that come from the
//! environment: the optional `.env` file, Spotify endpoint overrides and the
//! application credentials.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command-line flags (port, log level, new-release threshold, credentials path)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults

use std::{
    env, fmt,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::Res;

pub const APP_NAME: &str = "cick-playlister";
pub const DEFAULT_PORT: u16 = 8123;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_NEW_RELEASE_DAYS: u32 = 90;

/// Name of the credentials file looked up next to the executable.
pub const CREDENTIALS_FILE: &str = "credentials.json";

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/cick-playlister/.env`
/// - macOS: `~/Library/Application Support/cick-playlister/.env`
/// - Windows: `%LOCALAPPDATA%/cick-playlister/.env`
///
/// A missing file is not an error; variables already set in the process
/// environment take precedence over the file.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| format!("cannot load {}: {}", path.display(), e))
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_NAME);
    path.push(".env");
    path
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTIFY_API_URL`, falling back to `https://api.spotify.com/v1`.
pub fn spotify_api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Returns the Spotify token endpoint used for the client-credentials exchange.
///
/// Reads `SPOTIFY_API_TOKEN_URL`, falling back to
/// `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| DEFAULT_SPOTIFY_API_TOKEN_URL.to_string())
}

/// Application credentials registered with a provider.
#[derive(Clone, Deserialize)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

// The secret must never end up in logs.
impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Contents of `credentials.json`.
///
/// ```json
/// { "spotify": { "client_id": "...", "client_secret": "..." } }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsConfig {
    pub spotify: ClientCredentials,
}

pub fn parse_credentials(json: &str) -> Result<CredentialsConfig, String> {
    serde_json::from_str(json).map_err(|e| format!("invalid credentials file: {}", e))
}

/// Path of `credentials.json` next to the running executable.
pub fn sidecar_credentials_path() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CREDENTIALS_FILE)))
}

/// Reads Spotify credentials from `SPOTIFY_CLIENT_ID` and `SPOTIFY_CLIENT_SECRET`.
pub fn credentials_from_env() -> Option<CredentialsConfig> {
    let client_id = env::var("SPOTIFY_CLIENT_ID").ok().filter(|v| !v.is_empty())?;
    let client_secret = env::var("SPOTIFY_CLIENT_SECRET")
        .ok()
        .filter(|v| !v.is_empty())?;
    Some(CredentialsConfig {
        spotify: ClientCredentials::new(client_id, client_secret),
    })
}

/// Loads provider credentials.
///
/// Sources are tried in order:
/// 1. `explicit`, when given (it must exist)
/// 2. `credentials.json` next to the executable
/// 3. the `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET` environment variables
pub async fn load_credentials(explicit: Option<PathBuf>) -> Res<CredentialsConfig> {
    if let Some(path) = explicit {
        return read_credentials_file(&path).await;
    }

    if let Some(path) = sidecar_credentials_path().filter(|p| p.is_file()) {
        return read_credentials_file(&path).await;
    }

    credentials_from_env().ok_or_else(|| {
        format!(
            "no credentials found: provide --credentials, a {} next to the executable, or SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET",
            CREDENTIALS_FILE
        )
        .into()
    })
}

async fn read_credentials_file(path: &Path) -> Res<CredentialsConfig> {
    let content = async_fs::read_to_string(path)
        .await
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    Ok(parse_credentials(&content)?)
}
