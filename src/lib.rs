//! CICK Playlister service library
//!
//! This library turns public streaming-provider identifiers (playlists, albums and
//! tracks) into a provider-agnostic track listing. Each track is tagged as a single
//! and/or a new release, and the result is served over HTTP for the playlister
//! client UI.
//!
//! # Modules
//!
//! - `api` - HTTP handlers, the lookup adapter and CORS middleware
//! - `config` - Configuration defaults, `.env` loading and credentials
//! - `error` - The provider error taxonomy and its HTTP status mapping
//! - `logging` - Console subscriber and level filter behind the logging macros
//! - `management` - Bearer token caching
//! - `provider` - Capability descriptors and the pagination abstraction
//! - `server` - Capability router and HTTP server startup
//! - `spotify` - Spotify Web API provider implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Release freshness classification and small helpers

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod management;
pub mod provider;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for startup and configuration plumbing.
///
/// Provider operations return [`error::ProviderError`] instead, so that every
/// failure maps onto a well-defined HTTP status.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[doc(hidden)]
pub use tracing;

/// Prints an informational message with a blue bullet point.
///
/// Emits an `info` event that the console subscriber prints behind a blue "o"
/// indicator. Used for general status updates such as the listening address.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// info!("Loaded credentials from {}", path.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    $crate::tracing::info!($($arg)*);
  })
}

/// Prints a success message with a green checkmark.
///
/// Emits an `info` event on the success target, which the console subscriber
/// prints behind a green "✓" indicator. Filtered like [`info!`].
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Server stopped");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    $crate::tracing::info!(target: $crate::logging::SUCCESS_TARGET, $($arg)*);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems such as an unparseable release date or an
/// upstream request that failed for a single lookup.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("Cannot classify release freshness: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    $crate::tracing::warn!($($arg)*);
  })
}

/// Prints a diagnostic message with a dimmed marker.
///
/// Only shown when the service runs with `--log-level debug` or `trace`.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// debug!("Fetching page {}: {}", count, url);
/// ```
#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => ({
    $crate::tracing::debug!($($arg)*);
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Emits an `error` event and immediately terminates the program with exit
/// code 1.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// This macro exits right after logging. It is only used during startup, never
/// on the request path.
///
/// # Example
///
/// ```
/// error!("Cannot load credentials. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    $crate::tracing::error!($($arg)*);
    std::process::exit(1);
  })
}
