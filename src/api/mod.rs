//! # API Module
//!
//! HTTP handlers of the playlister service.
//!
//! ## Endpoints
//!
//! ### Lookups
//!
//! Lookup routes are not declared here: the router in [`crate::server`] registers
//! `GET /<provider>/<lookup>/<identifier>` for every lookup a provider declares,
//! each wrapped by [`lookup_route`].
//!
//! ### Discovery and Monitoring
//!
//! - [`capabilities`] - which lookups each provider supports
//! - [`healthz`] - liveness probe returning status and version
//!
//! ## Middleware
//!
//! - [`cors`] - permissive CORS headers for the browser client
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use cick_playlister::api::{healthz, lookup_route};
//!
//! let app = Router::new()
//!     .route("/healthz", get(healthz))
//!     .route("/spotify/track/{*identifier}", lookup_route(|id| async move { lookup(id).await }));
//! ```

mod capabilities;
mod cors;
mod health;
mod lookup;

pub use capabilities::{CapabilityIndex, capabilities};
pub use cors::cors;
pub use health::healthz;
pub use lookup::{lookup_route, respond};
