//! Error taxonomy for provider lookups.
//!
//! Every failure a lookup can produce is a [`ProviderError`]. The HTTP layer only
//! needs [`ProviderError::status_code`] and the error's `Display` text to build a
//! response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::types::LookupKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider rejected the identifier (upstream 400).
    #[error("Invalid {kind} ID: {identifier}")]
    InvalidIdentifier {
        kind: LookupKind,
        identifier: String,
    },

    /// The provider has no such resource (upstream 404).
    #[error("{} not found: {identifier}", .kind.title())]
    NotFound {
        kind: LookupKind,
        identifier: String,
    },

    /// The client-credentials exchange failed or returned no usable token.
    #[error("Failed to authenticate with application credentials")]
    Authentication,

    /// A local failure unrelated to the requested resource.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Any other non-success upstream status.
    #[error("Provider API returned status: {status}")]
    Upstream { status: u16 },
}

impl ProviderError {
    /// Maps an unsuccessful upstream status to the matching error.
    pub fn from_status(status: StatusCode, kind: LookupKind, identifier: &str) -> Self {
        match status {
            StatusCode::BAD_REQUEST => ProviderError::InvalidIdentifier {
                kind,
                identifier: identifier.to_string(),
            },
            StatusCode::NOT_FOUND => ProviderError::NotFound {
                kind,
                identifier: identifier.to_string(),
            },
            other => ProviderError::Upstream {
                status: other.as_u16(),
            },
        }
    }

    /// HTTP status the service answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProviderError::InvalidIdentifier { .. } => StatusCode::BAD_REQUEST,
            ProviderError::NotFound { .. } => StatusCode::NOT_FOUND,
            ProviderError::Authentication => StatusCode::UNAUTHORIZED,
            ProviderError::Internal(_) | ProviderError::Upstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
