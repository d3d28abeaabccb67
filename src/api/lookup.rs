use std::future::Future;

use axum::{
    extract::Path,
    response::{IntoResponse, Json, Response},
    routing::{MethodRouter, get},
};
use serde::Serialize;

use crate::{debug, error::ProviderError};

/// Wraps a typed lookup into a `GET` handler.
///
/// The handler passes the `identifier` path parameter (already percent-decoded)
/// to `operation` and answers through [`respond`].
pub fn lookup_route<T, F, Fut>(operation: F) -> MethodRouter
where
    T: Serialize + Send + 'static,
    F: Fn(String) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ProviderError>> + Send + 'static,
{
    get(move |Path(identifier): Path<String>| {
        let lookup = operation(identifier);
        async move { respond(lookup.await) }
    })
}

/// Serializes a lookup result.
///
/// Success becomes `200` with a JSON body; an error becomes its mapped status
/// with the error message as plain-text body.
pub fn respond<T: Serialize>(result: Result<T, ProviderError>) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(e) => {
            debug!("Lookup failed with {}: {}", e.status_code(), e);
            e.into_response()
        }
    }
}
