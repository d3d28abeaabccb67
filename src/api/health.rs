use axum::{http::StatusCode, response::Json};
use serde_json::{Value, json};

/// Liveness probe.
pub async fn healthz() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
