use std::{collections::BTreeMap, sync::Arc};

use axum::{Extension, response::Json};

/// Provider identifier to the names of the lookups registered for it.
pub type CapabilityIndex = BTreeMap<String, Vec<&'static str>>;

pub async fn capabilities(
    Extension(index): Extension<Arc<CapabilityIndex>>,
) -> Json<CapabilityIndex> {
    Json(index.as_ref().clone())
}
