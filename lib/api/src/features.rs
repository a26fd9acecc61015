//! Feature state endpoints.
//!
//! - GET /api/features - every registered toggle, name -> enabled
//! - GET /api/features/:name - a single toggle
//!
//! Values are evaluated on each request. A toggle that cannot be evaluated
//! fails the whole request instead of being reported as disabled.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
    routing::get,
};

use crate::{ApiState, FeatureToggle, ToggleError};

async fn list_features(
    State(state): State<ApiState>,
) -> Result<Json<BTreeMap<String, bool>>, ToggleError> {
    Ok(Json(state.registry.snapshot()?))
}

async fn get_feature(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<Json<bool>, ToggleError> {
    let toggle = state
        .registry
        .by_name(&name)
        .ok_or(ToggleError::UnknownToggle(name))?;

    Ok(Json(toggle.is_enabled()?))
}

pub fn create_router() -> axum::Router<ApiState> {
    axum::Router::new()
        .route("/", get(list_features))
        .route("/{name}", get(get_feature))
}
