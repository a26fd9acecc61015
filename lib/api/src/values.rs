//! Sample resource guarded by [`ValuesFeature`].
//!
//! - GET /api/values
//! - GET /api/values/:id

use axum::{Json, extract::Path, middleware, routing::get};

use crate::{
    ApiState, ToggleError,
    gate::{FeatureGate, feature_gate},
    registry::FeatureRegistry,
    toggles::ValuesFeature,
};

async fn list_values() -> Json<Vec<String>> {
    Json(vec!["value1".to_string(), "value2".to_string()])
}

async fn get_value(Path(_id): Path<i32>) -> Json<String> {
    Json("value".to_string())
}

pub fn create_router(registry: &FeatureRegistry) -> Result<axum::Router<ApiState>, ToggleError> {
    let gate = FeatureGate::for_toggle::<ValuesFeature>(registry)?;

    Ok(axum::Router::new()
        .route("/", get(list_values))
        .route("/{id}", get(get_value))
        .route_layer(middleware::from_fn_with_state(gate, feature_gate)))
}
