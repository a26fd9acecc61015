use crate::{ApiState, ToggleError, features, registry::FeatureRegistry, values};

use axum::{Router, http::StatusCode, routing::get};

pub fn create_router(registry: &FeatureRegistry) -> Result<Router<ApiState>, ToggleError> {
    Ok(Router::new()
        .route("/health", get(health))
        .nest("/api/features", features::create_router())
        .nest("/api/values", values::create_router(registry)?))
}

async fn health() -> StatusCode {
    StatusCode::OK
}
