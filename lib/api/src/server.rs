//! HTTP API server for featuregate.
//!
//! Provides REST endpoints for:
//! - Feature state (every registered toggle and its current value)
//! - The sample values resource, gated by `ValuesFeature`
//!
//! # Architecture
//! - Axum for HTTP routing and middleware
//! - Tower HTTP for CORS
//! - Shared, read-only registry (Arc); toggle values come from the
//!   configuration store on every request

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use log::{info, warn};
use tokio::sync::broadcast::{self, error::RecvError};
use tower_http::cors::CorsLayer;

use featuregate_common::SysMessage;
use featuregate_config::AppConfig;

use crate::{ApiState, FeatureRegistry, FeatureToggle, ToggleError, routes::create_router};

/// Build the application router over `registry`, with state attached.
pub fn router(registry: Arc<FeatureRegistry>) -> Result<Router, ToggleError> {
    Ok(create_router(&registry)?.with_state(ApiState { registry }))
}

/// Initialize and run the API server until a shutdown message arrives.
///
/// Toggles without a configuration value are reported at startup but do
/// not stop the server; requests touching them fail until the
/// configuration is fixed.
pub async fn serve(
    config: &AppConfig,
    registry: Arc<FeatureRegistry>,
    mut shutdown: broadcast::Receiver<SysMessage>,
) -> Result<()> {
    for toggle in registry.iter() {
        if let Err(e) = toggle.is_enabled() {
            warn!("{}: {}", toggle.name(), e);
        }
    }

    let mut app = router(registry)?;
    if config.api.cors {
        app = app.layer(CorsLayer::permissive());
    }

    let listener = tokio::net::TcpListener::bind(&config.api.host.address()).await?;

    info!("API server listening on {}", config.api.host.url());

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            loop {
                match shutdown.recv().await {
                    Ok(SysMessage::Shutdown) | Err(RecvError::Closed) => break,
                    Ok(_) | Err(RecvError::Lagged(_)) => continue,
                }
            }
            info!("API shutting down...");
        })
        .await?;
    Ok(())
}
