//! Feature toggles read from configuration, and the HTTP API that reports
//! and enforces them.
//!
//! configuration store -> [`ToggleValueProvider`] -> [`FeatureToggle`] ->
//! [`FeatureGate`] (blocks requests) or `/api/features` (reports state)

mod error;
mod features;
pub mod gate;
mod provider;
pub mod registry;
mod routes;
mod server;
pub mod toggles;
mod values;

use std::sync::Arc;

pub use error::ToggleError;
pub use gate::{FeatureGate, GateDecision, feature_gate};
pub use provider::{SettingsProvider, ToggleValueProvider};
pub use registry::FeatureRegistry;
pub use server::{router, serve};
pub use toggles::{FeatureToggle, NavigationFeature, ValuesFeature};

use featuregate_config::ConfigurationStore;

#[derive(Clone)]
pub(crate) struct ApiState {
    pub registry: Arc<FeatureRegistry>,
}

/// The registry of built-in toggles, resolved from `store`.
pub fn default_registry(
    store: Arc<dyn ConfigurationStore>,
) -> Result<FeatureRegistry, ToggleError> {
    FeatureRegistry::with_defaults(Arc::new(SettingsProvider::new(store)))
}
