//! Resolution of toggle values from configuration.

use std::sync::Arc;

use log::trace;

use featuregate_common::prelude::*;
use featuregate_config::ConfigurationStore;

use crate::ToggleError;

/// Resolves the current value of a named toggle.
pub trait ToggleValueProvider: Send + Sync {
    fn evaluate(&self, name: &str) -> Result<bool, ToggleError>;
}

/// Reads `FeatureToggle:<name>` from a [`ConfigurationStore`] on every call.
#[derive(Clone)]
pub struct SettingsProvider {
    store: Arc<dyn ConfigurationStore>,
}

impl SettingsProvider {
    pub fn new(store: Arc<dyn ConfigurationStore>) -> Self {
        Self { store }
    }
}

impl ToggleValueProvider for SettingsProvider {
    fn evaluate(&self, name: &str) -> Result<bool, ToggleError> {
        if name.is_empty() {
            return Err(ToggleError::InvalidArgument(
                "toggle name must not be empty",
            ));
        }

        let key = toggle_key(name);
        let value = self
            .store
            .get(&key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ToggleError::ConfigurationMissing { key: key.clone() })?;

        let enabled = parse_bool(&value).ok_or_else(|| ToggleError::InvalidValue {
            key: key.clone(),
            value: value.clone(),
        })?;

        trace!("{} = {}", key, enabled);
        Ok(enabled)
    }
}

/// `true`/`false`, any case, surrounding whitespace ignored. Nothing else.
fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
