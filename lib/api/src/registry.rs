//! The fixed set of toggles known to the process.
//!
//! Registration is explicit: every toggle is listed in
//! [`FeatureRegistry::with_defaults`]. There is no discovery step.

use std::{any::Any, collections::BTreeMap, sync::Arc};

use crate::{
    FeatureToggle, ToggleError, ToggleValueProvider,
    toggles::{NavigationFeature, ValuesFeature},
};

struct Entry {
    toggle: Arc<dyn FeatureToggle>,
    any: Arc<dyn Any + Send + Sync>,
}

#[derive(Default)]
pub struct FeatureRegistry {
    entries: Vec<Entry>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every toggle this build supports, all reading from `provider`.
    pub fn with_defaults(provider: Arc<dyn ToggleValueProvider>) -> Result<Self, ToggleError> {
        let mut registry = Self::new();
        registry.register(Arc::new(ValuesFeature::new(provider.clone())))?;
        registry.register(Arc::new(NavigationFeature::new(provider)))?;
        Ok(registry)
    }

    pub fn register<T: FeatureToggle>(&mut self, toggle: Arc<T>) -> Result<(), ToggleError> {
        let name = toggle.name();
        if self.by_name(name).is_some() {
            return Err(ToggleError::DuplicateToggle(name.to_string()));
        }
        self.entries.push(Entry {
            toggle: toggle.clone(),
            any: toggle,
        });
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn FeatureToggle>> {
        self.entries.iter().map(|e| &e.toggle)
    }

    /// Look up the registered instance of a toggle type.
    pub fn get<T: FeatureToggle>(&self) -> Option<Arc<T>> {
        self.entries
            .iter()
            .find_map(|e| e.any.clone().downcast::<T>().ok())
    }

    pub fn by_name(&self, name: &str) -> Option<&Arc<dyn FeatureToggle>> {
        self.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().map(|t| t.name())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evaluate every toggle now. Fails on the first toggle that cannot be
    /// evaluated rather than reporting a partial map.
    pub fn snapshot(&self) -> Result<BTreeMap<String, bool>, ToggleError> {
        self.iter()
            .map(|t| t.is_enabled().map(|on| (t.name().to_string(), on)))
            .collect()
    }
}
