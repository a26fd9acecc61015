//! Read-only key/value view over the layered configuration.

use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use arc_swap::ArcSwap;
use config::{Config, Source};
use log::{debug, info};

use featuregate_common::prelude::*;

use crate::Sources;

/// A key/value source that toggles are resolved from.
///
/// Keys use `:` between segments (`FeatureToggle:ValuesFeature`), values are
/// returned as strings regardless of how the source typed them.
pub trait ConfigurationStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigurationStore for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// The process-wide configuration, swappable as a whole.
///
/// Reads never lock; a reload builds a fresh [`Config`] from the same
/// sources and publishes it atomically, so the next lookup sees it.
#[derive(Debug)]
pub struct SettingsStore {
    current: ArcSwap<Config>,
    sources: Sources,
}

impl SettingsStore {
    pub fn new(config: Config, sources: Sources) -> Self {
        SettingsStore {
            current: ArcSwap::from_pointee(config),
            sources,
        }
    }

    pub fn from_sources(sources: Sources) -> Result<Self> {
        Ok(Self::new(sources.build()?, sources))
    }

    /// Rebuild from the same sources (files are re-read from disk).
    pub fn reload(&self) -> Result<()> {
        let built = self.sources.build()?;
        self.current.store(Arc::new(built));
        info!("configuration reloaded");
        Ok(())
    }

    pub fn replace(&self, config: Config) {
        self.current.store(Arc::new(config));
    }
}

impl ConfigurationStore for SettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = key.replace(TOGGLE_KEY_SEPARATOR, ".");
        let config = self.current.load();

        // environment overrides arrive lower-cased, so they are tried first
        [path.to_lowercase(), path.clone()]
            .iter()
            .find_map(|p| match config.get_string(p) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!("{}: {}", p, e);
                    None
                }
            })
            .or_else(|| find_ignoring_case(&config, &path))
    }
}

/// Walks the configuration tree matching each segment of `path` without
/// regard to ASCII case, so `featureToggle.valuesFeature` in a file still
/// resolves `FeatureToggle:ValuesFeature`.
fn find_ignoring_case(config: &Config, path: &str) -> Option<String> {
    let mut table = config.collect().ok()?;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let value = table
            .into_iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(segment).then_some(v))?;

        if segments.peek().is_none() {
            return value.into_string().ok();
        }
        table = value.into_table().ok()?;
    }
    None
}
