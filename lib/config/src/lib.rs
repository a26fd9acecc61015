//! Configuration management for featuregate.
//!
//! Uses [Config](https://docs.rs/config/latest/config/index.html), supports loading from:
//! - Configuration files (YAML, JSON, TOML)
//! - Environment variables (FEATUREGATE__ prefix, `__` separated)
//! - Defaults
//!
//! Environment variables override file settings. The same layered source
//! backs both the typed server options and the [`SettingsStore`] that toggle
//! values are read from on every evaluation.

use std::{
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    path::PathBuf,
    sync::Arc,
};

use anyhow::Result;
use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::{Deserialize, Serialize};

use featuregate_common::prelude::*;

pub mod api;
pub mod store;

mod tests;

pub use config::FileFormat;
pub use store::{ConfigurationStore, SettingsStore};

#[derive(Debug, Serialize, Clone)]
pub struct HostConfig {
    pub address: Option<SocketAddr>,
    pub port: u16,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            address: Some(SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0))),
            port: 0,
        }
    }
}

impl<'de> Deserialize<'de> for HostConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct HostConfigHelper {
            address: Option<SocketAddr>,
            port: Option<u16>,
        }

        let helper = HostConfigHelper::deserialize(deserializer)?;

        if helper.address.is_none() && helper.port.is_none() {
            return Err(serde::de::Error::custom(
                "HostConfig requires either 'address' or 'port'",
            ));
        }

        let port = if let Some(p) = helper.port {
            p
        } else if let Some(addr) = helper.address
            && addr.port() != 0
        {
            addr.port()
        } else {
            DEFAULT_API_LISTEN_PORT
        };

        Ok(HostConfig {
            address: helper.address,
            port,
        })
    }
}

impl HostConfig {
    pub fn address(&self) -> SocketAddr {
        let mut addr = self
            .address
            .unwrap_or(SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0)));
        if addr.port() == 0 {
            addr.set_port(self.port);
        }
        addr
    }

    pub fn url(&self) -> String {
        if self.address().ip().is_unspecified() {
            format!("http://localhost:{}", self.port)
        } else {
            format!("http://{}", self.address())
        }
    }

    pub fn set_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// One layer stacked on top of the built-in defaults.
#[derive(Debug, Clone)]
pub enum Layer {
    /// A file on disk, format inferred from its extension
    File(PathBuf),
    /// An inline document, mostly for tests and embedding
    Inline(String, FileFormat),
}

/// The ordered list of sources a configuration is built from.
///
/// Kept around after the first build so [`SettingsStore::reload`] can
/// rebuild from exactly the same inputs.
#[derive(Debug, Clone)]
pub struct Sources {
    layers: Vec<Layer>,
    environment: bool,
}

impl Default for Sources {
    fn default() -> Self {
        Self::new()
    }
}

impl Sources {
    pub fn new() -> Self {
        Sources {
            layers: Vec::new(),
            environment: true,
        }
    }

    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Skip the `FEATUREGATE__*` environment layer.
    pub fn without_environment(mut self) -> Self {
        self.environment = false;
        self
    }

    fn builder(&self) -> Result<ConfigBuilder<DefaultState>> {
        let mut builder = Config::builder().add_source(config::File::from_str(
            serde_json::to_string(&AppConfigOptions::default())?.as_str(),
            FileFormat::Json,
        ));

        for layer in &self.layers {
            builder = match layer {
                Layer::File(path) => match path.to_str() {
                    Some(filename) => builder.add_source(config::File::with_name(filename)),
                    None => {
                        log::error!("Invalid config file path: {:?}", path);
                        builder
                    }
                },
                Layer::Inline(s, format) => builder.add_source(config::File::from_str(s, *format)),
            };
        }

        if self.environment {
            builder = builder.add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR),
            );
        }

        Ok(builder)
    }

    pub fn build(&self) -> Result<Config> {
        Ok(self.builder()?.build()?)
    }
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
struct AppConfigOptions {
    /// API server configuration
    api: Option<api::ApiConfig>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: api::ApiConfig,

    /// Live key/value view used for toggle lookups
    pub settings: Arc<SettingsStore>,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_sources(Sources::new())
    }

    pub fn from_file(file: &str) -> Result<Self> {
        Self::from_sources(Sources::new().layer(Layer::File(PathBuf::from(file))))
    }

    pub fn from_multi_file(files: Vec<PathBuf>) -> Result<Self> {
        let sources = files
            .into_iter()
            .fold(Sources::new(), |sources, file| sources.layer(Layer::File(file)));
        Self::from_sources(sources)
    }

    pub fn from_yaml(s: &str) -> Result<Self> {
        Self::from_inline(s, FileFormat::Yaml)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Self::from_inline(s, FileFormat::Json)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        Self::from_inline(s, FileFormat::Toml)
    }

    fn from_inline(s: &str, format: FileFormat) -> Result<Self> {
        let layer = Layer::Inline(s.to_string(), format);
        Self::from_sources(Sources::new().layer(layer))
    }

    pub fn from_sources(sources: Sources) -> Result<Self> {
        let built = sources.build()?;

        let options: AppConfigOptions = built.clone().try_deserialize()?;

        Ok(AppConfig {
            api: options.api.unwrap_or_default(),
            settings: Arc::new(SettingsStore::new(built, sources)),
        })
    }
}
