//! Core application orchestration module.
//!
//! The App struct ties the configuration, the toggle registry and the API
//! server together, and applies system messages:
//! - `Reload` re-reads configuration sources into the live settings store
//! - `Shutdown` stops the API server and the config watcher
//!
//! Toggle values are never copied out of the settings store, so a reload is
//! visible to the next request without touching the registry.

use std::sync::Arc;

use anyhow::Result;
use log::{error, info};
use tokio::sync::broadcast;

use featuregate_api::{self as api, FeatureRegistry};
use featuregate_common::SysMessage;
use featuregate_config::AppConfig;

pub struct App {
    pub config: AppConfig,
    /// Built once here; never changes for the life of the process
    pub registry: Arc<FeatureRegistry>,
    sys: broadcast::Sender<SysMessage>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let sys = broadcast::channel::<SysMessage>(4).0;
        let registry = api::default_registry(config.settings.clone())?;

        info!(
            "... registered {} feature toggles: {}",
            registry.len(),
            registry.names().collect::<Vec<_>>().join(", ")
        );

        Ok(App {
            config,
            registry: Arc::new(registry),
            sys,
        })
    }

    pub async fn run(&self) -> Result<()> {
        self.config_watch();

        info!("... initializing API server");
        api::serve(&self.config, self.registry.clone(), self.sys.subscribe()).await
    }

    pub fn update_channel(&self) -> broadcast::Sender<SysMessage> {
        self.sys.clone()
    }

    pub fn reload(&self) -> Result<()> {
        self.config.settings.reload()
    }

    fn config_watch(&self) {
        let mut rx = self.sys.subscribe();
        let settings = self.config.settings.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(SysMessage::Reload) => {
                        info!("reloading configuration...");
                        settings
                            .reload()
                            .inspect_err(|e| error!("failed to reload config: {}", e))
                            .ok();
                    }
                    Ok(SysMessage::Shutdown) | Err(broadcast::error::RecvError::Closed) => {
                        info!("shutting down config watcher...");
                        return;
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
        });
    }
}
