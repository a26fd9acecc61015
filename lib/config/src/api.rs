use serde::{Deserialize, Serialize};

use crate::HostConfig;
use featuregate_common::prelude::*;

const TRUE: fn() -> bool = || true;

#[derive(Debug, Serialize, Clone)]
pub struct ApiConfig {
    /// Allow any origin, so a separately hosted frontend can call the API
    pub cors: bool,
    pub host: HostConfig,
}

impl<'de> Deserialize<'de> for ApiConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default = "TRUE")]
            cors: bool,
            #[serde(flatten)]
            host: Option<HostConfig>,
        }

        let helper = Helper::deserialize(deserializer)?;

        Ok(ApiConfig {
            cors: helper.cors,
            host: helper
                .host
                .unwrap_or_else(|| HostConfig::default().set_port(DEFAULT_API_LISTEN_PORT)),
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            cors: true,
            host: HostConfig::default().set_port(DEFAULT_API_LISTEN_PORT),
        }
    }
}
