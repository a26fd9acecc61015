//! HTTP client for the featuregate API.
//!
//! Fetches the feature map (and the gated values resource) for display.
//! Failures are logged and returned; there is no retry and no fallback.

use std::collections::BTreeMap;

use log::error;
use reqwest::{StatusCode, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Feature name -> enabled, as reported by `/api/features`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Features(BTreeMap<String, bool>);

impl Features {
    /// `None` when the server did not report `name`.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    /// Display helper: a name the server did not report reads as disabled,
    /// the same way an absent property is falsy in a template binding. Use
    /// [`Features::get`] to tell the two apart.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.get(name).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, bool>> for Features {
    fn from(map: BTreeMap<String, bool>) -> Self {
        Features(map)
    }
}

/// Result of fetching the gated values resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Values {
    Available(Vec<String>),
    /// The gate answered instead of the resource; holds its message
    Unavailable(String),
}

pub struct FeaturesClient {
    http: reqwest::Client,
    base: Url,
}

impl FeaturesClient {
    pub fn new(base: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(base).inspect_err(|e| error!("error = {}", e))?;
        // so that join() appends instead of replacing the last segment
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub async fn features(&self) -> Result<Features, ClientError> {
        let (_, body) = self.fetch("api/features").await?;
        decode(&body)
    }

    pub async fn values(&self) -> Result<Values, ClientError> {
        let (content_type, body) = self.fetch("api/values").await?;

        if content_type.is_some_and(|ct| ct.starts_with("application/json")) {
            decode(&body).map(Values::Available)
        } else {
            Ok(Values::Unavailable(String::from_utf8_lossy(&body).into_owned()))
        }
    }

    async fn fetch(&self, path: &str) -> Result<(Option<String>, Vec<u8>), ClientError> {
        let url = self.base.join(path).inspect_err(|e| error!("error = {}", e))?;

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .inspect_err(|e| error!("error = {}", e))?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp
            .bytes()
            .await
            .inspect_err(|e| error!("error = {}", e))?;

        if !status.is_success() {
            let err = ClientError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            };
            error!("error = {}", err);
            return Err(err);
        }

        Ok((content_type, body.to_vec()))
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    Ok(serde_json::from_slice(body).inspect_err(|e| error!("error = {}", e))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_gets_trailing_slash() {
        let client = FeaturesClient::new("http://localhost:5000/prefix").unwrap();
        assert_eq!(client.base().as_str(), "http://localhost:5000/prefix/");
        assert_eq!(
            client.base().join("api/features").unwrap().as_str(),
            "http://localhost:5000/prefix/api/features"
        );
    }

    #[test]
    fn bad_base_url() {
        assert!(matches!(
            FeaturesClient::new("not a url"),
            Err(ClientError::Url(_))
        ));
    }

    #[test]
    fn features_decode_from_map() {
        let features: Features =
            serde_json::from_str(r#"{"ValuesFeature": true, "NavigationFeature": false}"#)
                .unwrap();

        assert!(features.is_enabled("ValuesFeature"));
        assert!(!features.is_enabled("NavigationFeature"));
        assert!(!features.is_enabled("Unknown"));
        assert_eq!(features.get("NavigationFeature"), Some(false));
        assert_eq!(features.get("Unknown"), None);
        assert_eq!(
            features.iter().collect::<Vec<_>>(),
            vec![("NavigationFeature", false), ("ValuesFeature", true)]
        );
    }
}
