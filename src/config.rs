use crate::error::{PixiError, Result};
use reqwest::Url;
use std::env;

pub const ENDPOINT_ENV: &str = "PIXI_ENDPOINT";

const HEALTH_PATH: &str = "health";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub endpoint: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let endpoint = env::var(ENDPOINT_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());

        Config { endpoint }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Parsed generation endpoint. Only `http` and `https` are accepted.
    pub fn endpoint_url(&self) -> Result<Url> {
        let raw = self.endpoint.as_deref().ok_or_else(|| {
            PixiError::Config(format!(
                "No generation endpoint configured (set {})",
                ENDPOINT_ENV
            ))
        })?;

        let url = Url::parse(raw.trim())
            .map_err(|e| PixiError::Config(format!("Invalid endpoint '{}': {}", raw, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(PixiError::Config(format!(
                "Unsupported endpoint scheme '{}'",
                other
            ))),
        }
    }

    /// The service's liveness probe, a sibling of the generation route:
    /// `https://host/generate-image` -> `https://host/health`. A trailing
    /// slash on the endpoint is ignored.
    pub fn health_url(&self) -> Result<Url> {
        let mut url = self.endpoint_url()?;
        url.path_segments_mut()
            .map_err(|_| PixiError::Config("Cannot derive health URL from endpoint".into()))?
            .pop_if_empty()
            .pop()
            .push(HEALTH_PATH);
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }
}
