//! Page configuration read from the `upscaler-config` JSON block.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use upscaler_core::{Limits, UpscaleMode};
use upscaler_engine::UpscaleSettings;
use upscaler_logging::upscaler_warn;
use url::Url;

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Absolute, or relative to the page location.
    pub endpoint: String,
    pub max_upload_mb: u64,
    pub request_timeout_secs: u64,
    pub gpu_available: bool,
    pub theme_storage_key: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: "/upscale".to_string(),
            max_upload_mb: 10,
            request_timeout_secs: 300,
            gpu_available: false,
            theme_storage_key: upscaler_core::THEME_STORAGE_KEY.to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("page configuration is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("endpoint {endpoint:?} cannot be resolved against {base}: {source}")]
    Endpoint {
        endpoint: String,
        base: String,
        source: url::ParseError,
    },
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parses the block if there is one; malformed JSON falls back to defaults.
    pub fn from_page_block(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => Self::default(),
            Some(raw) => Self::from_json(raw).unwrap_or_else(|err| {
                upscaler_warn!("Using default configuration: {}", err);
                Self::default()
            }),
        }
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_upload_bytes: self.max_upload_mb.saturating_mul(MIB),
        }
    }

    pub fn initial_mode(&self) -> UpscaleMode {
        if self.gpu_available {
            UpscaleMode::Gpu
        } else {
            UpscaleMode::Cpu
        }
    }

    pub fn upscale_settings(&self, page_url: &str) -> Result<UpscaleSettings, ConfigError> {
        let endpoint_error = |source| ConfigError::Endpoint {
            endpoint: self.endpoint.clone(),
            base: page_url.to_string(),
            source,
        };
        let base = Url::parse(page_url).map_err(endpoint_error)?;
        let endpoint = base.join(&self.endpoint).map_err(endpoint_error)?;
        Ok(UpscaleSettings {
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            ..UpscaleSettings::with_endpoint(endpoint)
        })
    }
}
