use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use upscaler_logging::{upscaler_debug, upscaler_warn};
use url::Url;

use crate::{FailureKind, UpscaleError, UpscaleMetricsPayload, UpscaleRequest, UpscaleResponse};

/// Where the backend listens when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/upscale";

#[derive(Debug, Clone)]
pub struct UpscaleSettings {
    pub endpoint: Url,
    pub request_timeout: Duration,
    /// Only honoured on native targets; the browser owns connection setup.
    pub connect_timeout: Duration,
}

impl UpscaleSettings {
    pub fn with_endpoint(endpoint: Url) -> Self {
        Self {
            endpoint,
            ..Self::default()
        }
    }
}

impl Default for UpscaleSettings {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid url"),
            request_timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub trait ClientBounds: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> ClientBounds for T {}

#[cfg(target_arch = "wasm32")]
pub trait ClientBounds {}
#[cfg(target_arch = "wasm32")]
impl<T> ClientBounds for T {}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait UpscaleClient: ClientBounds {
    async fn upscale(&self, request: &UpscaleRequest) -> Result<UpscaleResponse, UpscaleError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUpscaleClient {
    settings: UpscaleSettings,
    client: reqwest::Client,
}

impl ReqwestUpscaleClient {
    pub fn new(settings: UpscaleSettings) -> Result<Self, UpscaleError> {
        let client = build_client(&settings)?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &UpscaleSettings {
        &self.settings
    }

    fn build_form(request: &UpscaleRequest) -> Result<Form, UpscaleError> {
        let part = Part::bytes(request.bytes.clone())
            .file_name(request.file_name.clone())
            .mime_str(&request.mime_type)
            .map_err(|err| {
                UpscaleError::invalid_upload(format!(
                    "cannot attach {:?}: {err}",
                    request.mime_type
                ))
            })?;
        Ok(Form::new()
            .part("file", part)
            .text("scale", request.scale.to_string())
            .text("force_cpu", request.force_cpu.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(settings: &UpscaleSettings) -> Result<reqwest::Client, UpscaleError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()
        .map_err(|err| UpscaleError::new(FailureKind::Network, err.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn build_client(_settings: &UpscaleSettings) -> Result<reqwest::Client, UpscaleError> {
    reqwest::Client::builder()
        .build()
        .map_err(|err| UpscaleError::new(FailureKind::Network, err.to_string()))
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl UpscaleClient for ReqwestUpscaleClient {
    async fn upscale(&self, request: &UpscaleRequest) -> Result<UpscaleResponse, UpscaleError> {
        let form = Self::build_form(request)?;
        upscaler_debug!(
            "POST {} file={} bytes={} scale={} force_cpu={}",
            self.settings.endpoint,
            request.file_name,
            request.bytes.len(),
            request.scale,
            request.force_cpu
        );

        let response = self
            .client
            .post(self.settings.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        interpret_response(status, &body)
    }
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    metrics: Option<UpscaleMetricsPayload>,
    #[serde(default)]
    error: Option<String>,
}

/// Maps a raw backend answer onto the client's result.
///
/// An `error` field wins over the status code, so a 200 carrying `error` is
/// still a failure and a 500 carrying one keeps the server's wording.
pub fn interpret_response(status: u16, body: &str) -> Result<UpscaleResponse, UpscaleError> {
    let success = (200..300).contains(&status);
    let parsed = match serde_json::from_str::<ResponseBody>(body) {
        Ok(parsed) => parsed,
        Err(err) if success => {
            upscaler_warn!("Undecodable upscale response: {}", err);
            return Err(UpscaleError::new(
                FailureKind::InvalidResponse,
                err.to_string(),
            ));
        }
        Err(_) => {
            return Err(UpscaleError::new(
                FailureKind::HttpStatus(status),
                format!("status {status}"),
            ))
        }
    };

    if let Some(message) = parsed.error.filter(|message| !message.trim().is_empty()) {
        return Err(UpscaleError::rejected(message));
    }
    if !success {
        return Err(UpscaleError::new(
            FailureKind::HttpStatus(status),
            format!("status {status}"),
        ));
    }

    match (parsed.url, parsed.metrics) {
        (Some(url), Some(metrics)) => Ok(UpscaleResponse { url, metrics }),
        _ => Err(UpscaleError::new(
            FailureKind::InvalidResponse,
            "response is missing url or metrics",
        )),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> UpscaleError {
    if err.is_timeout() {
        return UpscaleError::new(FailureKind::Timeout, err.to_string());
    }
    UpscaleError::new(FailureKind::Network, err.to_string())
}
