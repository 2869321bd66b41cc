use std::fmt;

use serde::Deserialize;

pub type RequestId = u64;

/// Everything the backend needs for one upscale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpscaleRequest {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub scale: u32,
    pub force_cpu: bool,
}

/// Metrics block of a successful response. The last three fields are only sent
/// by newer backends.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpscaleMetricsPayload {
    pub technique: String,
    pub model_architecture: String,
    pub processing_time: f64,
    pub input_resolution: String,
    pub output_resolution: String,
    #[serde(default)]
    pub device_used: Option<String>,
    #[serde(default)]
    pub output_size: Option<String>,
    #[serde(default)]
    pub scale_factor: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpscaleResponse {
    pub url: String,
    pub metrics: UpscaleMetricsPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct UpscaleError {
    pub kind: FailureKind,
    pub message: String,
    /// The backend's own `error` string, when it sent one.
    pub server_message: Option<String>,
}

impl UpscaleError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            server_message: None,
        }
    }

    /// The upload could not be assembled on this side, for example an
    /// unreadable file or a malformed MIME type.
    pub fn invalid_upload(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidUpload, message)
    }

    pub(crate) fn rejected(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: FailureKind::ServerRejected,
            server_message: Some(message.clone()),
            message,
        }
    }

    /// Whether the failure came from the backend rather than the transport.
    pub fn is_server_failure(&self) -> bool {
        matches!(
            self.kind,
            FailureKind::HttpStatus(_) | FailureKind::ServerRejected | FailureKind::InvalidResponse
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUpload,
    Network,
    Timeout,
    Cancelled,
    HttpStatus(u16),
    ServerRejected,
    InvalidResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUpload => write!(f, "invalid upload"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::ServerRejected => write!(f, "rejected by server"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
        }
    }
}
