use std::fmt;

use crate::ScaleFactor;

#[derive(Debug, Clone, PartialEq)]
pub struct UpscaleMetrics {
    pub technique: String,
    pub model_architecture: String,
    pub processing_time_seconds: f64,
    pub input_resolution: String,
    pub output_resolution: String,
    pub device_used: Option<String>,
    pub output_size: Option<String>,
}

impl UpscaleMetrics {
    pub fn time_text(&self) -> String {
        format!("{}s", self.processing_time_seconds)
    }

    pub fn resolution_text(&self) -> String {
        format!("{} → {}", self.input_resolution, self.output_resolution)
    }
}

/// A successful `/upscale` response.
#[derive(Debug, Clone, PartialEq)]
pub struct UpscaleResult {
    pub output_url: String,
    pub metrics: UpscaleMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The file could not be turned into an upload.
    InvalidUpload,
    /// The request never produced a response.
    Network,
    Timeout,
    Cancelled,
    /// Non-success status or an `error` field in the body.
    Server,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUpload => write!(f, "invalid upload"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Server => write!(f, "server error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpscaleFailure {
    pub kind: FailureKind,
    pub server_message: Option<String>,
}

impl UpscaleFailure {
    pub fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            server_message: None,
        }
    }

    pub fn with_server_message(mut self, message: impl Into<String>) -> Self {
        self.server_message = Some(message.into());
        self
    }

    /// The server's own message when it sent one, otherwise a generic text.
    pub fn user_message(&self) -> String {
        if let Some(message) = self
            .server_message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
        {
            return message.to_string();
        }
        match self.kind {
            FailureKind::Server => "Server error".to_string(),
            FailureKind::InvalidUpload => {
                "The selected file could not be prepared for upload".to_string()
            }
            FailureKind::Network => "Could not reach the upscaling service".to_string(),
            FailureKind::Timeout => "The upscaling service did not answer in time".to_string(),
            FailureKind::Cancelled => "The request was cancelled".to_string(),
        }
    }
}

/// `upscaled_{scale}x_{base}.png`, where `base` is the name before its first `.`.
pub fn download_filename(scale: ScaleFactor, original_name: &str) -> String {
    let base = original_name.split('.').next().unwrap_or_default();
    format!("upscaled_{}x_{}.png", scale.factor(), base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_generic_text() {
        let failure =
            UpscaleFailure::new(FailureKind::Server).with_server_message("model unavailable");
        assert_eq!(failure.user_message(), "model unavailable");
    }

    #[test]
    fn blank_server_message_falls_back() {
        let failure = UpscaleFailure::new(FailureKind::Server).with_server_message("  ");
        assert_eq!(failure.user_message(), "Server error");
    }

    #[test]
    fn filename_pattern() {
        assert_eq!(download_filename(ScaleFactor::X4, "cat.jpg"), "upscaled_4x_cat.png");
        assert_eq!(
            download_filename(ScaleFactor::X8, "my.holiday.png"),
            "upscaled_8x_my.png"
        );
    }
}
