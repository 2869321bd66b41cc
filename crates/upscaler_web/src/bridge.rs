//! Translation between backend client results and state-machine outcomes.

use upscaler_core::{FailureKind, UpscaleFailure, UpscaleMetrics, UpscaleResult};
use upscaler_engine::{self as engine, UpscaleError, UpscaleResponse};

pub fn to_outcome(
    result: Result<UpscaleResponse, UpscaleError>,
) -> Result<UpscaleResult, UpscaleFailure> {
    result.map(to_result).map_err(to_failure)
}

fn to_result(response: UpscaleResponse) -> UpscaleResult {
    let metrics = response.metrics;
    UpscaleResult {
        output_url: response.url,
        metrics: UpscaleMetrics {
            technique: metrics.technique,
            model_architecture: metrics.model_architecture,
            processing_time_seconds: metrics.processing_time,
            input_resolution: metrics.input_resolution,
            output_resolution: metrics.output_resolution,
            device_used: metrics.device_used,
            output_size: metrics.output_size,
        },
    }
}

fn to_failure(err: UpscaleError) -> UpscaleFailure {
    let kind = match err.kind {
        engine::FailureKind::InvalidUpload => FailureKind::InvalidUpload,
        engine::FailureKind::Network => FailureKind::Network,
        engine::FailureKind::Timeout => FailureKind::Timeout,
        engine::FailureKind::Cancelled => FailureKind::Cancelled,
        engine::FailureKind::HttpStatus(_)
        | engine::FailureKind::ServerRejected
        | engine::FailureKind::InvalidResponse => FailureKind::Server,
    };
    match err.server_message {
        Some(message) => UpscaleFailure::new(kind).with_server_message(message),
        None => UpscaleFailure::new(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upscaler_engine::interpret_response;

    #[test]
    fn server_rejection_keeps_message() {
        let failure = to_outcome(interpret_response(500, r#"{"error":"model unavailable"}"#))
            .unwrap_err();
        assert_eq!(failure.kind, FailureKind::Server);
        assert_eq!(failure.user_message(), "model unavailable");
    }

    #[test]
    fn bare_status_becomes_generic_server_error() {
        let failure = to_outcome(interpret_response(502, "")).unwrap_err();
        assert_eq!(failure.user_message(), "Server error");
    }

    #[test]
    fn local_upload_failure_does_not_blame_the_network() {
        let failure = to_outcome(Err(UpscaleError::invalid_upload("read failed"))).unwrap_err();
        assert_eq!(failure.kind, FailureKind::InvalidUpload);
        assert_eq!(
            failure.user_message(),
            "The selected file could not be prepared for upload"
        );
    }

    #[test]
    fn success_carries_optional_metrics() {
        let body = r#"{"url":"/outputs/x.png","metrics":{"technique":"t","model_architecture":"m","processing_time":2.5,"input_resolution":"1x1","output_resolution":"4x4","device_used":"GPU"}}"#;
        let result = to_outcome(interpret_response(200, body)).unwrap();
        assert_eq!(result.output_url, "/outputs/x.png");
        assert_eq!(result.metrics.time_text(), "2.5s");
        assert_eq!(result.metrics.device_used.as_deref(), Some("GPU"));
        assert_eq!(result.metrics.output_size, None);
    }
}
