//! Upscaler engine: backend client and request lifecycle.
mod client;
mod engine;
mod timer;
mod types;

pub use client::{
    interpret_response, ReqwestUpscaleClient, UpscaleClient, UpscaleSettings, DEFAULT_ENDPOINT,
};
pub use engine::{UpscaleEngine, UpscaleTicket};
pub use types::{
    FailureKind, RequestId, UpscaleError, UpscaleMetricsPayload, UpscaleRequest, UpscaleResponse,
};
