//! Browser side of the page: DOM wiring, effect execution and persistence.

mod app;
mod dom;
mod effects;
mod logging;
mod persistence;

use thiserror::Error;

use crate::config::ConfigError;

pub(crate) use app::run_app;

#[derive(Debug, Error)]
pub(crate) enum PlatformError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("element #{0} is missing from the page")]
    MissingElement(&'static str),
    #[error("element #{id} is not a {expected}")]
    WrongElementType {
        id: &'static str,
        expected: &'static str,
    },
    #[error("DOM call failed: {0}")]
    Js(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot create upscale client: {0}")]
    Engine(#[from] upscaler_engine::UpscaleError),
}

impl From<wasm_bindgen::JsValue> for PlatformError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        PlatformError::Js(format!("{value:?}"))
    }
}
