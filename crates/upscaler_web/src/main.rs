// Only the browser build drives these; host builds compile them for tests.
#[cfg(any(target_arch = "wasm32", test))]
mod bridge;
#[cfg(any(target_arch = "wasm32", test))]
mod config;
#[cfg(any(target_arch = "wasm32", test))]
mod ui;

#[cfg(target_arch = "wasm32")]
mod platform;

#[cfg(target_arch = "wasm32")]
fn main() {
    if let Err(err) = platform::run_app() {
        upscaler_logging::upscaler_error!("Upscaler page failed to start: {}", err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("upscaler_web runs in the browser; build it for wasm32-unknown-unknown.");
}
