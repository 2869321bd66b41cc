#![deny(missing_docs)]
//! Shared logging utilities for the upscaler workspace.
//!
//! This crate provides the `upscaler_*` logging macros used across the codebase,
//! a minimal test initializer for the global logger and, on `wasm32`, the
//! browser console initializer used by the page controller.

use log::LevelFilter;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! upscaler_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! upscaler_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! upscaler_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! upscaler_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! upscaler_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Parses a level name from configuration (`"off"`, `"error"`, ..., `"trace"`).
///
/// Unknown names fall back to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
#[cfg(not(target_arch = "wasm32"))]
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

/// Routes panics and `log` records to the browser console.
///
/// Safe to call more than once; later calls keep the first logger.
#[cfg(target_arch = "wasm32")]
pub fn initialize_for_browser(level: LevelFilter) {
    console_error_panic_hook::set_once();
    let Some(level) = level.to_level() else {
        return;
    };
    let _ = console_log::init_with_level(level);
}
