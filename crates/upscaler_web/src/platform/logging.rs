//! Browser logging initialization for upscaler_web.
//!
//! Records go to the developer console at the level named in the page config.

use upscaler_logging::{parse_level, upscaler_info};

pub(crate) fn initialize(level_name: &str) {
    let level = parse_level(level_name);
    upscaler_logging::initialize_for_browser(level);
    upscaler_info!("Logging to console at {}", level);
}
