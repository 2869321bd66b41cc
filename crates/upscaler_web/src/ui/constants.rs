//! Element ids the page markup must provide.

pub const UPLOAD_BOX: &str = "upload-box";
pub const FILE_INPUT: &str = "file-input";
pub const UPLOAD_PROMPT: &str = "upload-prompt";
pub const FILE_DISPLAY: &str = "file-display";
pub const FILE_NAME: &str = "file-name";
pub const FILE_SIZE: &str = "file-size";

pub const MODE_SELECT: &str = "mode";
pub const SCALE_SELECT: &str = "scale";
pub const UPSCALE_BUTTON: &str = "upscale-btn";

pub const RESULTS: &str = "results";
pub const ORIGINAL_IMAGE: &str = "original-image";
pub const UPSCALED_IMAGE: &str = "upscaled-image";
pub const COMPARISON_CONTAINER: &str = "comparison-container";
pub const COMPARISON_WRAPPER: &str = "comparison-wrapper";
pub const DIVIDER: &str = "divider";
pub const DOWNLOAD_BUTTON: &str = "download-btn";

pub const TECHNIQUE_METRIC: &str = "technique-metric";
pub const MODEL_METRIC: &str = "model-metric";
pub const TIME_METRIC: &str = "time-metric";
pub const RESOLUTION_METRIC: &str = "resolution-metric";
pub const DEVICE_METRIC: &str = "device-metric";
pub const OUTPUT_SIZE_METRIC: &str = "output-size-metric";

pub const HELP_BUTTON: &str = "help-btn";
pub const HELP_MODAL: &str = "help-modal";
pub const HELP_CLOSE: &str = "help-close";
pub const RESEARCH_BUTTON: &str = "research-btn";
pub const RESEARCH_MODAL: &str = "research-modal";
pub const RESEARCH_CLOSE: &str = "research-close";

pub const NOTIFICATION_CONTAINER: &str = "notification-container";
pub const DARK_MODE_TOGGLE: &str = "dark-mode-toggle";
pub const CONFIG_SCRIPT: &str = "upscaler-config";

/// Every id looked up at start-up.
pub const REQUIRED_IDS: &[&str] = &[
    UPLOAD_BOX,
    FILE_INPUT,
    UPLOAD_PROMPT,
    FILE_DISPLAY,
    FILE_NAME,
    FILE_SIZE,
    MODE_SELECT,
    SCALE_SELECT,
    UPSCALE_BUTTON,
    RESULTS,
    ORIGINAL_IMAGE,
    UPSCALED_IMAGE,
    COMPARISON_CONTAINER,
    COMPARISON_WRAPPER,
    DIVIDER,
    DOWNLOAD_BUTTON,
    TECHNIQUE_METRIC,
    MODEL_METRIC,
    TIME_METRIC,
    RESOLUTION_METRIC,
    DEVICE_METRIC,
    OUTPUT_SIZE_METRIC,
    HELP_BUTTON,
    HELP_MODAL,
    HELP_CLOSE,
    RESEARCH_BUTTON,
    RESEARCH_MODAL,
    RESEARCH_CLOSE,
    NOTIFICATION_CONTAINER,
    DARK_MODE_TOGGLE,
];

pub const CLASS_HIDDEN: &str = "hidden";
pub const CLASS_DRAGOVER: &str = "dragover";
pub const CLASS_PROCESSING: &str = "processing";
pub const CLASS_ACTIVE: &str = "active";
pub const CLASS_DARK_MODE: &str = "dark-mode";
pub const CLASS_MODAL_OPEN: &str = "modal-open";
pub const CLASS_LEAVING: &str = "leaving";
