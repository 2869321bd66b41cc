//! Upscaler core: pure state machine and view-model helpers for the upscaling page.
mod effect;
mod modal;
mod msg;
mod notification;
mod outcome;
mod scale;
mod slider;
mod state;
mod theme;
mod update;
mod validation;
mod view_model;

pub use effect::Effect;
pub use modal::{ModalId, ModalState, ModalTransition};
pub use msg::Msg;
pub use notification::{
    Notification, NotificationId, NotificationPhase, NotificationTimer, Notifications, Severity,
    EXIT_ANIMATION, NOTIFICATION_LIFETIME,
};
pub use outcome::{download_filename, FailureKind, UpscaleFailure, UpscaleMetrics, UpscaleResult};
pub use scale::{ScaleFactor, ScaleSelection, UpscaleMode};
pub use slider::{
    divider_left, overlay_clip, reveal_percent, ContainerBounds, SliderState,
    INITIAL_REVEAL_PERCENT,
};
pub use state::{AppState, RequestId, SelectionId, UiState};
pub use theme::{resolve_dark_mode, ThemePreference, THEME_STORAGE_KEY};
pub use update::{update, UPSCALE_SUCCESS_MESSAGE};
pub use validation::{
    validate_selection, Limits, SelectedFile, ValidationError, DEFAULT_MAX_UPLOAD_BYTES,
};
pub use view_model::{
    AppViewModel, ComparisonView, DownloadView, FileSummaryView, MetricsView, NotificationView,
    PreviewView, ScaleOptionView, UploadView, METRIC_PLACEHOLDER,
};
