use std::rc::Rc;

use crate::{NotificationId, SelectionId, Severity, UiState, UpscaleMode};

/// Text shown in every metric slot until a result arrives.
pub const METRIC_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub ui_state: UiState,
    pub dark_mode: bool,
    pub upload: UploadView,
    /// Present once the current selection's preview has been read.
    pub preview: Option<PreviewView>,
    pub results_visible: bool,
    pub comparison: ComparisonView,
    pub mode: UpscaleMode,
    pub scale_options: Vec<ScaleOptionView>,
    pub selected_scale: u32,
    pub upscale_enabled: bool,
    pub processing: bool,
    pub metrics: MetricsView,
    pub download: Option<DownloadView>,
    pub help_open: bool,
    pub research_open: bool,
    /// Page offset held while a modal is open.
    pub scroll_lock: Option<f64>,
    pub notifications: Vec<NotificationView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadView {
    pub drag_hover: bool,
    pub file: Option<FileSummaryView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummaryView {
    pub name: String,
    pub size_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewView {
    pub selection: SelectionId,
    pub src: Rc<str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub visible: bool,
    pub upscaled_src: Option<String>,
    pub reveal_percent: f64,
    pub dragging: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleOptionView {
    pub value: u32,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsView {
    pub technique: String,
    pub model: String,
    pub time: String,
    pub resolution: String,
    pub device: String,
    pub output_size: String,
}

impl Default for MetricsView {
    fn default() -> Self {
        Self {
            technique: METRIC_PLACEHOLDER.to_string(),
            model: METRIC_PLACEHOLDER.to_string(),
            time: METRIC_PLACEHOLDER.to_string(),
            resolution: METRIC_PLACEHOLDER.to_string(),
            device: METRIC_PLACEHOLDER.to_string(),
            output_size: METRIC_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadView {
    pub url: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NotificationId,
    pub severity: Severity,
    pub icon: &'static str,
    pub message: String,
    pub leaving: bool,
}
