use std::rc::Rc;

use upscaler_logging::upscaler_debug;

use crate::outcome::download_filename;
use crate::view_model::{
    AppViewModel, ComparisonView, DownloadView, FileSummaryView, MetricsView, NotificationView,
    PreviewView, ScaleOptionView, UploadView, METRIC_PLACEHOLDER,
};
use crate::{
    Effect, Limits, ModalId, ModalState, NotificationPhase, Notifications, ScaleFactor,
    ScaleSelection, SelectedFile, Severity, SliderState, UpscaleMode, UpscaleResult,
};

pub type SelectionId = u64;
pub type RequestId = u64;

/// Page-level lifecycle.
///
/// `Error` is passed through when a request fails; the settle step that runs
/// after every response moves it back to `FileSelected` in the same update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    FileSelected,
    Processing,
    ResultReady,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
struct Selection {
    id: SelectionId,
    file: SelectedFile,
    /// Shared so that building a view does not copy the whole data URL.
    preview: Option<Rc<str>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    request: RequestId,
    scale: ScaleFactor,
}

#[derive(Debug, Clone, PartialEq)]
struct CompletedUpscale {
    result: UpscaleResult,
    filename: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    ui_state: UiState,
    limits: Limits,
    selection: Option<Selection>,
    next_selection_id: SelectionId,
    next_request_id: RequestId,
    in_flight: Option<InFlight>,
    scale: ScaleSelection,
    completed: Option<CompletedUpscale>,
    slider: SliderState,
    modals: ModalState,
    notifications: Notifications,
    dark_mode: bool,
    drag_hover: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_mode(mut self, mode: UpscaleMode) -> Self {
        self.scale = ScaleSelection::new(mode);
        self
    }

    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    pub fn ui_state(&self) -> UiState {
        self.ui_state
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn scale(&self) -> &ScaleSelection {
        &self.scale
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selection.as_ref().map(|selection| &selection.file)
    }

    pub fn selection_id(&self) -> Option<SelectionId> {
        self.selection.as_ref().map(|selection| selection.id)
    }

    pub fn in_flight_request(&self) -> Option<RequestId> {
        self.in_flight.map(|in_flight| in_flight.request)
    }

    pub fn modals(&self) -> &ModalState {
        &self.modals
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn slider(&self) -> &SliderState {
        &self.slider
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn can_upscale(&self) -> bool {
        self.selection.is_some()
            && matches!(self.ui_state, UiState::FileSelected | UiState::ResultReady)
    }

    pub fn can_download(&self) -> bool {
        self.ui_state == UiState::ResultReady && self.completed.is_some()
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let upload = UploadView {
            drag_hover: self.drag_hover,
            file: self.selection.as_ref().map(|selection| FileSummaryView {
                name: selection.file.name.clone(),
                size_text: selection.file.size_label(),
            }),
        };

        let comparison = ComparisonView {
            visible: self.completed.is_some(),
            upscaled_src: self
                .completed
                .as_ref()
                .map(|completed| completed.result.output_url.clone()),
            reveal_percent: self.slider.percent(),
            dragging: self.slider.is_dragging(),
        };

        let metrics = match &self.completed {
            Some(completed) => {
                let metrics = &completed.result.metrics;
                MetricsView {
                    technique: metrics.technique.clone(),
                    model: metrics.model_architecture.clone(),
                    time: metrics.time_text(),
                    resolution: metrics.resolution_text(),
                    device: metrics
                        .device_used
                        .clone()
                        .unwrap_or_else(|| METRIC_PLACEHOLDER.to_string()),
                    output_size: metrics
                        .output_size
                        .clone()
                        .unwrap_or_else(|| METRIC_PLACEHOLDER.to_string()),
                }
            }
            None => MetricsView::default(),
        };

        let download = self
            .download_target()
            .map(|(url, filename)| DownloadView { url, filename });

        let notifications = self
            .notifications
            .items()
            .iter()
            .map(|item| NotificationView {
                id: item.id,
                severity: item.severity,
                icon: item.severity.icon(),
                message: item.message.clone(),
                leaving: item.phase == NotificationPhase::Leaving,
            })
            .collect();

        AppViewModel {
            ui_state: self.ui_state,
            dark_mode: self.dark_mode,
            upload,
            preview: self.selection.as_ref().and_then(|selection| {
                selection.preview.as_ref().map(|src| PreviewView {
                    selection: selection.id,
                    src: Rc::clone(src),
                })
            }),
            results_visible: self.selection.is_some(),
            comparison,
            mode: self.scale.mode(),
            scale_options: self
                .scale
                .options()
                .iter()
                .map(|scale| ScaleOptionView {
                    value: scale.factor(),
                    label: scale.label(),
                })
                .collect(),
            selected_scale: self.scale.scale().factor(),
            upscale_enabled: self.can_upscale(),
            processing: self.ui_state == UiState::Processing,
            metrics,
            download,
            help_open: self.modals.is_open(ModalId::Help),
            research_open: self.modals.is_open(ModalId::Research),
            scroll_lock: self.modals.scroll_lock(),
            notifications,
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_drag_hover(&mut self, hover: bool) {
        if self.drag_hover != hover {
            self.drag_hover = hover;
            self.mark_dirty();
        }
    }

    pub(crate) fn is_current_selection(&self, selection: SelectionId) -> bool {
        self.selection_id() == Some(selection)
    }

    /// Installs a freshly validated file. Any previous result is discarded.
    pub(crate) fn replace_selection(&mut self, file: SelectedFile) -> SelectionId {
        self.next_selection_id += 1;
        let id = self.next_selection_id;
        self.selection = Some(Selection {
            id,
            file,
            preview: None,
        });
        self.completed = None;
        self.slider.reset();
        self.ui_state = UiState::FileSelected;
        self.mark_dirty();
        id
    }

    pub(crate) fn apply_preview(&mut self, selection: SelectionId, data_url: String) -> bool {
        match self.selection.as_mut() {
            Some(current) if current.id == selection => {
                current.preview = Some(Rc::from(data_url));
                self.mark_dirty();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_mode(&mut self, mode: UpscaleMode) {
        if self.scale.set_mode(mode) {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_scale(&mut self, factor: u32) -> bool {
        match self.scale.set_scale(factor) {
            Some(changed) => {
                if changed {
                    self.mark_dirty();
                }
                true
            }
            None => false,
        }
    }

    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request = self.next_request_id;
        self.in_flight = Some(InFlight {
            request,
            scale: self.scale.scale(),
        });
        self.ui_state = UiState::Processing;
        self.mark_dirty();
        request
    }

    /// Removes the in-flight record if it belongs to `request`; returns its scale.
    pub(crate) fn take_in_flight(&mut self, request: RequestId) -> Option<ScaleFactor> {
        match self.in_flight {
            Some(in_flight) if in_flight.request == request => {
                self.in_flight = None;
                Some(in_flight.scale)
            }
            _ => None,
        }
    }

    /// Drops the in-flight request without waiting for its response.
    pub(crate) fn abandon_in_flight(&mut self) -> Option<RequestId> {
        self.in_flight.take().map(|in_flight| in_flight.request)
    }

    pub(crate) fn apply_result(&mut self, scale: ScaleFactor, result: UpscaleResult) {
        let original_name = self
            .selected_file()
            .map(|file| file.name.as_str())
            .unwrap_or_default();
        let filename = download_filename(scale, original_name);
        upscaler_debug!("Result ready url={} filename={}", result.output_url, filename);
        self.completed = Some(CompletedUpscale { result, filename });
        self.slider.reset();
        self.ui_state = UiState::ResultReady;
        self.mark_dirty();
    }

    pub(crate) fn clear_result(&mut self) {
        if self.completed.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_ui_state(&mut self, ui_state: UiState) {
        if self.ui_state != ui_state {
            self.ui_state = ui_state;
            self.mark_dirty();
        }
    }

    /// Runs after every response, success or not: nothing stays `Processing`
    /// or `Error`, so the trigger is usable again.
    pub(crate) fn settle_request(&mut self) {
        if matches!(self.ui_state, UiState::Processing | UiState::Error) {
            let next = if self.selection.is_some() {
                UiState::FileSelected
            } else {
                UiState::Idle
            };
            self.set_ui_state(next);
        }
    }

    pub(crate) fn download_target(&self) -> Option<(String, String)> {
        self.completed
            .as_ref()
            .filter(|_| self.can_download())
            .map(|completed| {
                (
                    completed.result.output_url.clone(),
                    completed.filename.clone(),
                )
            })
    }

    pub(crate) fn slider_mut(&mut self) -> &mut SliderState {
        &mut self.slider
    }

    pub(crate) fn modals_mut(&mut self) -> &mut ModalState {
        &mut self.modals
    }

    pub(crate) fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.mark_dirty();
        self.dark_mode
    }

    pub(crate) fn notify(&mut self, severity: Severity, message: impl Into<String>) -> Vec<Effect> {
        self.mark_dirty();
        self.notifications.push(severity, message)
    }

    pub(crate) fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }
}
