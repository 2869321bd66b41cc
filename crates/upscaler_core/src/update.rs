use upscaler_logging::{upscaler_debug, upscaler_info, upscaler_warn};

use crate::{
    validate_selection, AppState, Effect, ModalId, ModalTransition, Msg, RequestId, SelectedFile,
    Severity, ThemePreference, UiState, UpscaleFailure, UpscaleResult,
};

pub const UPSCALE_SUCCESS_MESSAGE: &str = "Image upscaled successfully!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileDragEntered => {
            state.set_drag_hover(true);
            Vec::new()
        }
        Msg::FileDragLeft => {
            state.set_drag_hover(false);
            Vec::new()
        }
        Msg::UploadBoxClicked => vec![Effect::OpenFilePicker],
        Msg::FileChosen(file) => {
            state.set_drag_hover(false);
            choose_file(&mut state, file)
        }
        Msg::PreviewLoaded {
            selection,
            data_url,
        } => {
            if !state.apply_preview(selection, data_url) {
                upscaler_debug!("Dropping preview for stale selection {}", selection);
            }
            Vec::new()
        }
        Msg::PreviewFailed { selection, reason } => {
            if state.is_current_selection(selection) {
                upscaler_warn!("Preview for selection {} failed: {}", selection, reason);
                state.notify(
                    Severity::Warning,
                    format!("Could not preview the selected file: {reason}"),
                )
            } else {
                Vec::new()
            }
        }
        Msg::ModeChanged(mode) => {
            state.set_mode(mode);
            Vec::new()
        }
        Msg::ScaleChanged(factor) => {
            if !state.set_scale(factor) {
                upscaler_warn!(
                    "Ignoring scale {}x, not offered in {} mode",
                    factor,
                    state.scale().mode().value()
                );
            }
            Vec::new()
        }
        Msg::UpscaleClicked => start_upscale(&mut state),
        Msg::UpscaleFinished { request, outcome } => finish_upscale(&mut state, request, outcome),
        Msg::SliderGrabbed => {
            if state.slider_mut().grab() {
                state.mark_dirty();
                vec![Effect::TrackPointer]
            } else {
                Vec::new()
            }
        }
        Msg::SliderMoved {
            pointer_x,
            container,
        } => {
            if state.slider_mut().move_to(pointer_x, container) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SliderReleased => {
            if state.slider_mut().release() {
                state.mark_dirty();
                vec![Effect::StopTrackingPointer]
            } else {
                Vec::new()
            }
        }
        Msg::DownloadClicked => match state.download_target() {
            Some((url, filename)) => vec![Effect::TriggerDownload { url, filename }],
            None => Vec::new(),
        },
        Msg::ModalToggled {
            modal,
            scroll_offset,
        } => {
            let transition = state.modals_mut().toggle(modal, scroll_offset);
            modal_effects(&mut state, transition)
        }
        Msg::ModalCloseClicked(modal) => close_modal(&mut state, modal),
        Msg::ModalBackdropClicked {
            modal,
            target_is_root,
        } => {
            if target_is_root {
                close_modal(&mut state, modal)
            } else {
                Vec::new()
            }
        }
        Msg::EscapePressed => ModalId::ALL
            .into_iter()
            .flat_map(|modal| close_modal(&mut state, modal))
            .collect(),
        Msg::DarkModeToggled => {
            let dark = state.toggle_dark_mode();
            vec![Effect::PersistTheme(ThemePreference::from_dark_mode(dark))]
        }
        Msg::NotificationCloseClicked(id) => {
            let effects = state.notifications_mut().dismiss(id);
            if !effects.is_empty() {
                state.mark_dirty();
            }
            effects
        }
        Msg::NotificationTimerFired { id, timer } => {
            let before = state.notifications().get(id).cloned();
            let effects = state.notifications_mut().timer_fired(id, timer);
            if state.notifications().get(id) != before.as_ref() {
                state.mark_dirty();
            }
            effects
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn choose_file(state: &mut AppState, file: SelectedFile) -> Vec<Effect> {
    if let Err(err) = validate_selection(&file, state.limits()) {
        upscaler_info!("Rejected file {:?}: {:?}", file.name, err);
        return state.notify(Severity::Error, err.to_string());
    }

    let mut effects = Vec::with_capacity(2);
    if let Some(request) = state.abandon_in_flight() {
        upscaler_info!("New file chosen; cancelling request {}", request);
        effects.push(Effect::CancelUpscale { request });
    }
    let selection = state.replace_selection(file);
    effects.push(Effect::ReadPreview { selection });
    effects
}

fn start_upscale(state: &mut AppState) -> Vec<Effect> {
    if !state.can_upscale() {
        upscaler_debug!("Upscale ignored in state {:?}", state.ui_state());
        return Vec::new();
    }
    let Some(selection) = state.selection_id() else {
        return Vec::new();
    };
    let scale = state.scale().scale();
    let force_cpu = state.scale().mode().force_cpu();
    let request = state.begin_request();
    upscaler_info!(
        "SendUpscale request={} selection={} scale={}x force_cpu={}",
        request,
        selection,
        scale.factor(),
        force_cpu
    );
    vec![Effect::SendUpscale {
        request,
        selection,
        scale,
        force_cpu,
    }]
}

fn finish_upscale(
    state: &mut AppState,
    request: RequestId,
    outcome: Result<UpscaleResult, UpscaleFailure>,
) -> Vec<Effect> {
    let Some(scale) = state.take_in_flight(request) else {
        upscaler_debug!("Dropping response for stale request {}", request);
        return Vec::new();
    };

    let effects = match outcome {
        Ok(result) => {
            state.apply_result(scale, result);
            state.notify(Severity::Success, UPSCALE_SUCCESS_MESSAGE)
        }
        Err(failure) => {
            upscaler_warn!("Request {} failed: {:?}", request, failure);
            state.set_ui_state(UiState::Error);
            state.clear_result();
            state.notify(
                Severity::Error,
                format!("Error during upscaling: {}", failure.user_message()),
            )
        }
    };
    state.settle_request();
    effects
}

fn close_modal(state: &mut AppState, modal: ModalId) -> Vec<Effect> {
    let transition = state.modals_mut().close(modal);
    modal_effects(state, transition)
}

fn modal_effects(state: &mut AppState, transition: ModalTransition) -> Vec<Effect> {
    match transition {
        ModalTransition::Unchanged => Vec::new(),
        ModalTransition::Opened => {
            state.mark_dirty();
            Vec::new()
        }
        ModalTransition::Closed { restore_scroll } => {
            state.mark_dirty();
            restore_scroll
                .map(|offset| Effect::RestoreScroll { offset })
                .into_iter()
                .collect()
        }
    }
}
