use pretty_assertions::assert_eq;
use upscaler_core::{
    update, AppState, DownloadView, Effect, FailureKind, Msg, ScaleFactor, SelectedFile, Severity,
    UiState, UpscaleFailure, UpscaleMetrics, UpscaleMode, UpscaleResult,
};

fn with_file(name: &str) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::FileChosen(SelectedFile::new(name, 4096, "image/jpeg")),
    );
    state
}

fn sample_result() -> UpscaleResult {
    UpscaleResult {
        output_url: "a.png".to_string(),
        metrics: UpscaleMetrics {
            technique: "t".to_string(),
            model_architecture: "m".to_string(),
            processing_time_seconds: 1.23,
            input_resolution: "100x100".to_string(),
            output_resolution: "400x400".to_string(),
            device_used: None,
            output_size: None,
        },
    }
}

fn request_id(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SendUpscale { request, .. } => Some(*request),
            _ => None,
        })
        .expect("send effect")
}

#[test]
fn upscale_requires_a_selected_file() {
    let (state, effects) = update(AppState::new(), Msg::UpscaleClicked);
    assert_eq!(state.ui_state(), UiState::Idle);
    assert!(effects.is_empty());
}

#[test]
fn upscale_click_enters_processing_and_disables_trigger() {
    let state = with_file("cat.jpg");
    let (state, _) = update(state, Msg::ScaleChanged(4));
    let (mut state, effects) = update(state, Msg::UpscaleClicked);

    assert_eq!(
        effects,
        vec![Effect::SendUpscale {
            request: 1,
            selection: 1,
            scale: ScaleFactor::X4,
            force_cpu: true,
        }]
    );
    assert_eq!(state.ui_state(), UiState::Processing);
    let view = state.view();
    assert!(view.processing);
    assert!(!view.upscale_enabled);
    assert!(state.consume_dirty());

    // A second click while processing does nothing.
    let (state, effects) = update(state, Msg::UpscaleClicked);
    assert!(effects.is_empty());
    assert_eq!(state.in_flight_request(), Some(1));
}

#[test]
fn accelerated_mode_does_not_force_cpu() {
    let state = with_file("cat.jpg");
    let (state, _) = update(state, Msg::ModeChanged(UpscaleMode::Gpu));
    let (state, _) = update(state, Msg::ScaleChanged(6));
    let (_state, effects) = update(state, Msg::UpscaleClicked);

    assert!(matches!(
        effects.as_slice(),
        [Effect::SendUpscale {
            scale: ScaleFactor::X6,
            force_cpu: false,
            ..
        }]
    ));
}

#[test]
fn successful_response_populates_metrics_and_download() {
    let state = with_file("cat.jpg");
    let (state, _) = update(state, Msg::ScaleChanged(4));
    let (state, effects) = update(state, Msg::UpscaleClicked);
    let request = request_id(&effects);

    let (state, _effects) = update(
        state,
        Msg::UpscaleFinished {
            request,
            outcome: Ok(sample_result()),
        },
    );

    assert_eq!(state.ui_state(), UiState::ResultReady);
    let view = state.view();
    assert_eq!(view.metrics.resolution, "100x100 → 400x400");
    assert_eq!(view.metrics.time, "1.23s");
    assert_eq!(view.metrics.technique, "t");
    assert_eq!(view.metrics.model, "m");
    assert_eq!(
        view.download,
        Some(DownloadView {
            url: "a.png".to_string(),
            filename: "upscaled_4x_cat.png".to_string(),
        })
    );
    assert!(view.upscale_enabled);
    assert!(!view.processing);
    assert!(view.comparison.visible);
    assert_eq!(view.comparison.upscaled_src.as_deref(), Some("a.png"));
    assert_eq!(view.notifications[0].severity, Severity::Success);
    assert_eq!(view.notifications[0].message, "Image upscaled successfully!");

    let (_state, effects) = update(state, Msg::DownloadClicked);
    assert_eq!(
        effects,
        vec![Effect::TriggerDownload {
            url: "a.png".to_string(),
            filename: "upscaled_4x_cat.png".to_string(),
        }]
    );
}

#[test]
fn download_filename_uses_scale_at_request_time() {
    let state = with_file("dog.webp");
    let (state, _) = update(state, Msg::ScaleChanged(4));
    let (state, effects) = update(state, Msg::UpscaleClicked);
    let request = request_id(&effects);
    // Changing the dropdown mid-flight must not rename the result.
    let (state, _) = update(state, Msg::ScaleChanged(2));
    let (state, _) = update(
        state,
        Msg::UpscaleFinished {
            request,
            outcome: Ok(sample_result()),
        },
    );

    assert_eq!(
        state.view().download.unwrap().filename,
        "upscaled_4x_dog.png"
    );
}

#[test]
fn server_error_message_is_surfaced_and_trigger_reenabled() {
    let state = with_file("cat.jpg");
    let (state, effects) = update(state, Msg::UpscaleClicked);
    let request = request_id(&effects);

    let failure = UpscaleFailure::new(FailureKind::Server).with_server_message("model unavailable");
    let (state, _) = update(
        state,
        Msg::UpscaleFinished {
            request,
            outcome: Err(failure),
        },
    );

    assert_eq!(state.ui_state(), UiState::FileSelected);
    let view = state.view();
    assert!(view.upscale_enabled);
    assert!(view.download.is_none());
    assert_eq!(view.notifications.len(), 1);
    assert_eq!(view.notifications[0].severity, Severity::Error);
    assert!(view.notifications[0].message.contains("model unavailable"));
}

#[test]
fn network_failure_uses_generic_message() {
    let state = with_file("cat.jpg");
    let (state, effects) = update(state, Msg::UpscaleClicked);
    let request = request_id(&effects);

    let (state, _) = update(
        state,
        Msg::UpscaleFinished {
            request,
            outcome: Err(UpscaleFailure::new(FailureKind::Network)),
        },
    );

    assert_eq!(
        state.view().notifications[0].message,
        "Error during upscaling: Could not reach the upscaling service"
    );
    assert!(state.can_upscale());
}

#[test]
fn failure_after_previous_result_keeps_trigger_usable() {
    let state = with_file("cat.jpg");
    let (state, effects) = update(state, Msg::UpscaleClicked);
    let (state, _) = update(
        state,
        Msg::UpscaleFinished {
            request: request_id(&effects),
            outcome: Ok(sample_result()),
        },
    );
    assert!(state.can_download());

    let (state, effects) = update(state, Msg::UpscaleClicked);
    assert!(!state.can_download());
    let (state, _) = update(
        state,
        Msg::UpscaleFinished {
            request: request_id(&effects),
            outcome: Err(UpscaleFailure::new(FailureKind::Timeout)),
        },
    );

    assert_eq!(state.ui_state(), UiState::FileSelected);
    assert!(state.can_upscale());
    assert!(!state.can_download());
    assert!(!state.view().comparison.visible);
}

#[test]
fn new_selection_while_processing_cancels_request() {
    let state = with_file("cat.jpg");
    let (state, effects) = update(state, Msg::UpscaleClicked);
    let request = request_id(&effects);

    let (state, effects) = update(
        state,
        Msg::FileChosen(SelectedFile::new("dog.png", 10, "image/png")),
    );
    assert_eq!(
        effects,
        vec![
            Effect::CancelUpscale { request },
            Effect::ReadPreview { selection: 2 },
        ]
    );
    assert_eq!(state.ui_state(), UiState::FileSelected);
    assert_eq!(state.in_flight_request(), None);

    // The cancelled request's late answer is ignored.
    let before = state.clone();
    let (state, effects) = update(
        state,
        Msg::UpscaleFinished {
            request,
            outcome: Err(UpscaleFailure::new(FailureKind::Cancelled)),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn new_selection_clears_previous_result() {
    let state = with_file("cat.jpg");
    let (state, effects) = update(state, Msg::UpscaleClicked);
    let (state, _) = update(
        state,
        Msg::UpscaleFinished {
            request: request_id(&effects),
            outcome: Ok(sample_result()),
        },
    );
    let (state, _) = update(
        state,
        Msg::FileChosen(SelectedFile::new("dog.png", 10, "image/png")),
    );

    let view = state.view();
    assert_eq!(view.ui_state, UiState::FileSelected);
    assert!(!view.comparison.visible);
    assert!(view.download.is_none());
    assert_eq!(view.metrics, Default::default());
}

#[test]
fn optional_metrics_are_shown_when_present() {
    let state = with_file("cat.jpg");
    let (state, effects) = update(state, Msg::UpscaleClicked);
    let mut result = sample_result();
    result.metrics.device_used = Some("GPU".to_string());
    result.metrics.output_size = Some("1.20MB".to_string());
    let (state, _) = update(
        state,
        Msg::UpscaleFinished {
            request: request_id(&effects),
            outcome: Ok(result),
        },
    );

    let metrics = state.view().metrics;
    assert_eq!(metrics.device, "GPU");
    assert_eq!(metrics.output_size, "1.20MB");
}

#[test]
fn unreadable_file_is_reported_as_local_failure() {
    let state = with_file("cat.jpg");
    let (state, effects) = update(state, Msg::UpscaleClicked);
    let (state, _) = update(
        state,
        Msg::UpscaleFinished {
            request: request_id(&effects),
            outcome: Err(UpscaleFailure::new(FailureKind::InvalidUpload)),
        },
    );

    assert_eq!(
        state.view().notifications[0].message,
        "Error during upscaling: The selected file could not be prepared for upload"
    );
    assert!(state.can_upscale());
}
