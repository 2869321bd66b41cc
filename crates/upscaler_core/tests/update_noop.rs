use upscaler_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn download_before_result_is_ignored() {
    let (next, effects) = update(AppState::new(), Msg::DownloadClicked);

    assert_eq!(next, AppState::new());
    assert!(effects.is_empty());
}
