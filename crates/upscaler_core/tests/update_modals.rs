use pretty_assertions::assert_eq;
use upscaler_core::{update, AppState, Effect, ModalId, Msg};

fn open(state: AppState, modal: ModalId, scroll_offset: f64) -> AppState {
    let (state, effects) = update(
        state,
        Msg::ModalToggled {
            modal,
            scroll_offset,
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn opening_a_modal_locks_scroll_at_current_offset() {
    let mut state = open(AppState::new(), ModalId::Research, 240.0);

    let view = state.view();
    assert!(view.research_open);
    assert!(!view.help_open);
    assert_eq!(view.scroll_lock, Some(240.0));
    assert!(state.consume_dirty());
}

#[test]
fn escape_closes_and_restores_exact_offset() {
    let state = open(AppState::new(), ModalId::Research, 240.0);
    let (state, effects) = update(state, Msg::EscapePressed);

    assert_eq!(effects, vec![Effect::RestoreScroll { offset: 240.0 }]);
    let view = state.view();
    assert!(!view.research_open);
    assert_eq!(view.scroll_lock, None);
}

#[test]
fn escape_without_open_modal_does_nothing() {
    let mut state = AppState::new();
    state.consume_dirty();
    let (mut state, effects) = update(state, Msg::EscapePressed);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn backdrop_click_only_closes_on_root() {
    let state = open(AppState::new(), ModalId::Help, 80.0);

    let (state, effects) = update(
        state,
        Msg::ModalBackdropClicked {
            modal: ModalId::Help,
            target_is_root: false,
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().help_open);

    let (state, effects) = update(
        state,
        Msg::ModalBackdropClicked {
            modal: ModalId::Help,
            target_is_root: true,
        },
    );
    assert_eq!(effects, vec![Effect::RestoreScroll { offset: 80.0 }]);
    assert!(!state.view().help_open);
}

#[test]
fn close_button_and_second_toggle_both_close() {
    let state = open(AppState::new(), ModalId::Help, 10.0);
    let (state, effects) = update(state, Msg::ModalCloseClicked(ModalId::Help));
    assert_eq!(effects, vec![Effect::RestoreScroll { offset: 10.0 }]);

    let state = open(state, ModalId::Help, 30.0);
    let (state, effects) = update(
        state,
        Msg::ModalToggled {
            modal: ModalId::Help,
            scroll_offset: 999.0,
        },
    );
    assert_eq!(effects, vec![Effect::RestoreScroll { offset: 30.0 }]);
    assert!(!state.modals().any_open());
}

#[test]
fn closing_an_already_closed_modal_is_ignored() {
    let (state, effects) = update(AppState::new(), Msg::ModalCloseClicked(ModalId::Research));
    assert!(effects.is_empty());
    assert_eq!(state, AppState::new());
}

#[test]
fn two_modals_share_one_scroll_lock() {
    let state = open(AppState::new(), ModalId::Help, 120.0);
    let state = open(state, ModalId::Research, 0.0);
    assert_eq!(state.view().scroll_lock, Some(120.0));

    // The lock survives while the other modal is still open.
    let (state, effects) = update(state, Msg::ModalCloseClicked(ModalId::Help));
    assert!(effects.is_empty());
    assert_eq!(state.view().scroll_lock, Some(120.0));

    let (state, effects) = update(state, Msg::ModalCloseClicked(ModalId::Research));
    assert_eq!(effects, vec![Effect::RestoreScroll { offset: 120.0 }]);
    assert_eq!(state.view().scroll_lock, None);
}

#[test]
fn escape_closes_every_open_modal_with_single_restore() {
    let state = open(AppState::new(), ModalId::Help, 55.0);
    let state = open(state, ModalId::Research, 70.0);

    let (state, effects) = update(state, Msg::EscapePressed);
    assert_eq!(effects, vec![Effect::RestoreScroll { offset: 55.0 }]);
    assert!(!state.modals().any_open());
}
