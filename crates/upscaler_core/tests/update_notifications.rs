use pretty_assertions::assert_eq;
use upscaler_core::{
    update, AppState, Effect, Msg, NotificationTimer, SelectedFile, EXIT_ANIMATION,
    NOTIFICATION_LIFETIME,
};

/// Two rejected selections produce two independent error notifications.
fn two_notifications() -> (AppState, Vec<Effect>) {
    let (state, mut effects) = update(
        AppState::new(),
        Msg::FileChosen(SelectedFile::new("a.txt", 1, "text/plain")),
    );
    let (state, more) = update(
        state,
        Msg::FileChosen(SelectedFile::new("b.txt", 1, "text/plain")),
    );
    effects.extend(more);
    (state, effects)
}

fn fire(state: AppState, id: u64, timer: NotificationTimer) -> (AppState, Vec<Effect>) {
    update(state, Msg::NotificationTimerFired { id, timer })
}

#[test]
fn each_notification_gets_its_own_expiry() {
    let (state, effects) = two_notifications();
    assert_eq!(
        effects,
        vec![
            Effect::ScheduleNotificationTimer {
                id: 1,
                timer: NotificationTimer::Expire,
                delay: NOTIFICATION_LIFETIME,
            },
            Effect::ScheduleNotificationTimer {
                id: 2,
                timer: NotificationTimer::Expire,
                delay: NOTIFICATION_LIFETIME,
            },
        ]
    );
    assert_eq!(state.view().notifications.len(), 2);
}

#[test]
fn expiry_then_removal_only_touches_that_notification() {
    let (state, _) = two_notifications();

    let (state, effects) = fire(state, 1, NotificationTimer::Expire);
    assert_eq!(
        effects,
        vec![Effect::ScheduleNotificationTimer {
            id: 1,
            timer: NotificationTimer::Remove,
            delay: EXIT_ANIMATION,
        }]
    );
    let view = state.view();
    assert!(view.notifications[0].leaving);
    assert!(!view.notifications[1].leaving);

    let (state, effects) = fire(state, 1, NotificationTimer::Remove);
    assert!(effects.is_empty());
    let ids: Vec<_> = state.view().notifications.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn manual_close_cancels_expiry_and_is_idempotent() {
    let (state, _) = two_notifications();

    let (state, effects) = update(state, Msg::NotificationCloseClicked(2));
    assert_eq!(
        effects,
        vec![
            Effect::CancelNotificationTimers { id: 2 },
            Effect::ScheduleNotificationTimer {
                id: 2,
                timer: NotificationTimer::Remove,
                delay: EXIT_ANIMATION,
            },
        ]
    );

    let (mut state, effects) = update(state, Msg::NotificationCloseClicked(2));
    assert!(effects.is_empty());
    state.consume_dirty();

    // An expiry that slipped through after the close changes nothing.
    let (mut state, effects) = fire(state, 2, NotificationTimer::Expire);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn late_timers_for_removed_notification_are_ignored() {
    let (state, _) = two_notifications();
    let (state, _) = update(state, Msg::NotificationCloseClicked(1));
    let (state, _) = fire(state, 1, NotificationTimer::Remove);
    assert_eq!(state.view().notifications.len(), 1);

    let before = state.clone();
    let (state, effects) = fire(state, 1, NotificationTimer::Remove);
    assert!(effects.is_empty());
    let (state, effects) = fire(state, 1, NotificationTimer::Expire);
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn icons_match_severity() {
    let (state, _) = two_notifications();
    assert_eq!(state.view().notifications[0].icon, "❌");
}
