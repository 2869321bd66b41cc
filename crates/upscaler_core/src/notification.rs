//! Transient toast notifications.
//!
//! Every notification owns its timers. The platform keys pending timers by
//! [`NotificationId`], so a manual close cancels the pending expiry and a late
//! timer for an already-removed notification is a no-op.

use std::time::Duration;

use crate::Effect;

/// How long a notification stays before it starts leaving.
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(5);
/// Length of the exit animation before the element is removed.
pub const EXIT_ANIMATION: Duration = Duration::from_millis(300);

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Success,
    Warning,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Error => "❌",
            Self::Success => "✅",
            Self::Warning => "⚠️",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
            Self::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTimer {
    /// Lifetime elapsed; start the exit animation.
    Expire,
    /// Exit animation finished; drop the element.
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub severity: Severity,
    pub message: String,
    pub phase: NotificationPhase,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notifications {
    next_id: NotificationId,
    items: Vec<Notification>,
}

impl Notifications {
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> Vec<Effect> {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notification {
            id,
            severity,
            message: message.into(),
            phase: NotificationPhase::Visible,
        });
        vec![Effect::ScheduleNotificationTimer {
            id,
            timer: NotificationTimer::Expire,
            delay: NOTIFICATION_LIFETIME,
        }]
    }

    /// Manual close. Only a visible notification reacts; the pending expiry is
    /// cancelled before the removal timer is scheduled.
    pub fn dismiss(&mut self, id: NotificationId) -> Vec<Effect> {
        if !self.begin_leaving(id) {
            return Vec::new();
        }
        vec![
            Effect::CancelNotificationTimers { id },
            Effect::ScheduleNotificationTimer {
                id,
                timer: NotificationTimer::Remove,
                delay: EXIT_ANIMATION,
            },
        ]
    }

    pub fn timer_fired(&mut self, id: NotificationId, timer: NotificationTimer) -> Vec<Effect> {
        match timer {
            NotificationTimer::Expire => {
                if !self.begin_leaving(id) {
                    return Vec::new();
                }
                vec![Effect::ScheduleNotificationTimer {
                    id,
                    timer: NotificationTimer::Remove,
                    delay: EXIT_ANIMATION,
                }]
            }
            NotificationTimer::Remove => {
                self.remove(id);
                Vec::new()
            }
        }
    }

    /// Returns `false` when the notification is already gone.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    fn begin_leaving(&mut self, id: NotificationId) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) if item.phase == NotificationPhase::Visible => {
                item.phase = NotificationPhase::Leaving;
                true
            }
            _ => false,
        }
    }
}
