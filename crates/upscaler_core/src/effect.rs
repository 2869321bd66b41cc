use std::time::Duration;

use crate::{
    NotificationId, NotificationTimer, RequestId, ScaleFactor, SelectionId, ThemePreference,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Open the browser's file chooser.
    OpenFilePicker,
    /// Read the bytes of the given selection into a displayable image source.
    ReadPreview { selection: SelectionId },
    SendUpscale {
        request: RequestId,
        selection: SelectionId,
        scale: ScaleFactor,
        force_cpu: bool,
    },
    CancelUpscale { request: RequestId },
    /// Attach document-level pointer move/release listeners.
    TrackPointer,
    /// Detach the listeners attached by `TrackPointer`.
    StopTrackingPointer,
    TriggerDownload { url: String, filename: String },
    RestoreScroll { offset: f64 },
    PersistTheme(ThemePreference),
    ScheduleNotificationTimer {
        id: NotificationId,
        timer: NotificationTimer,
        delay: Duration,
    },
    CancelNotificationTimers { id: NotificationId },
}
