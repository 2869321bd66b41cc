use crate::{
    ContainerBounds, ModalId, NotificationId, NotificationTimer, RequestId, SelectedFile,
    SelectionId, UpscaleFailure, UpscaleMode, UpscaleResult,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A drag carrying files entered the upload box.
    FileDragEntered,
    /// The drag left the upload box without dropping.
    FileDragLeft,
    /// User clicked the upload box to browse for a file.
    UploadBoxClicked,
    /// A file was picked from the chooser or dropped on the upload box.
    FileChosen(SelectedFile),
    /// Preview for a selection finished reading.
    PreviewLoaded {
        selection: SelectionId,
        data_url: String,
    },
    PreviewFailed {
        selection: SelectionId,
        reason: String,
    },
    ModeChanged(UpscaleMode),
    /// Raw factor from the scale dropdown.
    ScaleChanged(u32),
    UpscaleClicked,
    /// Backend answered (or failed) for a request.
    UpscaleFinished {
        request: RequestId,
        outcome: Result<UpscaleResult, UpscaleFailure>,
    },
    /// Mouse down / touch start on the divider.
    SliderGrabbed,
    /// Pointer moved while tracking. `container` is `None` when the wrapper
    /// could not be measured.
    SliderMoved {
        pointer_x: f64,
        container: Option<ContainerBounds>,
    },
    SliderReleased,
    DownloadClicked,
    /// Trigger button of a modal; `scroll_offset` is the page offset at click time.
    ModalToggled {
        modal: ModalId,
        scroll_offset: f64,
    },
    ModalCloseClicked(ModalId),
    /// Click anywhere inside the modal overlay.
    ModalBackdropClicked {
        modal: ModalId,
        target_is_root: bool,
    },
    EscapePressed,
    DarkModeToggled,
    NotificationCloseClicked(NotificationId),
    NotificationTimerFired {
        id: NotificationId,
        timer: NotificationTimer,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
