use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::file::futures::{read_as_bytes, read_as_data_url};
use gloo::file::File;
use gloo::timers::callback::Timeout;
use upscaler_core::{
    Effect, FailureKind, Msg, NotificationId, ScaleFactor, SelectedFile, SelectionId,
    UpscaleFailure,
};
use upscaler_engine::{RequestId, UpscaleEngine, UpscaleError, UpscaleRequest};
use upscaler_logging::{upscaler_debug, upscaler_info, upscaler_warn};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlAnchorElement, MouseEvent, TouchEvent};

use super::app::Dispatcher;
use super::dom::{comparison_bounds, PageContext};
use super::persistence;
use super::PlatformError;
use crate::bridge;

/// Executes effects returned by `update` against the browser.
pub(crate) struct EffectRunner {
    engine: Rc<UpscaleEngine>,
    theme_key: String,
    /// File handed to the state machine but not yet given a selection id.
    staged: RefCell<Option<File>>,
    selected: RefCell<Option<(SelectionId, File)>>,
    pointer_listeners: RefCell<Vec<EventListener>>,
    timers: RefCell<HashMap<NotificationId, Timeout>>,
}

impl EffectRunner {
    pub fn new(engine: UpscaleEngine, theme_key: String) -> Self {
        Self {
            engine: Rc::new(engine),
            theme_key,
            staged: RefCell::new(None),
            selected: RefCell::new(None),
            pointer_listeners: RefCell::new(Vec::new()),
            timers: RefCell::new(HashMap::new()),
        }
    }

    /// Keeps the browser file until the state machine accepts it.
    pub fn stage_file(&self, file: web_sys::File) -> SelectedFile {
        let file = File::from(file);
        let meta = SelectedFile::new(file.name(), file.size(), file.raw_mime_type());
        *self.staged.borrow_mut() = Some(file);
        meta
    }

    pub fn run(&self, page: &PageContext, dispatcher: &Dispatcher, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::OpenFilePicker => page.file_input.click(),
                Effect::ReadPreview { selection } => self.read_preview(selection, dispatcher),
                Effect::SendUpscale {
                    request,
                    selection,
                    scale,
                    force_cpu,
                } => self.send_upscale(request, selection, scale, force_cpu, dispatcher),
                Effect::CancelUpscale { request } => {
                    if !self.engine.cancel(request) {
                        upscaler_debug!("Request {} was not running", request);
                    }
                }
                Effect::TrackPointer => self.track_pointer(page, dispatcher),
                Effect::StopTrackingPointer => {
                    let listeners = std::mem::take(&mut *self.pointer_listeners.borrow_mut());
                    defer_drop(listeners);
                }
                Effect::TriggerDownload { url, filename } => {
                    if let Err(err) = trigger_download(page, &url, &filename) {
                        upscaler_warn!("Download of {} failed: {}", filename, err);
                    }
                }
                Effect::RestoreScroll { offset } => page.window.scroll_to_with_x_and_y(0.0, offset),
                Effect::PersistTheme(preference) => {
                    persistence::save_theme(&page.window, &self.theme_key, preference)
                }
                Effect::ScheduleNotificationTimer { id, timer, delay } => {
                    let dispatcher = dispatcher.clone();
                    let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
                    let timeout = Timeout::new(millis, move || {
                        dispatcher.send(Msg::NotificationTimerFired { id, timer });
                    });
                    if let Some(previous) = self.timers.borrow_mut().insert(id, timeout) {
                        defer_drop(previous);
                    }
                }
                Effect::CancelNotificationTimers { id } => {
                    if let Some(pending) = self.timers.borrow_mut().remove(&id) {
                        defer_drop(pending);
                    }
                }
            }
        }
    }

    /// Forgets timers whose notification is gone.
    pub fn prune_timers(&self, live: &[NotificationId]) {
        let mut timers = self.timers.borrow_mut();
        let stale: Vec<_> = timers
            .keys()
            .copied()
            .filter(|id| !live.contains(id))
            .collect();
        for id in stale {
            if let Some(timeout) = timers.remove(&id) {
                defer_drop(timeout);
            }
        }
    }

    fn read_preview(&self, selection: SelectionId, dispatcher: &Dispatcher) {
        let Some(file) = self.staged.borrow_mut().take() else {
            upscaler_warn!("No staged file for selection {}", selection);
            return;
        };
        *self.selected.borrow_mut() = Some((selection, file.clone()));

        let dispatcher = dispatcher.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let msg = match read_as_data_url(&file).await {
                Ok(data_url) => Msg::PreviewLoaded {
                    selection,
                    data_url,
                },
                Err(err) => Msg::PreviewFailed {
                    selection,
                    reason: err.to_string(),
                },
            };
            dispatcher.send(msg);
        });
    }

    fn send_upscale(
        &self,
        request: RequestId,
        selection: SelectionId,
        scale: ScaleFactor,
        force_cpu: bool,
        dispatcher: &Dispatcher,
    ) {
        let file = self
            .selected
            .borrow()
            .as_ref()
            .filter(|(id, _)| *id == selection)
            .map(|(_, file)| file.clone());
        let dispatcher = dispatcher.clone();
        let Some(file) = file else {
            upscaler_warn!("Selection {} has no file to upload", selection);
            dispatcher.send(Msg::UpscaleFinished {
                request,
                outcome: Err(UpscaleFailure::new(FailureKind::Cancelled)),
            });
            return;
        };

        // Registered before the read so a cancel in the meantime still lands.
        let ticket = self.engine.begin(request);
        let engine = Rc::clone(&self.engine);
        wasm_bindgen_futures::spawn_local(async move {
            let payload = async {
                let bytes = read_as_bytes(&file).await.map_err(|err| {
                    UpscaleError::invalid_upload(format!("cannot read {}: {err}", file.name()))
                })?;
                upscaler_info!(
                    "Uploading {} ({} bytes) at {}x",
                    file.name(),
                    bytes.len(),
                    scale.factor()
                );
                Ok::<_, UpscaleError>(UpscaleRequest {
                    file_name: file.name(),
                    mime_type: file.raw_mime_type(),
                    bytes,
                    scale: scale.factor(),
                    force_cpu,
                })
            };
            let outcome = bridge::to_outcome(engine.send(ticket, payload).await);
            dispatcher.send(Msg::UpscaleFinished { request, outcome });
        });
    }

    fn track_pointer(&self, page: &PageContext, dispatcher: &Dispatcher) {
        let mut listeners = self.pointer_listeners.borrow_mut();
        if !listeners.is_empty() {
            return;
        }
        let document = &page.document;
        let active = EventListenerOptions::enable_prevent_default();

        let (d, doc) = (dispatcher.clone(), document.clone());
        listeners.push(EventListener::new(document, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                d.send(Msg::SliderMoved {
                    pointer_x: f64::from(event.client_x()),
                    container: comparison_bounds(&doc),
                });
            }
        }));

        let (d, doc) = (dispatcher.clone(), document.clone());
        listeners.push(EventListener::new_with_options(
            document,
            "touchmove",
            active,
            move |event| {
                let Some(touch) = event
                    .dyn_ref::<TouchEvent>()
                    .and_then(|event| event.touches().get(0))
                else {
                    return;
                };
                event.prevent_default();
                d.send(Msg::SliderMoved {
                    pointer_x: f64::from(touch.client_x()),
                    container: comparison_bounds(&doc),
                });
            },
        ));

        for name in ["mouseup", "touchend", "touchcancel"] {
            let d = dispatcher.clone();
            listeners.push(EventListener::new(document, name, move |_: &Event| {
                d.send(Msg::SliderReleased);
            }));
        }
    }
}

fn trigger_download(page: &PageContext, url: &str, filename: &str) -> Result<(), PlatformError> {
    let anchor: HtmlAnchorElement = page
        .document
        .create_element("a")?
        .dyn_into()
        .map_err(|_| PlatformError::WrongElementType {
            id: "download-anchor",
            expected: "anchor",
        })?;
    anchor.set_href(url);
    anchor.set_download(filename);
    anchor.style().set_property("display", "none")?;
    page.body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();
    upscaler_info!("Download started for {}", filename);
    Ok(())
}

/// Drops `value` after the current callback returns, so a listener or timer
/// is never freed while it is running.
fn defer_drop<T: 'static>(value: T) {
    wasm_bindgen_futures::spawn_local(async move {
        drop(value);
    });
}
