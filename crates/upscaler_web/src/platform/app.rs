use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use upscaler_core::{
    resolve_dark_mode, update, AppState, AppViewModel, Effect, ModalId, Msg, UpscaleMode,
};
use upscaler_engine::UpscaleEngine;
use upscaler_logging::{upscaler_debug, upscaler_info, upscaler_warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DragEvent, Event, HtmlElement, KeyboardEvent};

use super::dom::{scroll_offset, NotificationList, PageContext};
use super::effects::EffectRunner;
use super::{logging, persistence, PlatformError};
use crate::config::AppConfig;
use crate::ui::constants::*;
use crate::ui::render::{render, DomCommand, RenderedImages};

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

pub(crate) fn run_app() -> Result<(), PlatformError> {
    let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
    let document = window.document().ok_or(PlatformError::NoDocument)?;

    let config = AppConfig::from_page_block(PageContext::config_block(&document).as_deref());
    logging::initialize(&config.log_level);

    let page = PageContext::new(window)?;
    let page_url = page.window.location().href()?;
    let engine = UpscaleEngine::new(config.upscale_settings(&page_url)?)?;

    let stored = persistence::load_theme(&page.window, &config.theme_storage_key);
    let dark_mode = resolve_dark_mode(stored, persistence::os_prefers_dark(&page.window));
    let state = AppState::new()
        .with_limits(config.limits())
        .with_mode(config.initial_mode())
        .with_dark_mode(dark_mode);

    upscaler_info!(
        "Upscaler page ready: mode={} dark_mode={} limit={}MB",
        config.initial_mode().value(),
        dark_mode,
        config.max_upload_mb
    );

    let app = Rc::new_cyclic(|weak| App {
        dispatcher: Dispatcher(weak.clone()),
        page,
        state: RefCell::new(state),
        images: RefCell::new(RenderedImages::default()),
        inbox: RefCell::new(VecDeque::new()),
        draining: Cell::new(false),
        effects: EffectRunner::new(engine, config.theme_storage_key.clone()),
        notifications: RefCell::new(NotificationList::default()),
        listeners: RefCell::new(Vec::new()),
    });
    app.bind_listeners();
    app.render_all();

    APP.with(|slot| *slot.borrow_mut() = Some(app));
    Ok(())
}

/// Weak handle used by listeners, timers and tasks to post messages.
#[derive(Clone)]
pub(crate) struct Dispatcher(Weak<App>);

impl Dispatcher {
    pub fn send(&self, msg: Msg) {
        match self.0.upgrade() {
            Some(app) => app.dispatch(msg),
            None => upscaler_debug!("Dropping {:?}; page controller is gone", msg),
        }
    }
}

pub(crate) struct App {
    dispatcher: Dispatcher,
    page: PageContext,
    state: RefCell<AppState>,
    images: RefCell<RenderedImages>,
    inbox: RefCell<VecDeque<Msg>>,
    draining: Cell<bool>,
    effects: EffectRunner,
    notifications: RefCell<NotificationList>,
    listeners: RefCell<Vec<EventListener>>,
}

impl App {
    /// Queues `msg` and drains the queue unless a drain is already running
    /// further up the stack.
    fn dispatch(&self, msg: Msg) {
        self.inbox.borrow_mut().push_back(msg);
        if self.draining.replace(true) {
            return;
        }
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(msg) = next else {
                break;
            };
            self.process(msg);
        }
        self.draining.set(false);
    }

    fn process(&self, msg: Msg) {
        let (effects, view) = {
            let mut guard = self.state.borrow_mut();
            let state = std::mem::take(&mut *guard);
            let (mut state, effects) = update(state, msg);
            let view = state.consume_dirty().then(|| state.view());
            *guard = state;
            (effects, view)
        };

        // Render before effects so a scroll restore sees the unpinned body.
        if let Some(view) = view {
            self.render(&view);
            let live: Vec<_> = view.notifications.iter().map(|item| item.id).collect();
            self.effects.prune_timers(&live);
        }
        if !effects.is_empty() {
            self.run_effects(effects);
        }
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        self.effects.run(&self.page, &self.dispatcher, effects);
    }

    fn render_all(&self) {
        let view = self.state.borrow().view();
        self.render(&view);
    }

    fn render(&self, view: &AppViewModel) {
        let commands = render(view, &mut self.images.borrow_mut());
        self.apply(commands);
    }

    fn apply(&self, commands: Vec<DomCommand>) {
        for command in commands {
            match command {
                DomCommand::SyncNotifications(items) => {
                    let result =
                        self.notifications
                            .borrow_mut()
                            .sync(&self.page, &items, &self.dispatcher);
                    if let Err(err) = result {
                        upscaler_warn!("Notification sync failed: {}", err);
                    }
                }
                command => self.page.apply(&command),
            }
        }
    }

    fn bind_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();
        let page = &self.page;

        let upload_box = self.element(UPLOAD_BOX);
        let input_target: JsValue = page.file_input.clone().into();
        listeners.push(self.on(&upload_box, "click", move |event| {
            let from_input = event
                .target()
                .is_some_and(|target| JsValue::from(target) == input_target);
            (!from_input).then_some(Msg::UploadBoxClicked)
        }));

        let app = Rc::downgrade(self);
        let input = page.file_input.clone();
        listeners.push(self.on(&page.file_input, "change", move |_| {
            let file = input.files().and_then(|files| files.get(0))?;
            input.set_value("");
            app.upgrade().map(|app| Msg::FileChosen(app.effects.stage_file(file)))
        }));

        listeners.push(self.on_active(&upload_box, "dragover", |event| {
            event.prevent_default();
            Some(Msg::FileDragEntered)
        }));
        listeners.push(self.on(&upload_box, "dragleave", |_| Some(Msg::FileDragLeft)));
        let app = Rc::downgrade(self);
        listeners.push(self.on_active(&upload_box, "drop", move |event| {
            event.prevent_default();
            let file = event
                .dyn_ref::<DragEvent>()
                .and_then(DragEvent::data_transfer)
                .and_then(|transfer| transfer.files())
                .and_then(|files| files.get(0));
            match (file, app.upgrade()) {
                (Some(file), Some(app)) => Some(Msg::FileChosen(app.effects.stage_file(file))),
                _ => Some(Msg::FileDragLeft),
            }
        }));

        let mode = page.mode_select.clone();
        listeners.push(self.on(&page.mode_select, "change", move |_| {
            let value = mode.value();
            let parsed = UpscaleMode::from_value(&value);
            if parsed.is_none() {
                upscaler_warn!("Unknown mode {:?}", value);
            }
            parsed.map(Msg::ModeChanged)
        }));

        let scale = page.scale_select.clone();
        listeners.push(self.on(&page.scale_select, "change", move |_| {
            scale.value().parse().ok().map(Msg::ScaleChanged)
        }));

        listeners.push(self.on(&self.element(UPSCALE_BUTTON), "click", |_| {
            Some(Msg::UpscaleClicked)
        }));
        listeners.push(self.on(&self.element(DOWNLOAD_BUTTON), "click", |_| {
            Some(Msg::DownloadClicked)
        }));

        let divider = self.element(DIVIDER);
        for name in ["mousedown", "touchstart"] {
            listeners.push(self.on_active(&divider, name, |event| {
                event.prevent_default();
                Some(Msg::SliderGrabbed)
            }));
        }

        for (modal, button, close, root) in [
            (ModalId::Help, HELP_BUTTON, HELP_CLOSE, HELP_MODAL),
            (ModalId::Research, RESEARCH_BUTTON, RESEARCH_CLOSE, RESEARCH_MODAL),
        ] {
            let window = page.window.clone();
            listeners.push(self.on(&self.element(button), "click", move |_| {
                Some(Msg::ModalToggled {
                    modal,
                    scroll_offset: scroll_offset(&window),
                })
            }));
            listeners.push(self.on(&self.element(close), "click", move |_| {
                Some(Msg::ModalCloseClicked(modal))
            }));
            let root_element = self.element(root);
            let root_target: JsValue = root_element.clone().into();
            listeners.push(self.on(&root_element, "click", move |event| {
                let target_is_root = event
                    .target()
                    .is_some_and(|target| JsValue::from(target) == root_target);
                Some(Msg::ModalBackdropClicked {
                    modal,
                    target_is_root,
                })
            }));
        }

        listeners.push(self.on(&page.document, "keydown", |event| {
            let key = event.dyn_ref::<KeyboardEvent>()?.key();
            (key == "Escape").then_some(Msg::EscapePressed)
        }));

        listeners.push(self.on(&self.element(DARK_MODE_TOGGLE), "click", |_| {
            Some(Msg::DarkModeToggled)
        }));

        upscaler_debug!("Bound {} page listeners", listeners.len());
        *self.listeners.borrow_mut() = listeners;
    }

    fn element(&self, id: &'static str) -> HtmlElement {
        // Ids in REQUIRED_IDS were verified by PageContext::new.
        self.page
            .element(id)
            .cloned()
            .unwrap_or_else(|| self.page.body.clone())
    }

    fn on<F>(&self, target: &web_sys::EventTarget, name: &'static str, to_msg: F) -> EventListener
    where
        F: Fn(&Event) -> Option<Msg> + 'static,
    {
        let dispatcher = self.dispatcher.clone();
        EventListener::new(target, name, move |event| {
            if let Some(msg) = to_msg(event) {
                dispatcher.send(msg);
            }
        })
    }

    /// Like [`App::on`], for handlers that call `prevent_default`.
    fn on_active<F>(
        &self,
        target: &web_sys::EventTarget,
        name: &'static str,
        to_msg: F,
    ) -> EventListener
    where
        F: Fn(&Event) -> Option<Msg> + 'static,
    {
        let dispatcher = self.dispatcher.clone();
        EventListener::new_with_options(
            target,
            name,
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if let Some(msg) = to_msg(event) {
                    dispatcher.send(msg);
                }
            },
        )
    }
}
