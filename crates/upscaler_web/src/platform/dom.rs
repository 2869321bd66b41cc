use std::collections::HashMap;

use gloo::events::EventListener;
use upscaler_core::{ContainerBounds, NotificationId, NotificationView};
use upscaler_logging::upscaler_warn;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlImageElement, HtmlInputElement,
    HtmlOptionElement, HtmlSelectElement, Window,
};

use super::app::Dispatcher;
use super::PlatformError;
use crate::ui::constants::*;
use crate::ui::render::DomCommand;
use upscaler_core::Msg;

/// Every element the controllers touch, looked up once at start-up.
pub(crate) struct PageContext {
    pub window: Window,
    pub document: Document,
    pub body: HtmlElement,
    pub file_input: HtmlInputElement,
    pub mode_select: HtmlSelectElement,
    pub scale_select: HtmlSelectElement,
    elements: HashMap<&'static str, HtmlElement>,
}

impl PageContext {
    pub fn new(window: Window) -> Result<Self, PlatformError> {
        let document = window.document().ok_or(PlatformError::NoDocument)?;
        let body = document.body().ok_or(PlatformError::NoBody)?;

        let mut elements = HashMap::with_capacity(REQUIRED_IDS.len());
        for &id in REQUIRED_IDS {
            let element = document
                .get_element_by_id(id)
                .ok_or(PlatformError::MissingElement(id))?;
            elements.insert(id, typed::<HtmlElement>(element, id, "HTML element")?);
        }

        let file_input = typed(elements[FILE_INPUT].clone().into(), FILE_INPUT, "file input")?;
        let mode_select = typed(elements[MODE_SELECT].clone().into(), MODE_SELECT, "select")?;
        let scale_select = typed(elements[SCALE_SELECT].clone().into(), SCALE_SELECT, "select")?;

        Ok(Self {
            window,
            document,
            body,
            file_input,
            mode_select,
            scale_select,
            elements,
        })
    }

    pub fn element(&self, id: &'static str) -> Option<&HtmlElement> {
        let element = self.elements.get(id);
        if element.is_none() {
            upscaler_warn!("No element registered for #{}", id);
        }
        element
    }

    /// Text of the optional JSON config block.
    pub fn config_block(document: &Document) -> Option<String> {
        document
            .get_element_by_id(CONFIG_SCRIPT)
            .and_then(|script| script.text_content())
    }

    pub fn apply(&self, command: &DomCommand) {
        if let Err(err) = self.try_apply(command) {
            upscaler_warn!("Failed to apply {:?}: {}", command, err);
        }
    }

    fn try_apply(&self, command: &DomCommand) -> Result<(), PlatformError> {
        match command {
            DomCommand::SetText { id, text } => {
                if let Some(element) = self.element(*id) {
                    if element.text_content().as_deref() != Some(text.as_str()) {
                        element.set_text_content(Some(text));
                    }
                }
            }
            DomCommand::SetEnabled { id, enabled } => {
                if let Some(element) = self.element(*id) {
                    match element.dyn_ref::<HtmlButtonElement>() {
                        Some(button) => button.set_disabled(!enabled),
                        None if *enabled => element.remove_attribute("disabled")?,
                        None => element.set_attribute("disabled", "")?,
                    }
                }
            }
            DomCommand::SetClass { id, class, on } => {
                if let Some(element) = self.element(*id) {
                    element.class_list().toggle_with_force(class, *on)?;
                }
            }
            DomCommand::SetStyle {
                id,
                property,
                value,
            } => {
                if let Some(element) = self.element(*id) {
                    set_style(element, property, value.as_deref())?;
                }
            }
            DomCommand::SetImageSource { id, src } => {
                let image = self
                    .element(*id)
                    .and_then(|element| element.dyn_ref::<HtmlImageElement>());
                if let Some(image) = image {
                    match src {
                        Some(src) => image.set_src(src),
                        None => image.remove_attribute("src")?,
                    }
                }
            }
            DomCommand::SetAttribute { id, name, value } => {
                if let Some(element) = self.element(*id) {
                    element.set_attribute(name, value)?;
                }
            }
            DomCommand::SetSelectValue { id, value } => {
                if let Some(select) = self.select(*id) {
                    if select.value() != *value {
                        select.set_value(value);
                    }
                }
            }
            DomCommand::SetSelectOptions { id, options } => {
                if let Some(select) = self.select(*id) {
                    replace_options(select, options)?;
                }
            }
            DomCommand::BodyClass { class, on } => {
                self.body.class_list().toggle_with_force(class, *on)?;
            }
            DomCommand::BodyStyle { property, value } => {
                set_style(&self.body, property, value.as_deref())?;
            }
            DomCommand::SyncNotifications(_) => {
                upscaler_warn!("Notification sync must go through NotificationList");
            }
        }
        Ok(())
    }

    fn select(&self, id: &'static str) -> Option<&HtmlSelectElement> {
        match id {
            MODE_SELECT => Some(&self.mode_select),
            SCALE_SELECT => Some(&self.scale_select),
            _ => self.element(id).and_then(|e| e.dyn_ref::<HtmlSelectElement>()),
        }
    }
}

/// Current vertical page offset, `0` when the window cannot report one.
pub(crate) fn scroll_offset(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

/// Measures the comparison wrapper; `None` once it has left the document.
pub(crate) fn comparison_bounds(document: &Document) -> Option<ContainerBounds> {
    let wrapper = document.get_element_by_id(COMPARISON_WRAPPER)?;
    let rect = wrapper.get_bounding_client_rect();
    Some(ContainerBounds {
        left: rect.left(),
        width: rect.width(),
    })
}

fn typed<T: JsCast>(
    element: Element,
    id: &'static str,
    expected: &'static str,
) -> Result<T, PlatformError> {
    element
        .dyn_into::<T>()
        .map_err(|_| PlatformError::WrongElementType { id, expected })
}

fn set_style(
    element: &HtmlElement,
    property: &str,
    value: Option<&str>,
) -> Result<(), PlatformError> {
    let style = element.style();
    match value {
        Some(value) => style.set_property(property, value)?,
        None => {
            style.remove_property(property)?;
        }
    }
    Ok(())
}

/// Rebuilds the option list only when values or labels changed, so the
/// current choice survives ordinary re-renders.
fn replace_options(
    select: &HtmlSelectElement,
    options: &[(String, String)],
) -> Result<(), PlatformError> {
    let current = select.options();
    let unchanged = current.length() as usize == options.len()
        && options.iter().enumerate().all(|(index, (value, label))| {
            current
                .item(index as u32)
                .and_then(|node| node.dyn_into::<HtmlOptionElement>().ok())
                .is_some_and(|option| option.value() == *value && option.text() == *label)
        });
    if unchanged {
        return Ok(());
    }

    select.set_inner_html("");
    for (value, label) in options {
        let option = HtmlOptionElement::new_with_text_and_value(label, value)?;
        select.append_child(&option)?;
    }
    Ok(())
}

struct NotificationElement {
    id: NotificationId,
    element: HtmlElement,
    _close: EventListener,
}

/// The toast elements currently in the notification container.
#[derive(Default)]
pub(crate) struct NotificationList {
    shown: Vec<NotificationElement>,
}

impl NotificationList {
    pub fn sync(
        &mut self,
        page: &PageContext,
        items: &[NotificationView],
        dispatcher: &Dispatcher,
    ) -> Result<(), PlatformError> {
        self.shown.retain(|shown| {
            let keep = items.iter().any(|item| item.id == shown.id);
            if !keep {
                shown.element.remove();
            }
            keep
        });

        let container = page
            .element(NOTIFICATION_CONTAINER)
            .ok_or(PlatformError::MissingElement(NOTIFICATION_CONTAINER))?;

        for item in items {
            match self.shown.iter().find(|shown| shown.id == item.id) {
                Some(shown) => {
                    shown
                        .element
                        .class_list()
                        .toggle_with_force(CLASS_LEAVING, item.leaving)?;
                }
                None => {
                    let shown = build_notification(&page.document, item, dispatcher)?;
                    container.append_child(&shown.element)?;
                    self.shown.push(shown);
                }
            }
        }
        Ok(())
    }
}

fn build_notification(
    document: &Document,
    item: &NotificationView,
    dispatcher: &Dispatcher,
) -> Result<NotificationElement, PlatformError> {
    let element: HtmlElement = typed(document.create_element("div")?, "notification", "div")?;
    element.set_class_name(&format!("notification {}", item.severity.class_name()));
    element.class_list().toggle_with_force(CLASS_LEAVING, item.leaving)?;

    for (class, text) in [
        ("notification-icon", item.icon),
        ("notification-message", item.message.as_str()),
        ("notification-close", "×"),
    ] {
        let span = document.create_element("span")?;
        span.set_class_name(class);
        span.set_text_content(Some(text));
        element.append_child(&span)?;
    }

    let close_target = element
        .last_element_child()
        .ok_or(PlatformError::MissingElement("notification-close"))?;
    let dispatcher = dispatcher.clone();
    let id = item.id;
    let close = EventListener::new(&close_target, "click", move |_| {
        dispatcher.send(Msg::NotificationCloseClicked(id));
    });

    Ok(NotificationElement {
        id,
        element,
        _close: close,
    })
}
