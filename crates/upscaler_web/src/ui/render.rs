use std::rc::Rc;

use upscaler_core::{divider_left, overlay_clip, AppViewModel, NotificationView, SelectionId};

use super::constants::*;

/// One DOM mutation. Element ids refer to [`super::constants`]; `Body*`
/// commands target `document.body`.
#[derive(Debug, Clone, PartialEq)]
pub enum DomCommand {
    SetText {
        id: &'static str,
        text: String,
    },
    SetEnabled {
        id: &'static str,
        enabled: bool,
    },
    SetClass {
        id: &'static str,
        class: &'static str,
        on: bool,
    },
    /// `None` removes the inline property.
    SetStyle {
        id: &'static str,
        property: &'static str,
        value: Option<String>,
    },
    /// `None` removes the `src` attribute.
    SetImageSource {
        id: &'static str,
        src: Option<Rc<str>>,
    },
    SetAttribute {
        id: &'static str,
        name: &'static str,
        value: String,
    },
    SetSelectValue {
        id: &'static str,
        value: String,
    },
    /// Replaces the option list of a `<select>` when its values differ.
    SetSelectOptions {
        id: &'static str,
        options: Vec<(String, String)>,
    },
    BodyClass {
        class: &'static str,
        on: bool,
    },
    BodyStyle {
        property: &'static str,
        value: Option<String>,
    },
    /// Brings the notification container in line with this list.
    SyncNotifications(Vec<NotificationView>),
}

/// Image sources already written to the page. A preview is a data URL of the
/// whole file, so sources are only sent when they change.
#[derive(Debug, Default)]
pub struct RenderedImages {
    preview: Option<Option<SelectionId>>,
    upscaled: Option<Option<String>>,
}

fn replace_if_changed<T: PartialEq>(slot: &mut Option<T>, next: T) -> bool {
    if slot.as_ref() == Some(&next) {
        return false;
    }
    *slot = Some(next);
    true
}

pub fn render(view: &AppViewModel, images: &mut RenderedImages) -> Vec<DomCommand> {
    let mut cmds = Vec::with_capacity(48);

    render_upload(view, &mut cmds);
    render_controls(view, &mut cmds);
    render_results(view, images, &mut cmds);
    render_metrics(view, &mut cmds);
    render_page(view, &mut cmds);

    cmds.push(DomCommand::SyncNotifications(view.notifications.clone()));
    cmds
}

fn render_upload(view: &AppViewModel, cmds: &mut Vec<DomCommand>) {
    cmds.push(DomCommand::SetClass {
        id: UPLOAD_BOX,
        class: CLASS_DRAGOVER,
        on: view.upload.drag_hover,
    });
    let file = view.upload.file.as_ref();
    cmds.push(DomCommand::SetClass {
        id: UPLOAD_PROMPT,
        class: CLASS_HIDDEN,
        on: file.is_some(),
    });
    cmds.push(DomCommand::SetClass {
        id: FILE_DISPLAY,
        class: CLASS_HIDDEN,
        on: file.is_none(),
    });
    if let Some(file) = file {
        cmds.push(DomCommand::SetText {
            id: FILE_NAME,
            text: file.name.clone(),
        });
        cmds.push(DomCommand::SetText {
            id: FILE_SIZE,
            text: file.size_text.clone(),
        });
    }
}

fn render_controls(view: &AppViewModel, cmds: &mut Vec<DomCommand>) {
    cmds.push(DomCommand::SetSelectValue {
        id: MODE_SELECT,
        value: view.mode.value().to_string(),
    });
    cmds.push(DomCommand::SetSelectOptions {
        id: SCALE_SELECT,
        options: view
            .scale_options
            .iter()
            .map(|option| (option.value.to_string(), option.label.to_string()))
            .collect(),
    });
    cmds.push(DomCommand::SetSelectValue {
        id: SCALE_SELECT,
        value: view.selected_scale.to_string(),
    });
    cmds.push(DomCommand::SetEnabled {
        id: UPSCALE_BUTTON,
        enabled: view.upscale_enabled,
    });
    cmds.push(DomCommand::SetClass {
        id: UPSCALE_BUTTON,
        class: CLASS_PROCESSING,
        on: view.processing,
    });
}

fn render_results(view: &AppViewModel, images: &mut RenderedImages, cmds: &mut Vec<DomCommand>) {
    let comparison = &view.comparison;

    cmds.push(DomCommand::SetClass {
        id: RESULTS,
        class: CLASS_HIDDEN,
        on: !view.results_visible,
    });
    let preview = view.preview.as_ref();
    if replace_if_changed(&mut images.preview, preview.map(|preview| preview.selection)) {
        cmds.push(DomCommand::SetImageSource {
            id: ORIGINAL_IMAGE,
            src: preview.map(|preview| Rc::clone(&preview.src)),
        });
    }
    cmds.push(DomCommand::SetClass {
        id: COMPARISON_CONTAINER,
        class: CLASS_HIDDEN,
        on: !comparison.visible,
    });
    if replace_if_changed(&mut images.upscaled, comparison.upscaled_src.clone()) {
        cmds.push(DomCommand::SetImageSource {
            id: UPSCALED_IMAGE,
            src: comparison.upscaled_src.as_deref().map(Rc::from),
        });
    }
    cmds.push(DomCommand::SetStyle {
        id: DIVIDER,
        property: "left",
        value: Some(divider_left(comparison.reveal_percent)),
    });
    cmds.push(DomCommand::SetStyle {
        id: UPSCALED_IMAGE,
        property: "clip-path",
        value: Some(overlay_clip(comparison.reveal_percent)),
    });
    cmds.push(DomCommand::SetEnabled {
        id: DOWNLOAD_BUTTON,
        enabled: view.download.is_some(),
    });
}

fn render_metrics(view: &AppViewModel, cmds: &mut Vec<DomCommand>) {
    let metrics = &view.metrics;
    for (id, text) in [
        (TECHNIQUE_METRIC, &metrics.technique),
        (MODEL_METRIC, &metrics.model),
        (TIME_METRIC, &metrics.time),
        (RESOLUTION_METRIC, &metrics.resolution),
        (DEVICE_METRIC, &metrics.device),
        (OUTPUT_SIZE_METRIC, &metrics.output_size),
    ] {
        cmds.push(DomCommand::SetText {
            id,
            text: text.clone(),
        });
    }
}

fn render_page(view: &AppViewModel, cmds: &mut Vec<DomCommand>) {
    cmds.push(DomCommand::BodyClass {
        class: CLASS_DARK_MODE,
        on: view.dark_mode,
    });
    cmds.push(DomCommand::SetAttribute {
        id: DARK_MODE_TOGGLE,
        name: "aria-pressed",
        value: view.dark_mode.to_string(),
    });

    cmds.push(DomCommand::SetClass {
        id: HELP_MODAL,
        class: CLASS_ACTIVE,
        on: view.help_open,
    });
    cmds.push(DomCommand::SetClass {
        id: RESEARCH_MODAL,
        class: CLASS_ACTIVE,
        on: view.research_open,
    });

    let locked = view.scroll_lock;
    cmds.push(DomCommand::BodyClass {
        class: CLASS_MODAL_OPEN,
        on: locked.is_some(),
    });
    let lock_style = |value: &str| locked.map(|_| value.to_string());
    cmds.push(DomCommand::BodyStyle {
        property: "overflow",
        value: lock_style("hidden"),
    });
    cmds.push(DomCommand::BodyStyle {
        property: "position",
        value: lock_style("fixed"),
    });
    cmds.push(DomCommand::BodyStyle {
        property: "width",
        value: lock_style("100%"),
    });
    cmds.push(DomCommand::BodyStyle {
        property: "top",
        value: locked.map(|offset| format!("-{offset}px")),
    });

    cmds.push(DomCommand::BodyStyle {
        property: "cursor",
        value: view.comparison.dragging.then(|| "ew-resize".to_string()),
    });
}
