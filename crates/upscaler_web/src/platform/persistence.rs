use upscaler_core::ThemePreference;
use upscaler_logging::{upscaler_debug, upscaler_warn};
use web_sys::{Storage, Window};

fn local_storage(window: &Window) -> Option<Storage> {
    match window.local_storage() {
        Ok(storage) => storage,
        Err(err) => {
            upscaler_warn!("localStorage unavailable: {:?}", err);
            None
        }
    }
}

/// Stored dark-mode choice. Unknown values count as no choice.
pub(crate) fn load_theme(window: &Window, key: &str) -> Option<ThemePreference> {
    let raw = local_storage(window)?.get_item(key).ok().flatten()?;
    let preference = ThemePreference::parse(&raw);
    if preference.is_none() {
        upscaler_debug!("Ignoring stored {}={:?}", key, raw);
    }
    preference
}

pub(crate) fn save_theme(window: &Window, key: &str, preference: ThemePreference) {
    let Some(storage) = local_storage(window) else {
        return;
    };
    if let Err(err) = storage.set_item(key, preference.as_str()) {
        upscaler_warn!("Failed to persist {}={}: {:?}", key, preference.as_str(), err);
    }
}

pub(crate) fn os_prefers_dark(window: &Window) -> bool {
    window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}
