/// Local storage key holding the dark-mode preference.
pub const THEME_STORAGE_KEY: &str = "darkMode";

/// Explicit dark-mode choice persisted by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreference {
    Enabled,
    Disabled,
}

impl ThemePreference {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "enabled" => Some(Self::Enabled),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }

    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// A stored preference always wins over the OS color-scheme default.
pub fn resolve_dark_mode(stored: Option<ThemePreference>, os_prefers_dark: bool) -> bool {
    match stored {
        Some(ThemePreference::Enabled) => true,
        Some(ThemePreference::Disabled) => false,
        None => os_prefers_dark,
    }
}
