#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Unknown or missing values fall back to dark.
    pub fn parse(value: Option<&str>) -> Theme {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Stored preference, or dark.
#[cfg(target_arch = "wasm32")]
pub fn load(key: &str) -> Theme {
    let stored = storage().and_then(|s| s.get_item(key).ok().flatten());
    Theme::parse(stored.as_deref())
}

/// Set `<body data-theme>` and persist the choice.
#[cfg(target_arch = "wasm32")]
pub fn apply(key: &str, theme: Theme) {
    if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let _ = body.dataset().set("theme", theme.as_str());
    }
    if let Some(s) = storage() {
        if s.set_item(key, theme.as_str()).is_err() {
            crate::log::warn("theme_not_persisted", serde_json::json!({ "theme": theme.as_str() }));
        }
    }
}
