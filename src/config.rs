use serde::{Deserialize, Serialize};

/// Client settings. The server template may inject a partial
/// `window.LYST_CONFIG = {...}`; anything missing falls back to the defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_quick_search_debounce_ms")]
    pub quick_search_debounce_ms: u32,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u32,
    #[serde(default = "default_admin_debounce_ms")]
    pub admin_search_debounce_ms: u32,
    #[serde(default = "default_filter_debounce_ms")]
    pub filter_debounce_ms: u32,
    #[serde(default = "default_min_query_len")]
    pub min_quick_search_len: usize,
    #[serde(default = "default_scroll_threshold_px")]
    pub scroll_threshold_px: f64,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_theme_key")]
    pub theme_storage_key: String,
    #[serde(default = "default_card_placeholder")]
    pub card_placeholder: String,
    #[serde(default = "default_thumb_placeholder")]
    pub thumb_placeholder: String,
    #[serde(default)]
    pub debug_logs: bool,
}

fn default_quick_search_debounce_ms() -> u32 { 300 }
fn default_search_debounce_ms() -> u32 { 500 }
fn default_admin_debounce_ms() -> u32 { 300 }
fn default_filter_debounce_ms() -> u32 { 300 }
fn default_min_query_len() -> usize { 2 }
fn default_scroll_threshold_px() -> f64 { 500.0 }
fn default_login_path() -> String { "/auth/login".into() }
fn default_theme_key() -> String { "lystTheme".into() }
fn default_card_placeholder() -> String { "https://via.placeholder.com/250x350.png?text=N/A".into() }
fn default_thumb_placeholder() -> String { "https://via.placeholder.com/40x60.png?text=N/A".into() }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            quick_search_debounce_ms: default_quick_search_debounce_ms(),
            search_debounce_ms: default_search_debounce_ms(),
            admin_search_debounce_ms: default_admin_debounce_ms(),
            filter_debounce_ms: default_filter_debounce_ms(),
            min_quick_search_len: default_min_query_len(),
            scroll_threshold_px: default_scroll_threshold_px(),
            login_path: default_login_path(),
            theme_storage_key: default_theme_key(),
            card_placeholder: default_card_placeholder(),
            thumb_placeholder: default_thumb_placeholder(),
            debug_logs: false,
        }
    }
}

impl AppConfig {
    pub fn image_or_placeholder(&self, image: Option<&str>) -> String {
        match image {
            Some(url) if !url.trim().is_empty() => url.to_string(),
            _ => self.card_placeholder.clone(),
        }
    }
}

/// Read `window.LYST_CONFIG`, falling back to defaults.
#[cfg(target_arch = "wasm32")]
pub fn load() -> AppConfig {
    use wasm_bindgen::JsValue;

    let Some(window) = web_sys::window() else {
        return AppConfig::default();
    };
    let raw = js_sys::Reflect::get(&window, &JsValue::from_str("LYST_CONFIG"))
        .unwrap_or(JsValue::UNDEFINED);
    if raw.is_undefined() || raw.is_null() {
        return AppConfig::default();
    }
    match serde_wasm_bindgen::from_value::<AppConfig>(raw) {
        Ok(cfg) => cfg,
        Err(err) => {
            crate::log::warn(
                "config_invalid",
                serde_json::json!({ "error": err.to_string() }),
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{"search_debounce_ms": 750, "debug_logs": true}"#).unwrap();
        assert_eq!(cfg.search_debounce_ms, 750);
        assert!(cfg.debug_logs);
        assert_eq!(cfg.quick_search_debounce_ms, 300);
        assert_eq!(cfg.login_path, "/auth/login");
        assert_eq!(cfg.theme_storage_key, "lystTheme");
    }

    #[test]
    fn empty_image_uses_placeholder() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.image_or_placeholder(Some("  ")), cfg.card_placeholder);
        assert_eq!(cfg.image_or_placeholder(Some("a.png")), "a.png");
        assert_eq!(cfg.image_or_placeholder(None), cfg.card_placeholder);
    }
}
