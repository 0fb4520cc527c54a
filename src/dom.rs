//! Small wrappers over `window`/`document` used by the pages.

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ApiError;
use crate::log;

pub fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(message);
    }
}

pub fn reload() {
    if let Some(w) = web_sys::window() {
        if let Err(e) = w.location().reload() {
            log::error("reload_failed", json!({ "error": format!("{e:?}") }));
        }
    }
}

pub fn redirect(path: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.location().set_href(path);
    }
}

/// Surface a failed call the usual way: 401 goes to the login page,
/// transport failures are only logged, anything else is alerted.
pub fn surface(event: &str, err: &ApiError, login_path: &str) {
    match err {
        ApiError::Unauthorized => redirect(login_path),
        e if e.is_transport() => log::error(event, json!({ "error": e.to_string() })),
        e => {
            log::warn(event, json!({ "error": e.to_string() }));
            alert(&e.alert_text());
        }
    }
}

pub fn pathname() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".into())
}

/// Parse the JSON text of `<script id="..." type="application/json">`.
pub fn embedded_json<T: DeserializeOwned>(element_id: &str) -> Option<T> {
    let doc = web_sys::window()?.document()?;
    let text = doc.get_element_by_id(element_id)?.text_content()?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(err) => {
            log::error("embedded_json_invalid", json!({ "id": element_id, "error": err.to_string() }));
            None
        }
    }
}

/// `(innerHeight, scrollY, body.offsetHeight)`.
pub fn scroll_metrics() -> Option<(f64, f64, f64)> {
    let w = web_sys::window()?;
    let inner = w.inner_height().ok()?.as_f64()?;
    let scroll_y = w.scroll_y().ok()?;
    let body = w.document()?.body()?.offset_height() as f64;
    Some((inner, scroll_y, body))
}
