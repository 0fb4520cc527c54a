use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable/disable debug records after startup.
pub fn set_debug(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
}

fn format_line(event: &str, context: &Value) -> String {
    if context.is_null() || context.as_object().is_some_and(|o| o.is_empty()) {
        format!("[lyst] {event}")
    } else {
        format!("[lyst] {event} {context}")
    }
}

#[cfg(target_arch = "wasm32")]
fn send(level: &str, event: &str, context: Value) {
    let line = wasm_bindgen::JsValue::from_str(&format_line(event, &context));
    match level {
        "error" => web_sys::console::error_1(&line),
        "warn" => web_sys::console::warn_1(&line),
        "debug" => web_sys::console::debug_1(&line),
        _ => web_sys::console::info_1(&line),
    }
}

// Native builds only run the unit tests.
#[cfg(not(target_arch = "wasm32"))]
fn send(level: &str, event: &str, context: Value) {
    eprintln!("{level:>5} {}", format_line(event, &context));
}

pub fn info(event: &str, context: Value)  { send("info",  event, context); }
pub fn warn(event: &str, context: Value)  { send("warn",  event, context); }
pub fn error(event: &str, context: Value) { send("error", event, context); }
pub fn debug(event: &str, context: Value) {
    if DEBUG_ENABLED.load(Ordering::Relaxed) {
        send("debug", event, context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_context_is_omitted() {
        assert_eq!(format_line("boot", &json!({})), "[lyst] boot");
        assert_eq!(format_line("boot", &Value::Null), "[lyst] boot");
        assert_eq!(
            format_line("bulk_delete_failed", &json!({ "id": 4 })),
            "[lyst] bulk_delete_failed {\"id\":4}"
        );
    }
}
