//! Error helpers for WebAssembly bridge implementations

use bridge_traits::error::BridgeError;
use wasm_bindgen::{JsCast, JsValue};

/// Name the browser gives the `DOMException` thrown when storage is full.
const QUOTA_EXCEEDED: &str = "QuotaExceededError";

/// Name of the `DOMException` a fetch rejects with after `abort()`.
const ABORT: &str = "AbortError";

/// Extract a readable message from a thrown JavaScript value.
pub fn js_message(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        message
    } else if let Some(dom) = err.dyn_ref::<web_sys::DomException>() {
        format!("{}: {}", dom.name(), dom.message())
    } else if let Some(js_err) = err.dyn_ref::<js_sys::Error>() {
        js_err.message().into()
    } else {
        format!("{err:?}")
    }
}

/// Whether a thrown value is the browser's storage quota error.
pub fn is_quota_exceeded(err: &JsValue) -> bool {
    err.dyn_ref::<web_sys::DomException>()
        .map(|dom| dom.name() == QUOTA_EXCEEDED || dom.code() == 22)
        .unwrap_or(false)
}

/// Whether a rejected fetch was aborted through its `AbortSignal`.
pub fn is_abort(err: &JsValue) -> bool {
    err.dyn_ref::<web_sys::DomException>()
        .map(|dom| dom.name() == ABORT)
        .unwrap_or(false)
}

/// Convert a thrown JavaScript value into a bridge error, tagged with the
/// component and operation that raised it.
pub fn js_error(component: &str, context: &str, err: JsValue) -> BridgeError {
    let message = js_message(&err);
    if is_quota_exceeded(&err) {
        BridgeError::QuotaExceeded(format!("{component} {context}: {message}"))
    } else {
        BridgeError::OperationFailed(format!("{component} {context}: {message}"))
    }
}
