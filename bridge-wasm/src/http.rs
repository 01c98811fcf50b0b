//! `fetch`-backed `HEAD` requests for the browser.
//!
//! Relative URLs go out as same-origin requests and absolute ones as CORS
//! requests. The browser HTTP cache is bypassed so every check reaches the
//! proxy. A request timeout schedules `AbortController::abort`, and the
//! rejected fetch is reported as a timeout.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result as BridgeResult},
    http::{HttpClient, HttpRequest, HttpResponse},
};
use gloo_timers::callback::Timeout;
use std::collections::HashMap;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, AbortSignal, Headers, Request, RequestCache, RequestInit, RequestMode,
    Response, Window,
};

use crate::error::{is_abort, js_error};

const COMPONENT: &str = "WasmHttpClient";

/// Response headers copied into [`HttpResponse`].
const KEPT_HEADERS: [&str; 3] = ["content-type", "content-length", "accept-ranges"];

/// Browser HTTP client backed by `window.fetch`.
pub struct WasmHttpClient {
    window: Window,
}

impl WasmHttpClient {
    /// Create a new client bound to the current browser window.
    pub fn new() -> BridgeResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| BridgeError::NotAvailable("window".to_string()))?;
        Ok(Self { window })
    }
}

/// Same-origin for path-relative URLs, CORS for everything else.
pub(crate) fn request_mode(url: &str) -> RequestMode {
    if url.starts_with('/') && !url.starts_with("//") {
        RequestMode::SameOrigin
    } else {
        RequestMode::Cors
    }
}

pub(crate) fn build_request(
    request: &HttpRequest,
    signal: Option<&AbortSignal>,
) -> BridgeResult<Request> {
    let init = RequestInit::new();
    init.set_method("HEAD");
    init.set_mode(request_mode(&request.url));
    init.set_cache(RequestCache::NoStore);
    init.set_signal(signal);

    let headers = Headers::new().map_err(|err| js_error(COMPONENT, "create headers", err))?;
    for (key, value) in &request.headers {
        headers
            .set(key, value)
            .map_err(|err| js_error(COMPONENT, "set header", err))?;
    }
    init.set_headers(&headers);

    Request::new_with_str_and_init(&request.url, &init)
        .map_err(|err| js_error(COMPONENT, "build request", err))
}

fn kept_headers(response: &Response) -> HashMap<String, String> {
    let headers = response.headers();
    KEPT_HEADERS
        .iter()
        .filter_map(|name| {
            let value = headers.get(name).ok().flatten()?;
            Some((name.to_string(), value))
        })
        .collect()
}

#[async_trait(?Send)]
impl HttpClient for WasmHttpClient {
    async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse> {
        let controller = match request.timeout {
            Some(_) => Some(
                AbortController::new()
                    .map_err(|err| js_error(COMPONENT, "create abort controller", err))?,
            ),
            None => None,
        };
        let signal = controller.as_ref().map(|c| c.signal());
        let req = build_request(&request, signal.as_ref())?;

        // Dropping the timer cancels the pending abort.
        let _abort_timer = match (request.timeout, controller) {
            (Some(timeout), Some(controller)) => {
                let millis = timeout.as_millis().min(u32::MAX as u128) as u32;
                Some(Timeout::new(millis, move || controller.abort()))
            }
            _ => None,
        };

        let value = JsFuture::from(self.window.fetch_with_request(&req))
            .await
            .map_err(|err| {
                if is_abort(&err) {
                    BridgeError::OperationFailed(format!(
                        "HEAD request timed out after {} ms",
                        request.timeout.map(|t| t.as_millis()).unwrap_or_default()
                    ))
                } else {
                    js_error(COMPONENT, "fetch", err)
                }
            })?;
        let response: Response = value
            .dyn_into()
            .map_err(|_| BridgeError::OperationFailed("fetch returned non-Response".into()))?;

        Ok(HttpResponse {
            status: response.status(),
            headers: kept_headers(&response),
        })
    }
}
