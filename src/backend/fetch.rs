use super::{Reply, Transport, TransportError};
use crate::debug::debug_log;
use futures::future::{select, Either};
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Default bound on how long a route request may stay in flight.
pub const DEFAULT_TIMEOUT_MS: u32 = 15_000;

/// Routing-backend transport speaking `fetch` from the browser.
pub struct FetchTransport {
    base_url: String,
    timeout_ms: u32,
}

impl FetchTransport {
    pub fn new(base_url: &str) -> Self {
        FetchTransport {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn set_timeout_ms(&mut self, timeout_ms: u32) {
        self.timeout_ms = timeout_ms;
    }

    async fn send(&self, payload: &str, user: Option<&str>) -> Result<Reply, TransportError> {
        let url = format!("{}/maps/calculate-route", self.base_url);
        let mut opts = RequestInit::new();
        opts.method("POST");
        opts.mode(RequestMode::Cors);
        opts.body(Some(&JsValue::from_str(payload)));
        let request =
            Request::new_with_str_and_init(&url, &opts).map_err(|err| network_error(&err))?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|err| network_error(&err))?;
        if let Some(user) = user {
            request
                .headers()
                .set("x-user-id", user)
                .map_err(|err| network_error(&err))?;
        }
        let window =
            web_sys::window().ok_or_else(|| TransportError::Network("no window".into()))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|err| network_error(&err))?;
        let response: Response = response.dyn_into().map_err(|err| network_error(&err))?;
        let status = response.status();
        let text = JsFuture::from(response.text().map_err(|err| network_error(&err))?)
            .await
            .map_err(|err| network_error(&err))?;
        debug_log!("backend replied with status {}", status);
        Ok(Reply {
            status,
            body: text.as_string().unwrap_or_default(),
        })
    }
}

impl Transport for FetchTransport {
    async fn execute(&self, payload: &str, user: Option<&str>) -> Result<Reply, TransportError> {
        // The reply is raced against a timer; a reply arriving after the
        // timer fired is simply dropped.
        let send = Box::pin(self.send(payload, user));
        let timer = Box::pin(sleep(self.timeout_ms));
        match select(send, timer).await {
            Either::Left((reply, _)) => reply,
            Either::Right(((), _)) => Err(TransportError::Timeout(self.timeout_ms)),
        }
    }
}

fn network_error(value: &JsValue) -> TransportError {
    let detail = value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value));
    TransportError::Network(detail)
}

// Resolves after the given number of milliseconds, via `setTimeout`.
async fn sleep(ms: u32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .expect("no window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32)
            .expect("setTimeout failed");
    });
    let _ = JsFuture::from(promise).await;
}
