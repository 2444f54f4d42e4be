// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clock and `requestAnimationFrame` bindings.
//!
//! Each frame callback receives a [`DOMHighResTimeStamp`][mdn] (milliseconds
//! on the `performance.now()` clock), which is converted to microsecond
//! [`HostTime`] ticks.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use vitrine_core::host::FrameCallback;
use vitrine_core::time::HostTime;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window` methods, so nothing
// has to fetch (and unwrap) the Window or Performance objects per call.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;
}

/// Returns the current host time from `performance.now()`.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(performance_now())
}

/// Runs `callback` once on the next animation frame.
pub(crate) fn request_frame(callback: FrameCallback) {
    let closure = Closure::once_into_js(move |timestamp_ms: f64| {
        callback(HostTime::from_millis_f64(timestamp_ms));
    });
    request_animation_frame(&closure);
}
