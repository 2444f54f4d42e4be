// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Landing page entry point.
//!
//! On load this reads the optional `#vitrine-config` JSON overrides, installs
//! console logging, and once the document is parsed installs every page
//! controller. The installed [`Site`] lives in a thread-local so the
//! functions exported to page scripts (`scrollToSection`, `notify`,
//! `openModal`, `closeModal`) can reach it.

use std::cell::RefCell;
use std::rc::Rc;

use vitrine_core::config::SiteConfig;
use vitrine_core::site::Site;
use vitrine_core::site::form::SimulatedSubmitter;
use vitrine_core::time::Duration;
use vitrine_web::WebHost;
use wasm_bindgen::prelude::*;

thread_local! {
    static SITE: RefCell<Option<Site<WebHost>>> = const { RefCell::new(None) };
}

fn with_site<R>(f: impl FnOnce(&Site<WebHost>) -> R) -> Option<R> {
    SITE.with(|slot| slot.borrow().as_ref().map(f))
}

fn install(host: Rc<WebHost>, config: SiteConfig) {
    let submitter = Rc::new(SimulatedSubmitter::new(host.clone(), config.submit_delay()));
    match Site::install(host, config, submitter, vitrine_web::tracer()) {
        Ok(site) => SITE.with(|slot| *slot.borrow_mut() = Some(site)),
        Err(err) => tracing::error!(%err, "site configuration rejected"),
    }
}

/// Converts a JS millisecond count; negative and NaN inputs become zero.
fn millis_from_js(ms: f64) -> Duration {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to a non-negative millisecond count; larger values saturate"
    )]
    let ms = ms.max(0.0) as u64;
    Duration::from_millis(ms)
}

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let host = WebHost::new()?;
    let config = vitrine_web::page_config(&host)?;
    vitrine_web::init_logging(&config.log_filter)?;
    tracing::debug!(?config, "starting");

    let ready = host.clone();
    host.when_ready(move || install(ready, config));
    Ok(())
}

/// Smooth-scrolls to the section with the given id.
#[wasm_bindgen(js_name = scrollToSection)]
pub fn scroll_to_section(id: &str) -> bool {
    with_site(|site| site.scroll_to_section(id)).unwrap_or(false)
}

/// Shows a notification. `kind` is one of `success`, `error`, `warning` or
/// `info` (the default); `duration_ms` defaults to the configured lifetime.
#[wasm_bindgen]
pub fn notify(message: &str, kind: Option<String>, duration_ms: Option<f64>) -> bool {
    with_site(|site| {
        site.notify(
            message,
            kind.as_deref().unwrap_or("info"),
            duration_ms.map(millis_from_js),
        )
        .is_some()
    })
    .unwrap_or(false)
}

/// Opens the modal with the given element id.
#[wasm_bindgen(js_name = openModal)]
pub fn open_modal(id: &str) -> bool {
    with_site(|site| site.open_modal(id)).unwrap_or(false)
}

/// Closes the modal with the given element id.
#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal(id: &str) -> bool {
    with_site(|site| site.close_modal(id)).unwrap_or(false)
}
