// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` bridge for [`VisibilityTrigger`].
//!
//! One observer per trigger, configured from the trigger's threshold and root
//! margin. Each batch of observer entries is handed to
//! [`VisibilityTrigger::deliver`]; released elements are unobserved and the
//! observer disconnects once nothing is left to watch.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use vitrine_core::visibility::{IntersectionEntry, VisibilityTrigger};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::DomElement;
use crate::error::WebError;

type ObserverClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;

fn entry(raw: &IntersectionObserverEntry) -> IntersectionEntry<DomElement> {
    IntersectionEntry {
        target: DomElement::from(raw.target()),
        ratio: raw.intersection_ratio(),
        is_intersecting: raw.is_intersecting(),
    }
}

/// Starts observing every element `trigger` watches.
pub(crate) fn observe(trigger: VisibilityTrigger<DomElement>) -> Result<(), WebError> {
    if trigger.is_empty() {
        return Ok(());
    }
    let options = trigger.options();
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin.to_string());

    let label = trigger.label();
    let trigger = Rc::new(RefCell::new(trigger));
    let state = trigger.clone();
    let closure: ObserverClosure = Closure::wrap(Box::new(
        move |entries: Array, observer: IntersectionObserver| {
            let batch: Vec<_> = entries
                .iter()
                .filter_map(|raw| raw.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|raw| entry(&raw))
                .collect();
            let released = state.borrow_mut().deliver(batch);
            for element in &released {
                observer.unobserve(element.inner());
            }
            if state.borrow().is_empty() {
                tracing::debug!(label, "all elements released; disconnecting");
                observer.disconnect();
            }
        },
    ) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let observer = IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)?;
    for element in trigger.borrow().watched() {
        observer.observe(element.inner());
    }
    tracing::debug!(label, count = trigger.borrow().len(), "observing");
    closure.forget();
    Ok(())
}
