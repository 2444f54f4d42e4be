// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entrance animations for elements carrying an `animate-*` class.

use alloc::rc::Rc;

use crate::host::{Element, ElementLocator, Host, Viewport};
use crate::trace::Tracer;
use crate::visibility::{ObserveOptions, VisibilityTrigger};

/// Selector for entrance-animated elements.
pub const ANIMATED: &str = "[class*=\"animate-\"]";

/// Settles an element into its final pose; the stylesheet transitions it.
pub fn reveal<E: Element>(element: &E) {
    element.set_style("opacity", "1");
    element.set_style("transform", "translateY(0) translateX(0) scale(1)");
}

/// Watches every animated element and reveals it each time it scrolls into
/// view. Returns the number of elements watched.
pub fn install<H: Host>(host: &Rc<H>, options: ObserveOptions, tracer: Tracer) -> usize {
    let elements = host.query_all(ANIMATED);
    let count = elements.len();
    if count == 0 {
        tracing::debug!("no animated elements");
        return 0;
    }
    let trigger = VisibilityTrigger::observe(elements, reveal, options).traced("reveal", tracer);
    host.observe_visibility(trigger);
    count
}
