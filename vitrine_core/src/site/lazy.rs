// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred image loading and critical-image preloading.

use alloc::rc::Rc;
use alloc::string::String;

use crate::host::{Element, ElementLocator, Host, Viewport};
use crate::trace::Tracer;
use crate::visibility::{ObserveOptions, VisibilityTrigger};

/// Swaps `data-src` into `src` and drops the skeleton placeholder.
pub fn load_image<E: Element>(image: &E) {
    if let Some(src) = image.attribute("data-src") {
        image.set_attribute("src", &src);
    }
    image.remove_class("skeleton");
}

/// Watches every `img[data-src]` and loads each one the first time it
/// enters the viewport. Returns the number of images watched.
pub fn install<H: Host>(host: &Rc<H>, options: ObserveOptions, tracer: Tracer) -> usize {
    let images = host.query_all("img[data-src]");
    let count = images.len();
    if count == 0 {
        tracing::debug!("no lazy images");
        return 0;
    }
    let trigger = VisibilityTrigger::observe(images, load_image, options).traced("lazy", tracer);
    host.observe_visibility(trigger);
    count
}

/// Appends a `<link rel="preload" as="image">` to `<head>` for each source.
/// Returns the number of links added.
pub fn preload<H: Host>(host: &H, sources: &[String]) -> usize {
    let Some(head) = host.head() else {
        tracing::debug!("no <head>; skipping image preloads");
        return 0;
    };
    let mut added = 0;
    for src in sources {
        let Some(link) = host.create_element("link") else {
            continue;
        };
        link.set_attribute("rel", "preload");
        link.set_attribute("as", "image");
        link.set_attribute("href", src);
        head.append_child(&link);
        added += 1;
    }
    added
}
