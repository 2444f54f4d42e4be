// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrolling and viewport helpers.

use alloc::rc::Rc;

use kurbo::Rect;

use crate::host::{Element, ElementLocator, ElementOf, Host, ScrollBehavior, Viewport};

/// Returns `true` when `rect` lies entirely inside `viewport`.
#[must_use]
pub fn is_in_viewport(rect: Rect, viewport: Rect) -> bool {
    rect.y0 >= viewport.y0
        && rect.x0 >= viewport.x0
        && rect.y1 <= viewport.y1
        && rect.x1 <= viewport.x1
}

/// Distance from the document top to `element`, summed along its
/// offset-parent chain.
pub fn element_offset<E: Element>(element: &E) -> f64 {
    let mut offset = 0.0;
    let mut current = Some(element.clone());
    while let Some(node) = current {
        offset += node.offset_top();
        current = node.offset_parent();
    }
    offset
}

/// Smooth scrolling that leaves room for the fixed header.
#[derive(Debug)]
pub struct ScrollHelper<H> {
    host: Rc<H>,
    header_offset: f64,
}

impl<H: Host> ScrollHelper<H> {
    /// Creates a helper that stops `header_offset` pixels above its targets.
    pub fn new(host: Rc<H>, header_offset: f64) -> Self {
        Self {
            host,
            header_offset,
        }
    }

    /// Smooth-scrolls to the section with id `id`. Returns `false` when no
    /// such element exists.
    pub fn scroll_to_section(&self, id: &str) -> bool {
        let Some(section) = self.host.by_id(id) else {
            tracing::debug!(id, "scroll target not found");
            return false;
        };
        self.smooth_scroll_to(&section, self.header_offset);
        true
    }

    /// Smooth-scrolls so `element` sits `offset` pixels below the viewport
    /// top.
    pub fn smooth_scroll_to(&self, element: &ElementOf<H>, offset: f64) {
        self.host
            .scroll_to(element.offset_top() - offset, ScrollBehavior::Smooth);
    }

    /// Whether `element` is fully visible.
    pub fn is_visible(&self, element: &ElementOf<H>) -> bool {
        is_in_viewport(element.bounding_rect(), self.host.viewport_rect())
    }
}
