// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mobile navigation toggle.

use alloc::boxed::Box;
use alloc::rc::Rc;

use crate::host::{DomEvent, Element, ElementLocator, EventSource, EventTarget, Host};

const OPEN_ICON: &str = "fas fa-times";
const CLOSED_ICON: &str = "fas fa-bars";

/// The collapsible mobile menu (`#mobile-menu`), its toggle button
/// (`#mobile-menu-btn`) and icon (`#menu-icon`).
#[derive(Debug)]
pub struct MobileMenu<E> {
    menu: E,
    icon: Option<E>,
}

impl<E: Element> MobileMenu<E> {
    /// Wires the toggle button and the menu links. Returns `None` when the
    /// page has no mobile menu.
    pub fn install<H: Host<Element = E>>(host: &Rc<H>) -> Option<Rc<Self>> {
        let Some(menu) = host.by_id("mobile-menu") else {
            tracing::debug!("no #mobile-menu; mobile navigation disabled");
            return None;
        };
        let this = Rc::new(Self {
            menu,
            icon: host.by_id("menu-icon"),
        });

        if let Some(button) = host.by_id("mobile-menu-btn") {
            let menu = this.clone();
            host.listen(
                EventTarget::Element(&button),
                DomEvent::Click,
                Box::new(move |_| menu.toggle()),
            );
        }
        for link in host.query_all("#mobile-menu a") {
            let menu = this.clone();
            host.listen(
                EventTarget::Element(&link),
                DomEvent::Click,
                Box::new(move |_| menu.close()),
            );
        }
        Some(this)
    }

    /// Whether the menu is expanded.
    pub fn is_open(&self) -> bool {
        self.menu.has_class("active")
    }

    /// Expands a collapsed menu or collapses an expanded one.
    pub fn toggle(&self) {
        if self.is_open() {
            self.menu.remove_class("active");
            self.set_icon(CLOSED_ICON);
        } else {
            self.menu.add_class("active");
            self.set_icon(OPEN_ICON);
        }
    }

    /// Collapses and hides the menu after a link was followed.
    pub fn close(&self) {
        self.menu.remove_class("active");
        self.menu.add_class("hidden");
        self.set_icon(CLOSED_ICON);
    }

    fn set_icon(&self, class_name: &str) {
        if let Some(icon) = &self.icon {
            icon.set_class_name(class_name);
        }
    }
}
