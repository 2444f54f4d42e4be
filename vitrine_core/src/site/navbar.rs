// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-driven navbar styling and active-link highlighting.
//!
//! Window scroll events go through a [`Throttle`] so the refresh runs at most
//! once per frame interval, with a trailing refresh that always sees the
//! final scroll position.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::host::{
    DomEvent, Element, ElementLocator, ElementOf, EventSource, EventTarget, Host, Viewport,
};
use crate::throttle::Throttle;
use crate::time::Duration;
use crate::trace::Tracer;

/// Picks the section containing `scroll_y`.
///
/// `sections` yields `(id, offset_top, client_height)` in document order. A
/// section spans `[top - offset, top - offset + height)`; when spans overlap
/// the last match wins.
pub fn active_section<'a>(
    scroll_y: f64,
    offset: f64,
    sections: impl IntoIterator<Item = (&'a str, f64, f64)>,
) -> Option<&'a str> {
    sections
        .into_iter()
        .filter(|&(_, top, height)| {
            let start = top - offset;
            scroll_y >= start && scroll_y < start + height
        })
        .last()
        .map(|(id, _, _)| id)
}

/// The fragment an `href` points at: everything after its first character.
fn link_target(href: &str) -> &str {
    let mut chars = href.chars();
    chars.next();
    chars.as_str()
}

/// The fixed navbar (`#navbar`) and the section links (`.nav-link`).
#[derive(Debug)]
pub struct Navbar<H: Host> {
    host: Rc<H>,
    navbar: Option<ElementOf<H>>,
    shadow_offset: f64,
    link_offset: f64,
}

impl<H: Host> Navbar<H> {
    /// Creates the controller and subscribes its throttled refresh to window
    /// scroll events.
    pub fn install(
        host: &Rc<H>,
        throttle_interval: Duration,
        shadow_offset: f64,
        link_offset: f64,
        tracer: Tracer,
    ) -> (Rc<Self>, Throttle<()>) {
        let navbar = host.by_id("navbar");
        if navbar.is_none() {
            tracing::debug!("no #navbar; only active links will update");
        }
        let this = Rc::new(Self {
            host: host.clone(),
            navbar,
            shadow_offset,
            link_offset,
        });

        let refresh = this.clone();
        let throttle = Throttle::new(host.clone(), throttle_interval, move |()| refresh.refresh())
            .traced("navbar-scroll", tracer);
        let on_scroll = throttle.clone();
        host.listen(
            EventTarget::Window,
            DomEvent::Scroll,
            Box::new(move |_| on_scroll.call(())),
        );
        (this, throttle)
    }

    /// Applies the shadow for the current scroll position and updates the
    /// active link.
    pub fn refresh(&self) {
        let scroll_y = self.host.scroll_y();
        if let Some(navbar) = &self.navbar {
            let scrolled = scroll_y > self.shadow_offset;
            navbar.set_class("shadow-lg", scrolled);
            navbar.set_class("shadow-sm", !scrolled);
        }
        self.update_active_links(scroll_y);
    }

    fn update_active_links(&self, scroll_y: f64) {
        let sections: Vec<(String, f64, f64)> = self
            .host
            .query_all("section[id]")
            .into_iter()
            .filter_map(|s| {
                let id = s.attribute("id")?;
                Some((id, s.offset_top(), s.client_height()))
            })
            .collect();
        let current = active_section(
            scroll_y,
            self.link_offset,
            sections.iter().map(|(id, top, h)| (id.as_str(), *top, *h)),
        );

        for link in self.host.query_all(".nav-link") {
            link.remove_class("active");
            let href = link.attribute("href");
            if current.is_some() && href.as_deref().map(link_target) == current {
                link.add_class("active");
            }
        }
    }
}
