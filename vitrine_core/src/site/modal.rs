// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generic modal dialogs.

use alloc::boxed::Box;
use alloc::rc::Rc;

use crate::host::{
    DomEvent, Element, ElementLocator, EventInfo, EventSource, EventTarget, Host,
};

/// A modal bound to a container element with an optional `.modal-overlay`
/// and `.modal-close` inside it.
///
/// Overlay clicks (on the overlay itself, not its content), the close
/// button and the Escape key close the modal. While it is open the page body
/// does not scroll.
#[derive(Debug)]
pub struct Modal<E> {
    modal: E,
    overlay: Option<E>,
    body: Option<E>,
}

impl<E: Element> Modal<E> {
    /// Binds the modal with the given element id. Returns `None` when no
    /// such element exists.
    pub fn bind<H: Host<Element = E>>(host: &Rc<H>, id: &str) -> Option<Rc<Self>> {
        let Some(modal) = host.by_id(id) else {
            tracing::debug!(id, "no modal with this id");
            return None;
        };
        let this = Rc::new(Self {
            overlay: modal.query(".modal-overlay"),
            body: host.body(),
            modal,
        });

        if let Some(overlay) = &this.overlay {
            let modal = this.clone();
            host.listen(
                EventTarget::Element(overlay),
                DomEvent::Click,
                Box::new(move |event: &EventInfo<E>| {
                    if event.target.as_ref() == modal.overlay.as_ref() {
                        modal.close();
                    }
                }),
            );
        }
        if let Some(close) = this.modal.query(".modal-close") {
            let modal = this.clone();
            host.listen(
                EventTarget::Element(&close),
                DomEvent::Click,
                Box::new(move |_| modal.close()),
            );
        }
        let modal = this.clone();
        host.listen(
            EventTarget::Document,
            DomEvent::KeyDown,
            Box::new(move |event: &EventInfo<E>| {
                if event.key.as_deref() == Some("Escape") && modal.is_open() {
                    modal.close();
                }
            }),
        );
        Some(this)
    }

    /// Shows the modal and locks body scrolling.
    pub fn open(&self) {
        self.modal.add_class("active");
        if let Some(overlay) = &self.overlay {
            overlay.add_class("active");
        }
        if let Some(body) = &self.body {
            body.set_style("overflow", "hidden");
        }
    }

    /// Hides the modal and restores body scrolling.
    pub fn close(&self) {
        self.modal.remove_class("active");
        if let Some(overlay) = &self.overlay {
            overlay.remove_class("active");
        }
        if let Some(body) = &self.body {
            body.set_style("overflow", "");
        }
    }

    /// Whether the modal is showing.
    pub fn is_open(&self) -> bool {
        self.modal.has_class("active")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::testing::{FakeElement, FakeHost};

    struct Page {
        host: Rc<FakeHost>,
        overlay: FakeElement,
        content: FakeElement,
        close: FakeElement,
        modal: Rc<Modal<FakeElement>>,
    }

    fn page() -> Page {
        let host = FakeHost::new();
        let content = FakeElement::new("div").with_class("modal-content");
        let close = FakeElement::new("button").with_class("modal-close");
        let overlay = FakeElement::new("div")
            .with_class("modal-overlay")
            .with_child(content.clone().with_child(close.clone()));
        host.add(FakeElement::new("div").with_id("galeria").with_child(overlay.clone()));
        let modal = Modal::bind(&host, "galeria").unwrap();
        Page {
            host,
            overlay,
            content,
            close,
            modal,
        }
    }

    #[test]
    fn open_and_close_toggle_classes_and_scroll_lock() {
        let p = page();
        p.modal.open();
        assert!(p.modal.is_open(), "modal should be open");
        assert!(p.overlay.has_class("active"), "overlay should be active");
        assert_eq!(p.host.body_element().style("overflow"), "hidden");

        p.modal.close();
        assert!(!p.modal.is_open(), "modal should be closed");
        assert!(!p.overlay.has_class("active"), "overlay should be inactive");
        assert_eq!(p.host.body_element().style("overflow"), "");
    }

    #[test]
    fn overlay_click_closes_but_content_click_does_not() {
        let p = page();
        p.modal.open();
        p.host.dispatch(&p.content, DomEvent::Click);
        assert!(p.modal.is_open(), "click inside content must not close");

        p.host.dispatch(&p.overlay, DomEvent::Click);
        assert!(!p.modal.is_open(), "overlay click must close");
    }

    #[test]
    fn close_button_and_escape_close() {
        let p = page();
        p.modal.open();
        p.host.dispatch(&p.close, DomEvent::Click);
        assert!(!p.modal.is_open(), "close button must close");

        p.modal.open();
        p.host.key_down("Enter");
        assert!(p.modal.is_open(), "other keys are ignored");
        p.host.key_down("Escape");
        assert!(!p.modal.is_open(), "escape must close");
    }

    #[test]
    fn escape_on_closed_modal_keeps_body_style() {
        let p = page();
        p.host.body_element().set_style("overflow", "auto");
        p.host.key_down("Escape");
        assert_eq!(p.host.body_element().style("overflow"), "auto");
    }

    #[test]
    fn unknown_id_binds_nothing() {
        let host = FakeHost::new();
        assert!(Modal::bind(&host, "nope").is_none(), "missing modal");
    }
}
