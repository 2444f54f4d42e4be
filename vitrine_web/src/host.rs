// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The browser [`Host`](vitrine_core::host::Host).

use std::fmt;
use std::rc::Rc;

use kurbo::Rect;
use vitrine_core::host::{
    DomEvent, ElementLocator, EventInfo, EventSource, EventTarget, FrameCallback, FrameHost,
    Listener, ScrollBehavior, Viewport,
};
use vitrine_core::time::{Duration, HostTime};
use vitrine_core::timer::{Task, TimerHost, TimerId};
use vitrine_core::visibility::VisibilityTrigger;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, KeyboardEvent, ScrollToOptions, Window};

use crate::dom::{self, DomElement};
use crate::error::WebError;
use crate::observer;
use crate::raf;
use crate::timers::WebTimers;

/// The current page: window, document and timers.
pub struct WebHost {
    window: Window,
    document: Document,
    timers: WebTimers,
}

impl fmt::Debug for WebHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebHost")
            .field("ready_state", &self.document.ready_state())
            .field("timers", &self.timers)
            .finish_non_exhaustive()
    }
}

impl WebHost {
    /// Binds the global window and its document.
    pub fn new() -> Result<Rc<Self>, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = window.document().ok_or(WebError::NoDocument)?;
        Ok(Rc::new(Self {
            window,
            document,
            timers: WebTimers::new(),
        }))
    }

    /// The global window.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The page document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Whether the document is still parsing.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    /// Runs `f` once the document has been parsed: immediately when it
    /// already has, otherwise on `DOMContentLoaded`.
    pub fn when_ready(&self, f: impl FnOnce() + 'static) {
        if !self.is_loading() {
            f();
            return;
        }
        let mut pending = Some(f);
        self.listen(
            EventTarget::Document,
            DomEvent::Ready,
            Box::new(move |_| {
                if let Some(f) = pending.take() {
                    f();
                }
            }),
        );
    }

    fn event_target<'a>(
        &'a self,
        target: EventTarget<'a, DomElement>,
    ) -> &'a web_sys::EventTarget {
        match target {
            EventTarget::Element(element) => element.inner().as_ref(),
            EventTarget::Document => self.document.as_ref(),
            EventTarget::Window => self.window.as_ref(),
        }
    }
}

fn event_info(kind: DomEvent, event: &web_sys::Event) -> EventInfo<DomElement> {
    EventInfo {
        kind,
        target: event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .map(DomElement::from),
        key: event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key),
    }
}

fn scroll_behavior(behavior: ScrollBehavior) -> web_sys::ScrollBehavior {
    match behavior {
        ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
    }
}

impl ElementLocator for WebHost {
    type Element = DomElement;

    fn by_id(&self, id: &str) -> Option<DomElement> {
        self.document.get_element_by_id(id).map(DomElement::from)
    }

    fn query_all(&self, selector: &str) -> Vec<DomElement> {
        match self.document.query_selector_all(selector) {
            Ok(list) => dom::collect(&list),
            Err(_) => {
                tracing::warn!(selector, "invalid selector");
                Vec::new()
            }
        }
    }

    fn create_element(&self, tag: &str) -> Option<DomElement> {
        self.document.create_element(tag).ok().map(DomElement::from)
    }

    fn body(&self) -> Option<DomElement> {
        self.document
            .body()
            .map(|body| DomElement::from(web_sys::Element::from(body)))
    }

    fn head(&self) -> Option<DomElement> {
        self.document
            .head()
            .map(|head| DomElement::from(web_sys::Element::from(head)))
    }
}

impl EventSource for WebHost {
    fn listen(
        &self,
        target: EventTarget<'_, DomElement>,
        kind: DomEvent,
        mut handler: Listener<DomElement>,
    ) {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if kind.prevents_default() {
                event.prevent_default();
            }
            handler(&event_info(kind, &event));
        }) as Box<dyn FnMut(web_sys::Event)>);

        let result = self
            .event_target(target)
            .add_event_listener_with_callback(kind.name(), closure.as_ref().unchecked_ref());
        if let Err(err) = result {
            tracing::warn!(event = kind.name(), error = %WebError::from(err), "addEventListener failed");
        }
        // Listeners live as long as the page.
        closure.forget();
    }
}

impl Viewport for WebHost {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn viewport_rect(&self) -> Rect {
        let extent = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or_default()
        };
        Rect::new(
            0.0,
            0.0,
            extent(self.window.inner_width()),
            extent(self.window.inner_height()),
        )
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(scroll_behavior(behavior));
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn observe_visibility(&self, trigger: VisibilityTrigger<DomElement>) {
        let label = trigger.label();
        if let Err(err) = observer::observe(trigger) {
            tracing::warn!(label, %err, "IntersectionObserver unavailable");
        }
    }
}

impl FrameHost for WebHost {
    fn request_frame(&self, callback: FrameCallback) {
        raf::request_frame(callback);
    }
}

impl TimerHost for WebHost {
    fn now(&self) -> HostTime {
        self.timers.now()
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        self.timers.schedule(delay, task)
    }

    fn cancel(&self, id: TimerId) {
        self.timers.cancel(id);
    }
}
