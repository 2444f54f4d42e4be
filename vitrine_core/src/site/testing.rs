// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host for controller tests.
//!
//! [`FakeHost`] is a tiny document: a tree of [`FakeElement`] nodes, a
//! selector matcher covering the selectors the controllers use (tag, `#id`,
//! `.class`, `[attr]`, `[attr="v"]`, `[attr*="v"]` and the descendant
//! combinator), bubbling event dispatch, an animation-frame queue and a
//! manual intersection feed. Time comes from [`ManualTimers`].

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use kurbo::Rect;

use crate::host::{
    DomEvent, Element, ElementLocator, EventInfo, EventSource, EventTarget, FrameCallback,
    FrameHost, Listener, ScrollBehavior, Viewport,
};
use crate::time::{Duration, HostTime};
use crate::timer::{ManualTimers, Task, TimerHost, TimerId};
use crate::visibility::{IntersectionEntry, VisibilityTrigger};

type SharedListener = Rc<RefCell<Listener<FakeElement>>>;

// ---------------------------------------------------------------------------
// FakeElement
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Node {
    tag: String,
    classes: RefCell<Vec<String>>,
    attrs: RefCell<Vec<(String, String)>>,
    style: RefCell<Vec<(String, String)>>,
    text: RefCell<String>,
    html: RefCell<String>,
    value: RefCell<String>,
    disabled: Cell<bool>,
    offset_top: Cell<f64>,
    client_height: Cell<f64>,
    rect: Cell<Rect>,
    parent: RefCell<Weak<Node>>,
    offset_parent: RefCell<Weak<Node>>,
    children: RefCell<Vec<FakeElement>>,
    listeners: RefCell<Vec<(DomEvent, SharedListener)>>,
}

/// A node in a [`FakeHost`] document.
#[derive(Clone)]
pub(crate) struct FakeElement(Rc<Node>);

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.0.tag)?;
        if let Some(id) = self.attribute("id") {
            write!(f, " id={id:?}")?;
        }
        let class = self.class_name();
        if !class.is_empty() {
            write!(f, " class={class:?}")?;
        }
        write!(f, ">")
    }
}

impl FakeElement {
    pub(crate) fn new(tag: &str) -> Self {
        Self(Rc::new(Node {
            tag: tag.to_string(),
            ..Node::default()
        }))
    }

    pub(crate) fn with_id(self, id: &str) -> Self {
        self.set_attribute("id", id);
        self
    }

    pub(crate) fn with_class(self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub(crate) fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub(crate) fn with_html(self, html: &str) -> Self {
        self.set_inner_html(html);
        self
    }

    pub(crate) fn with_layout(self, offset_top: f64, client_height: f64) -> Self {
        self.0.offset_top.set(offset_top);
        self.0.client_height.set(client_height);
        self
    }

    pub(crate) fn with_offset_parent(self, parent: &Self) -> Self {
        *self.0.offset_parent.borrow_mut() = Rc::downgrade(&parent.0);
        self
    }

    pub(crate) fn with_child(self, child: Self) -> Self {
        self.append_child(&child);
        self
    }

    pub(crate) fn tag(&self) -> &str {
        &self.0.tag
    }

    pub(crate) fn text(&self) -> String {
        self.0.text.borrow().clone()
    }

    pub(crate) fn set_value(&self, value: &str) {
        *self.0.value.borrow_mut() = value.to_string();
    }

    pub(crate) fn is_disabled(&self) -> bool {
        self.0.disabled.get()
    }

    pub(crate) fn set_rect(&self, rect: Rect) {
        self.0.rect.set(rect);
    }

    pub(crate) fn children(&self) -> Vec<Self> {
        self.0.children.borrow().clone()
    }

    pub(crate) fn is_attached_to(&self, ancestor: &Self) -> bool {
        let mut current = self.parent();
        while let Some(node) = current {
            if node == *ancestor {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Descendants in document order.
    fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        fn walk(node: &FakeElement, out: &mut Vec<FakeElement>) {
            for child in node.0.children.borrow().iter() {
                out.push(child.clone());
                walk(child, out);
            }
        }
        walk(self, &mut out);
        out
    }

    fn listeners_for(&self, kind: DomEvent) -> Vec<SharedListener> {
        self.0
            .listeners
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, l)| l.clone())
            .collect()
    }
}

impl Element for FakeElement {
    fn add_class(&self, class: &str) {
        let mut classes = self.0.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.classes.borrow_mut().retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().iter().any(|c| c == class)
    }

    fn class_name(&self) -> String {
        self.0.classes.borrow().join(" ")
    }

    fn set_class_name(&self, value: &str) {
        *self.0.classes.borrow_mut() = value.split_whitespace().map(ToString::to_string).collect();
    }

    fn style(&self, property: &str) -> String {
        self.0
            .style
            .borrow()
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut style = self.0.style.borrow_mut();
        style.retain(|(k, _)| k != property);
        if !value.is_empty() {
            style.push((property.to_string(), value.to_string()));
        }
    }

    fn set_text(&self, text: &str) {
        self.0.children.borrow_mut().clear();
        *self.0.text.borrow_mut() = text.to_string();
        *self.0.html.borrow_mut() = text.to_string();
    }

    fn inner_html(&self) -> String {
        self.0.html.borrow().clone()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.children.borrow_mut().clear();
        self.0.text.borrow_mut().clear();
        *self.0.html.borrow_mut() = html.to_string();
    }

    fn attribute(&self, name: &str) -> Option<String> {
        if name == "class" {
            return Some(self.class_name());
        }
        self.0
            .attrs
            .borrow()
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if name == "class" {
            self.set_class_name(value);
            return;
        }
        let mut attrs = self.0.attrs.borrow_mut();
        attrs.retain(|(k, _)| k != name);
        attrs.push((name.to_string(), value.to_string()));
    }

    fn value(&self) -> String {
        self.0.value.borrow().clone()
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.disabled.set(disabled);
    }

    fn reset_form(&self) {
        if self.0.tag != "form" {
            return;
        }
        for node in self.descendants() {
            node.0.value.borrow_mut().clear();
        }
    }

    fn offset_top(&self) -> f64 {
        self.0.offset_top.get()
    }

    fn offset_parent(&self) -> Option<Self> {
        self.0.offset_parent.borrow().upgrade().map(Self)
    }

    fn client_height(&self) -> f64 {
        self.0.client_height.get()
    }

    fn bounding_rect(&self) -> Rect {
        self.0.rect.get()
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(Self)
    }

    fn query(&self, selector: &str) -> Option<Self> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        let selector = Selector::parse(selector);
        self.descendants()
            .into_iter()
            .filter(|node| selector.matches(node))
            .collect()
    }

    fn append_child(&self, child: &Self) {
        child.remove();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    fn remove(&self) {
        if let Some(parent) = self.parent() {
            parent.0.children.borrow_mut().retain(|c| c != self);
        }
        *self.0.parent.borrow_mut() = Weak::new();
    }
}

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, AttrOp)>,
}

#[derive(Debug)]
enum AttrOp {
    Exists,
    Equals(String),
    Contains(String),
}

#[derive(Debug)]
struct Selector(Vec<Compound>);

impl Selector {
    fn parse(source: &str) -> Self {
        Self(source.split_whitespace().map(Compound::parse).collect())
    }

    fn matches(&self, node: &FakeElement) -> bool {
        let Some((last, ancestors)) = self.0.split_last() else {
            return false;
        };
        if !last.matches(node) {
            return false;
        }
        let mut current = node.parent();
        for compound in ancestors.iter().rev() {
            loop {
                let Some(candidate) = current else {
                    return false;
                };
                current = candidate.parent();
                if compound.matches(&candidate) {
                    break;
                }
            }
        }
        true
    }
}

impl Compound {
    fn parse(source: &str) -> Self {
        let mut compound = Self::default();
        let mut rest = source;
        let ident_end = |s: &str| {
            s.find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
                .unwrap_or(s.len())
        };
        while let Some(c) = rest.chars().next() {
            match c {
                '#' | '.' => {
                    let end = ident_end(&rest[1..]) + 1;
                    let name = rest[1..end].to_string();
                    if c == '#' {
                        compound.id = Some(name);
                    } else {
                        compound.classes.push(name);
                    }
                    rest = &rest[end..];
                }
                '[' => {
                    let end = rest.find(']').unwrap_or(rest.len());
                    let body = &rest[1..end];
                    let unquote = |v: &str| v.trim_matches(|q| q == '"' || q == '\'').to_string();
                    let attr = if let Some((name, value)) = body.split_once("*=") {
                        (name.to_string(), AttrOp::Contains(unquote(value)))
                    } else if let Some((name, value)) = body.split_once('=') {
                        (name.to_string(), AttrOp::Equals(unquote(value)))
                    } else {
                        (body.to_string(), AttrOp::Exists)
                    };
                    compound.attrs.push(attr);
                    rest = rest.get(end + 1..).unwrap_or("");
                }
                _ => {
                    let end = ident_end(rest).max(1);
                    compound.tag = Some(rest[..end].to_string());
                    rest = &rest[end..];
                }
            }
        }
        compound
    }

    fn matches(&self, node: &FakeElement) -> bool {
        if self.tag.as_deref().is_some_and(|tag| tag != node.tag()) {
            return false;
        }
        if let Some(id) = &self.id {
            if node.attribute("id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| node.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|(name, op)| {
            let value = node.attribute(name);
            match (op, value) {
                (_, None) => false,
                (AttrOp::Exists, Some(_)) => true,
                (AttrOp::Equals(want), Some(v)) => v == *want,
                (AttrOp::Contains(want), Some(v)) => v.contains(want.as_str()),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// FakeHost
// ---------------------------------------------------------------------------

/// An in-memory document with virtual time.
pub(crate) struct FakeHost {
    pub(crate) timers: ManualTimers,
    html: FakeElement,
    head: FakeElement,
    body: FakeElement,
    scroll_y: Cell<f64>,
    viewport: Cell<Rect>,
    scrolls: RefCell<Vec<(f64, ScrollBehavior)>>,
    frames: RefCell<Vec<FrameCallback>>,
    document_listeners: RefCell<Vec<(DomEvent, SharedListener)>>,
    window_listeners: RefCell<Vec<(DomEvent, SharedListener)>>,
    triggers: RefCell<Vec<Rc<RefCell<VisibilityTrigger<FakeElement>>>>>,
    unobserved: RefCell<Vec<FakeElement>>,
}

impl fmt::Debug for FakeHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeHost")
            .field("timers", &self.timers)
            .field("scroll_y", &self.scroll_y.get())
            .field("frames", &self.frames.borrow().len())
            .field("triggers", &self.triggers.borrow().len())
            .finish_non_exhaustive()
    }
}

impl FakeHost {
    pub(crate) fn new() -> Rc<Self> {
        let head = FakeElement::new("head");
        let body = FakeElement::new("body");
        let html = FakeElement::new("html").with_child(head.clone()).with_child(body.clone());
        Rc::new(Self {
            timers: ManualTimers::new(),
            html,
            head,
            body,
            scroll_y: Cell::new(0.0),
            viewport: Cell::new(Rect::new(0.0, 0.0, 1280.0, 800.0)),
            scrolls: RefCell::new(Vec::new()),
            frames: RefCell::new(Vec::new()),
            document_listeners: RefCell::new(Vec::new()),
            window_listeners: RefCell::new(Vec::new()),
            triggers: RefCell::new(Vec::new()),
            unobserved: RefCell::new(Vec::new()),
        })
    }

    /// Appends `element` to `<body>` and returns it.
    pub(crate) fn add(&self, element: FakeElement) -> FakeElement {
        self.body.append_child(&element);
        element
    }

    pub(crate) fn head_element(&self) -> &FakeElement {
        &self.head
    }

    pub(crate) fn body_element(&self) -> &FakeElement {
        &self.body
    }

    pub(crate) fn set_scroll_y(&self, y: f64) {
        self.scroll_y.set(y);
    }

    pub(crate) fn scrolls(&self) -> Vec<(f64, ScrollBehavior)> {
        self.scrolls.borrow().clone()
    }

    /// Advances virtual time to `ms` milliseconds, running due timers.
    pub(crate) fn advance_to_ms(&self, ms: u64) {
        self.timers.advance_to(HostTime::from_millis(ms));
    }

    /// Advances virtual time by `ms` milliseconds, running due timers.
    pub(crate) fn advance_ms(&self, ms: u64) {
        self.timers.advance(Duration::from_millis(ms));
    }

    /// Advances time by `step` and runs the frame callbacks queued before
    /// this call. Returns how many ran.
    pub(crate) fn frame(&self, step: Duration) -> usize {
        self.timers.advance(step);
        let callbacks = core::mem::take(&mut *self.frames.borrow_mut());
        let now = self.timers.now();
        let count = callbacks.len();
        for callback in callbacks {
            callback(now);
        }
        count
    }

    pub(crate) fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Dispatches `kind` on `target`, bubbling through its ancestors and
    /// then the document. Focus and blur do not bubble.
    pub(crate) fn dispatch(&self, target: &FakeElement, kind: DomEvent) {
        let info = EventInfo {
            kind,
            target: Some(target.clone()),
            key: None,
        };
        let mut handlers = target.listeners_for(kind);
        if !matches!(kind, DomEvent::Focus | DomEvent::Blur) {
            let mut current = target.parent();
            while let Some(node) = current {
                handlers.extend(node.listeners_for(kind));
                current = node.parent();
            }
            handlers.extend(Self::matching(&self.document_listeners, kind));
        }
        Self::run(&handlers, &info);
    }

    /// Dispatches a `keydown` with `key` on the document.
    pub(crate) fn key_down(&self, key: &str) {
        let info = EventInfo {
            kind: DomEvent::KeyDown,
            target: None,
            key: Some(key.to_string()),
        };
        Self::run(&Self::matching(&self.document_listeners, DomEvent::KeyDown), &info);
    }

    pub(crate) fn dispatch_window(&self, kind: DomEvent) {
        let info = EventInfo {
            kind,
            target: None,
            key: None,
        };
        Self::run(&Self::matching(&self.window_listeners, kind), &info);
    }

    /// Feeds one intersection observation for `element` to every trigger.
    pub(crate) fn intersect(&self, element: &FakeElement, ratio: f64) {
        let triggers = self.triggers.borrow().clone();
        for trigger in triggers {
            let released = trigger.borrow_mut().deliver([IntersectionEntry {
                target: element.clone(),
                ratio,
                is_intersecting: ratio > 0.0,
            }]);
            self.unobserved.borrow_mut().extend(released);
        }
    }

    /// Whether any trigger still watches `element`.
    pub(crate) fn is_observed(&self, element: &FakeElement) -> bool {
        self.triggers
            .borrow()
            .iter()
            .any(|t| t.borrow().is_watched(element))
    }

    pub(crate) fn unobserved(&self) -> Vec<FakeElement> {
        self.unobserved.borrow().clone()
    }

    fn matching(
        listeners: &RefCell<Vec<(DomEvent, SharedListener)>>,
        kind: DomEvent,
    ) -> Vec<SharedListener> {
        listeners
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, l)| l.clone())
            .collect()
    }

    fn run(handlers: &[SharedListener], info: &EventInfo<FakeElement>) {
        for handler in handlers {
            (handler.borrow_mut())(info);
        }
    }
}

impl TimerHost for FakeHost {
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

impl FrameHost for FakeHost {
    fn request_frame(&self, callback: FrameCallback) {
        self.frames.borrow_mut().push(callback);
    }
}

impl ElementLocator for FakeHost {
    type Element = FakeElement;

    fn by_id(&self, id: &str) -> Option<FakeElement> {
        self.html
            .descendants()
            .into_iter()
            .find(|node| node.attribute("id").as_deref() == Some(id))
    }

    fn query_all(&self, selector: &str) -> Vec<FakeElement> {
        self.html.query_all(selector)
    }

    fn create_element(&self, tag: &str) -> Option<FakeElement> {
        Some(FakeElement::new(tag))
    }

    fn body(&self) -> Option<FakeElement> {
        Some(self.body.clone())
    }

    fn head(&self) -> Option<FakeElement> {
        Some(self.head.clone())
    }
}

impl EventSource for FakeHost {
    fn listen(
        &self,
        target: EventTarget<'_, FakeElement>,
        kind: DomEvent,
        handler: Listener<FakeElement>,
    ) {
        let handler = Rc::new(RefCell::new(handler));
        match target {
            EventTarget::Element(element) => {
                element.0.listeners.borrow_mut().push((kind, handler));
            }
            EventTarget::Document => self.document_listeners.borrow_mut().push((kind, handler)),
            EventTarget::Window => self.window_listeners.borrow_mut().push((kind, handler)),
        }
    }
}

impl Viewport for FakeHost {
    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn viewport_rect(&self) -> Rect {
        self.viewport.get()
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        self.scrolls.borrow_mut().push((top, behavior));
        self.scroll_y.set(top);
    }

    fn observe_visibility(&self, trigger: VisibilityTrigger<FakeElement>) {
        self.triggers.borrow_mut().push(Rc::new(RefCell::new(trigger)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_cover_controller_queries() {
        let host = FakeHost::new();
        let menu = host.add(
            FakeElement::new("div")
                .with_id("mobile-menu")
                .with_child(FakeElement::new("a").with_attr("href", "#inicio")),
        );
        host.add(FakeElement::new("a").with_attr("href", "#otro"));
        host.add(FakeElement::new("div").with_class("opacity-0 animate-fade-up"));
        host.add(FakeElement::new("img").with_attr("data-src", "a.png"));
        host.add(FakeElement::new("section").with_id("inicio"));
        host.add(FakeElement::new("section"));

        assert_eq!(host.query_all("#mobile-menu a").len(), 1);
        assert_eq!(host.query_all("a").len(), 2);
        assert_eq!(host.query_all("[class*=\"animate-\"]").len(), 1);
        assert_eq!(host.query_all("img[data-src]").len(), 1);
        assert_eq!(host.query_all("section[id]").len(), 1);
        assert_eq!(host.by_id("mobile-menu"), Some(menu));
    }

    #[test]
    fn events_bubble_to_ancestors_and_document() {
        let host = FakeHost::new();
        let child = FakeElement::new("span");
        let parent = host.add(FakeElement::new("div").with_child(child.clone()));
        let hits = Rc::new(RefCell::new(Vec::new()));
        for (name, target) in [("parent", EventTarget::Element(&parent)), ("doc", EventTarget::Document)] {
            let hits = hits.clone();
            host.listen(
                target,
                DomEvent::Click,
                Box::new(move |info: &EventInfo<FakeElement>| {
                    hits.borrow_mut().push((name, info.target.clone()));
                }),
            );
        }
        host.dispatch(&child, DomEvent::Click);
        assert_eq!(
            *hits.borrow(),
            [("parent", Some(child.clone())), ("doc", Some(child))]
        );
    }

    #[test]
    fn removal_detaches_from_parent() {
        let host = FakeHost::new();
        let node = host.add(FakeElement::new("div"));
        assert!(node.is_attached_to(host.body_element()), "node was appended");
        node.remove();
        node.remove();
        assert!(host.body_element().children().is_empty(), "node still attached");
    }
}
