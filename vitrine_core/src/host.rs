// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capability traits.
//!
//! The page controllers in [`site`](crate::site) never touch a browser API
//! directly. They are written against these traits, which a backend
//! implements for its document model:
//!
//! - [`Element`]: a handle to one node, with the class, style, content,
//!   geometry and tree operations the controllers use.
//! - [`ElementLocator`]: document-level lookup and element creation.
//! - [`EventSource`]: event subscription on elements, the document or the
//!   window.
//! - [`Viewport`]: scroll position, viewport geometry, scrolling, and the
//!   intersection primitive that drives a
//!   [`VisibilityTrigger`](crate::visibility::VisibilityTrigger).
//! - [`FrameHost`]: animation-frame callbacks.
//! - [`TimerHost`](crate::timer::TimerHost): deferred tasks.
//!
//! [`Host`] bundles all of them.
//!
//! All methods take `&self`; hosts use interior mutability and never call
//! back into a controller synchronously from a mutation.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

use crate::time::HostTime;
use crate::timer::TimerHost;
use crate::visibility::VisibilityTrigger;

/// A handle to a document element.
///
/// Handles are cheap to clone and compare by node identity.
pub trait Element: Clone + PartialEq + fmt::Debug + 'static {
    /// Adds `class` to the class list.
    fn add_class(&self, class: &str);

    /// Removes `class` from the class list.
    fn remove_class(&self, class: &str);

    /// Returns `true` if the class list contains `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Adds or removes `class`.
    fn set_class(&self, class: &str, present: bool) {
        if present {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// The full `className` string.
    fn class_name(&self) -> String;

    /// Replaces the whole class list.
    fn set_class_name(&self, value: &str);

    /// Reads an inline style property; empty when unset.
    fn style(&self, property: &str) -> String;

    /// Sets an inline style property. An empty value removes it.
    fn set_style(&self, property: &str, value: &str);

    /// Replaces the children with a text node.
    fn set_text(&self, text: &str);

    /// The element's markup content.
    fn inner_html(&self) -> String;

    /// Replaces the element's markup content.
    fn set_inner_html(&self, html: &str);

    /// Reads an attribute.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Sets an attribute.
    fn set_attribute(&self, name: &str, value: &str);

    /// Current value of a form control; empty for other elements.
    fn value(&self) -> String;

    /// Enables or disables a form control.
    fn set_disabled(&self, disabled: bool);

    /// Resets a form's controls to their defaults. No-op for other elements.
    fn reset_form(&self);

    /// Distance from the top of the offset parent, in CSS pixels.
    fn offset_top(&self) -> f64;

    /// The nearest positioned ancestor.
    fn offset_parent(&self) -> Option<Self>;

    /// Inner height, in CSS pixels.
    fn client_height(&self) -> f64;

    /// Border box relative to the viewport.
    fn bounding_rect(&self) -> Rect;

    /// Parent element.
    fn parent(&self) -> Option<Self>;

    /// First descendant matching `selector`.
    fn query(&self, selector: &str) -> Option<Self>;

    /// Descendants matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self>;

    /// Appends `child` as the last child.
    fn append_child(&self, child: &Self);

    /// Detaches the element from its parent. No-op when detached.
    fn remove(&self);
}

/// Document-level element lookup.
pub trait ElementLocator {
    /// Element handle type.
    type Element: Element;

    /// Element with the given `id`.
    fn by_id(&self, id: &str) -> Option<Self::Element>;

    /// Elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Creates a detached element.
    fn create_element(&self, tag: &str) -> Option<Self::Element>;

    /// The `<body>` element.
    fn body(&self) -> Option<Self::Element>;

    /// The `<head>` element.
    fn head(&self) -> Option<Self::Element>;
}

/// Events the controllers subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DomEvent {
    /// `click`
    Click,
    /// `submit`; hosts prevent the default navigation.
    Submit,
    /// `keydown`
    KeyDown,
    /// `scroll`
    Scroll,
    /// `load`
    Load,
    /// `focus`
    Focus,
    /// `blur`
    Blur,
    /// `input`
    Input,
    /// `change`
    Change,
    /// `DOMContentLoaded`
    Ready,
}

impl DomEvent {
    /// DOM event type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::KeyDown => "keydown",
            Self::Scroll => "scroll",
            Self::Load => "load",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::Input => "input",
            Self::Change => "change",
            Self::Ready => "DOMContentLoaded",
        }
    }

    /// Whether the host should call `preventDefault` before dispatching.
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::Submit)
    }
}

/// Where a listener is attached.
#[derive(Clone, Copy, Debug)]
pub enum EventTarget<'a, E> {
    /// A specific element.
    Element(&'a E),
    /// The document.
    Document,
    /// The window.
    Window,
}

/// What a listener receives.
#[derive(Clone, Debug, PartialEq)]
pub struct EventInfo<E> {
    /// Event kind.
    pub kind: DomEvent,
    /// The element the event was dispatched to, if it was an element.
    pub target: Option<E>,
    /// `KeyboardEvent.key` for key events.
    pub key: Option<String>,
}

/// An event handler.
pub type Listener<E> = Box<dyn FnMut(&EventInfo<E>)>;

/// Event subscription.
pub trait EventSource: ElementLocator {
    /// Calls `handler` for every `kind` event on `target` for the rest of the
    /// page lifetime.
    fn listen(
        &self,
        target: EventTarget<'_, Self::Element>,
        kind: DomEvent,
        handler: Listener<Self::Element>,
    );
}

/// Scrolling animation style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Jump.
    #[default]
    Instant,
    /// Animate.
    Smooth,
}

/// Viewport geometry and the intersection primitive.
pub trait Viewport: ElementLocator {
    /// Vertical scroll position, in CSS pixels.
    fn scroll_y(&self) -> f64;

    /// The viewport box, with its origin at the top-left corner.
    fn viewport_rect(&self) -> Rect;

    /// Scrolls the window so `top` is at the top of the viewport.
    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);

    /// Hands `trigger` to the host's intersection primitive, which feeds it
    /// entries for its watched elements and stops observing the elements it
    /// releases.
    fn observe_visibility(&self, trigger: VisibilityTrigger<Self::Element>);
}

/// A frame callback receiving the frame timestamp.
pub type FrameCallback = Box<dyn FnOnce(HostTime)>;

/// Animation-frame scheduling.
pub trait FrameHost {
    /// Runs `callback` before the next repaint.
    fn request_frame(&self, callback: FrameCallback);
}

/// Everything the page controllers need from their environment.
pub trait Host: TimerHost + FrameHost + EventSource + Viewport + 'static {}

impl<T> Host for T where T: TimerHost + FrameHost + EventSource + Viewport + 'static {}

/// The element type of host `H`.
pub type ElementOf<H> = <H as ElementLocator>::Element;
