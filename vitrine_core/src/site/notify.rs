// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transient toast notifications.
//!
//! A [`NotificationCenter`] owns a fixed container in the page corner.
//! [`show`](NotificationCenter::show) appends a notification, slides it in on
//! the next animation frame by adding `show`, and after the display duration
//! removes `show` and detaches the node once the exit transition is over.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use core::fmt;
use core::str::FromStr;

use crate::host::{
    DomEvent, Element, ElementLocator, ElementOf, EventSource, EventTarget, FrameHost, Host,
};
use crate::time::Duration;
use crate::timer::TimerHost;

const CONTAINER_CLASSES: &str = "notification-container fixed top-4 right-4 z-50 space-y-2";
const CARD_CLASSES: &str =
    "bg-white shadow-lg rounded-lg p-4 max-w-sm transform translate-x-full transition-transform duration-300";

/// Notification flavor; selects the icon and a modifier class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NotificationKind {
    /// Completed action.
    Success,
    /// Failed action.
    Error,
    /// Needs attention.
    Warning,
    /// Neutral.
    #[default]
    Info,
}

impl NotificationKind {
    /// Modifier class name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Font Awesome icon name.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error => "exclamation-circle",
            Self::Warning => "exclamation-triangle",
            Self::Info => "info-circle",
        }
    }

    /// Parses a kind name, falling back to [`Info`](Self::Info) for unknown
    /// names.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl FromStr for NotificationKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            _ => Err(()),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creates, shows and retires notifications.
pub struct NotificationCenter<H: Host> {
    host: Rc<H>,
    container: ElementOf<H>,
    default_duration: Duration,
    exit: Duration,
}

impl<H: Host> fmt::Debug for NotificationCenter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("container", &self.container)
            .field("default_duration", &self.default_duration)
            .field("exit", &self.exit)
            .finish_non_exhaustive()
    }
}

impl<H: Host> NotificationCenter<H> {
    /// Appends the notification container to `<body>`.
    pub fn new(host: &Rc<H>, default_duration: Duration, exit: Duration) -> Option<Rc<Self>> {
        let body = host.body()?;
        let container = host.create_element("div")?;
        container.set_class_name(CONTAINER_CLASSES);
        body.append_child(&container);
        Some(Rc::new(Self {
            host: host.clone(),
            container,
            default_duration,
            exit,
        }))
    }

    /// The container element.
    pub fn container(&self) -> &ElementOf<H> {
        &self.container
    }

    /// Shows `message` for `duration` (or the default). The message is
    /// inserted as text. Returns the notification element.
    pub fn show(
        self: &Rc<Self>,
        message: &str,
        kind: NotificationKind,
        duration: Option<Duration>,
    ) -> Option<ElementOf<H>> {
        let notification = self.build(message, kind)?;
        self.container.append_child(&notification);

        let entering = notification.clone();
        self.host
            .request_frame(Box::new(move |_| entering.add_class("show")));

        let this = self.clone();
        let leaving = notification.clone();
        self.host.schedule(
            duration.unwrap_or(self.default_duration),
            Box::new(move || this.remove(&leaving)),
        );
        Some(notification)
    }

    /// Slides `notification` out and detaches it after the exit transition.
    pub fn remove(&self, notification: &ElementOf<H>) {
        notification.remove_class("show");
        let node = notification.clone();
        self.host.schedule(self.exit, Box::new(move || node.remove()));
    }

    fn build(&self, message: &str, kind: NotificationKind) -> Option<ElementOf<H>> {
        let el = |tag: &str, class: &str| {
            let node = self.host.create_element(tag)?;
            node.set_class_name(class);
            Some(node)
        };

        let notification = el("div", &format!("notification {kind} {CARD_CLASSES}"))?;
        let row = el("div", "flex items-start")?;
        let icon = el("i", &format!("fas fa-{} mr-3 mt-0.5", kind.icon()))?;
        let body = el("div", "flex-1")?;
        let text = el("p", "text-sm font-medium text-gray-900")?;
        let close = el("button", "ml-4 text-gray-400 hover:text-gray-600")?;
        let close_icon = el("i", "fas fa-times")?;

        text.set_text(message);
        body.append_child(&text);
        close.append_child(&close_icon);
        row.append_child(&icon);
        row.append_child(&body);
        row.append_child(&close);
        notification.append_child(&row);

        let dismissed = notification.clone();
        self.host.listen(
            EventTarget::Element(&close),
            DomEvent::Click,
            Box::new(move |_| dismissed.remove()),
        );
        Some(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::testing::FakeHost;

    fn center(host: &Rc<FakeHost>) -> Rc<NotificationCenter<FakeHost>> {
        NotificationCenter::new(host, Duration::from_millis(5_000), Duration::from_millis(300)).unwrap()
    }

    #[test]
    fn kinds_map_to_icons_with_info_fallback() {
        assert_eq!(NotificationKind::from_name("success").icon(), "check-circle");
        assert_eq!(NotificationKind::from_name("error").icon(), "exclamation-circle");
        assert_eq!(NotificationKind::from_name("warning").icon(), "exclamation-triangle");
        assert_eq!(NotificationKind::from_name("info").icon(), "info-circle");
        assert_eq!(NotificationKind::from_name("party"), NotificationKind::Info);
    }

    #[test]
    fn container_is_appended_once() {
        let host = FakeHost::new();
        let center = center(&host);
        assert_eq!(host.body_element().children(), [center.container().clone()]);
        assert_eq!(center.container().class_name(), CONTAINER_CLASSES);
    }

    #[test]
    fn lifecycle_shows_on_next_frame_and_detaches_after_exit() {
        let host = FakeHost::new();
        let center = center(&host);
        let note = center
            .show("Guardado", NotificationKind::Success, None)
            .unwrap();

        assert!(note.class_name().starts_with("notification success "), "kind class");
        assert!(!note.has_class("show"), "show waits for the next frame");
        host.frame(Duration::ZERO);
        assert!(note.has_class("show"), "slid in on next frame");

        host.advance_to_ms(5_000);
        assert!(!note.has_class("show"), "slides out after the duration");
        assert!(note.is_attached_to(center.container()), "still attached during exit");

        host.advance_to_ms(5_300);
        assert!(center.container().children().is_empty(), "detached after exit");
    }

    #[test]
    fn custom_duration_overrides_default() {
        let host = FakeHost::new();
        let center = center(&host);
        let note = center
            .show("Hola", NotificationKind::Info, Some(Duration::from_millis(1_000)))
            .unwrap();
        host.frame(Duration::ZERO);
        host.advance_to_ms(1_000);
        assert!(!note.has_class("show"), "custom duration ignored");
    }

    #[test]
    fn close_button_removes_immediately() {
        let host = FakeHost::new();
        let center = center(&host);
        let note = center.show("Hola", NotificationKind::Warning, None).unwrap();
        let close = note.query("button").unwrap();
        host.dispatch(&close, DomEvent::Click);
        assert!(center.container().children().is_empty(), "close must detach");

        // The scheduled retirement finds nothing left to do.
        host.advance_to_ms(10_000);
        assert!(center.container().children().is_empty(), "nothing reattached");
    }

    #[test]
    fn message_is_text_not_markup() {
        let host = FakeHost::new();
        let center = center(&host);
        let note = center
            .show("<b>hola</b>", NotificationKind::Info, None)
            .unwrap();
        let text = note.query("p").unwrap();
        assert_eq!(text.text(), "<b>hola</b>");
        assert!(text.children().is_empty(), "markup must not be parsed");
    }
}
