// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page loader fade-out.

use alloc::boxed::Box;
use alloc::rc::Rc;

use crate::host::{DomEvent, Element, ElementLocator, EventSource, EventTarget, Host};
use crate::time::Duration;
use crate::timer::TimerHost;

/// Loader timings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoaderTimings {
    /// Delay after install before the fade starts.
    pub delay: Duration,
    /// Fade length before the loader is removed from layout.
    pub fade: Duration,
    /// Delay after window `load` before a still-visible loader is hidden.
    pub fallback: Duration,
}

/// Schedules the `#loader` fade-out, plus a fallback on window `load` in
/// case the timed fade never ran.
pub fn install<H: Host>(host: &Rc<H>, timings: LoaderTimings) {
    let fading = host.clone();
    host.schedule(
        timings.delay,
        Box::new(move || {
            let Some(loader) = fading.by_id("loader") else {
                tracing::debug!("no #loader");
                return;
            };
            loader.set_style("opacity", "0");
            fading.schedule(
                timings.fade,
                Box::new(move || loader.set_style("display", "none")),
            );
        }),
    );

    let fallback = host.clone();
    host.listen(
        EventTarget::Window,
        DomEvent::Load,
        Box::new(move |_| {
            let host = fallback.clone();
            fallback.schedule(
                timings.fallback,
                Box::new(move || {
                    if let Some(loader) = host.by_id("loader") {
                        if loader.style("display") != "none" {
                            loader.set_style("display", "none");
                        }
                    }
                }),
            );
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::testing::{FakeElement, FakeHost};

    const TIMINGS: LoaderTimings = LoaderTimings {
        delay: Duration::from_millis(500),
        fade: Duration::from_millis(300),
        fallback: Duration::from_millis(800),
    };

    #[test]
    fn loader_fades_then_leaves_layout() {
        let host = FakeHost::new();
        let loader = host.add(FakeElement::new("div").with_id("loader"));
        install(&host, TIMINGS);

        host.advance_to_ms(499);
        assert_eq!(loader.style("opacity"), "", "fade started early");
        host.advance_to_ms(500);
        assert_eq!(loader.style("opacity"), "0");
        assert_eq!(loader.style("display"), "", "hidden before the fade ended");
        host.advance_to_ms(800);
        assert_eq!(loader.style("display"), "none");
    }

    #[test]
    fn load_event_hides_loader_as_fallback() {
        let host = FakeHost::new();
        let loader = host.add(FakeElement::new("div").with_id("loader"));
        let timings = LoaderTimings {
            delay: Duration::from_millis(60_000),
            ..TIMINGS
        };
        install(&host, timings);

        host.dispatch_window(DomEvent::Load);
        host.advance_to_ms(799);
        assert_eq!(loader.style("display"), "");
        host.advance_to_ms(800);
        assert_eq!(loader.style("display"), "none");
    }

    #[test]
    fn missing_loader_is_harmless() {
        let host = FakeHost::new();
        install(&host, TIMINGS);
        host.dispatch_window(DomEvent::Load);
        host.advance_to_ms(2_000);
        assert_eq!(host.timers.pending(), 0);
    }
}
