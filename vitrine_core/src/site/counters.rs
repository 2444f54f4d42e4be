// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Count-up animation for `.counter` elements.
//!
//! Each counter starts once, the first time it is at least half visible, and
//! counts from zero to its `data-target` over the configured duration, one
//! text update per animation frame.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::ToString;

use crate::counter::{CounterAnimation, parse_counter_target};
use crate::host::{Element, ElementLocator, ElementOf, FrameHost, Host, Viewport};
use crate::time::{Duration, HostTime};
use crate::timer::TimerHost;
use crate::trace::{CounterFrameEvent, Tracer};
use crate::visibility::{ObserveOptions, VisibilityTrigger};

struct CounterRun<H: Host> {
    host: Rc<H>,
    element: ElementOf<H>,
    animation: CounterAnimation,
    tracer: Tracer,
}

impl<H: Host> CounterRun<H> {
    fn step(self: Rc<Self>, now: HostTime) {
        let frame = self.animation.frame(now);
        self.element.set_text(&frame.value.to_string());
        self.tracer.counter_frame(&CounterFrameEvent {
            value: frame.value,
            target: self.animation.target(),
            done: frame.done,
        });
        if !frame.done {
            let host = self.host.clone();
            host.request_frame(Box::new(move |now| self.step(now)));
        }
    }
}

/// Starts counting `element` up to its `data-target`.
///
/// The first value is drawn synchronously; later values follow on animation
/// frames until the exact target is shown.
pub fn animate<H: Host>(host: &Rc<H>, element: ElementOf<H>, duration: Duration, tracer: Tracer) {
    let target = element
        .attribute("data-target")
        .map_or(0, |raw| parse_counter_target(&raw));
    let run = Rc::new(CounterRun {
        host: host.clone(),
        element,
        animation: CounterAnimation::new(target, duration, host.now()),
        tracer,
    });
    run.step(host.now());
}

/// Watches every `.counter` and animates each one the first time it becomes
/// visible. Returns the number of counters watched.
pub fn install<H: Host>(
    host: &Rc<H>,
    options: ObserveOptions,
    duration: Duration,
    tracer: Tracer,
) -> usize {
    let counters = host.query_all(".counter");
    let count = counters.len();
    if count == 0 {
        tracing::debug!("no counters");
        return 0;
    }
    let animate_host = host.clone();
    let frame_tracer = tracer.clone();
    let trigger = VisibilityTrigger::observe(
        counters,
        move |element: &ElementOf<H>| {
            animate(&animate_host, element.clone(), duration, frame_tracer.clone());
        },
        options,
    )
    .traced("counters", tracer);
    host.observe_visibility(trigger);
    count
}
