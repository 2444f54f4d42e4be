// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forwarding core trace events to `tracing`.

use vitrine_core::trace::{
    CancelEvent, CounterFrameEvent, FireEvent, ScheduleEvent, TraceSink, Tracer, VisibilityEvent,
};

/// A [`TraceSink`] that re-emits every event at `trace` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn on_schedule(&mut self, e: &ScheduleEvent) {
        tracing::trace!(
            label = e.label,
            source = ?e.source,
            at_ms = e.at.as_millis(),
            delay_ms = e.delay.as_millis_ceil(),
            "scheduled"
        );
    }

    fn on_cancel(&mut self, e: &CancelEvent) {
        tracing::trace!(label = e.label, source = ?e.source, at_ms = e.at.as_millis(), "cancelled");
    }

    fn on_fire(&mut self, e: &FireEvent) {
        tracing::trace!(
            label = e.label,
            source = ?e.source,
            edge = ?e.edge,
            at_ms = e.at.as_millis(),
            "fired"
        );
    }

    fn on_visibility(&mut self, e: &VisibilityEvent) {
        tracing::trace!(label = e.label, ratio = e.ratio, released = e.released, "visible");
    }

    fn on_counter_frame(&mut self, e: &CounterFrameEvent) {
        tracing::trace!(value = e.value, target = e.target, done = e.done, "counter frame");
    }
}

/// A [`Tracer`] feeding [`TracingSink`] when the `trace` feature is on, and
/// a silent one otherwise.
#[must_use]
pub fn tracer() -> Tracer {
    #[cfg(feature = "trace")]
    {
        use std::cell::RefCell;
        use std::rc::Rc;
        Tracer::new(Rc::new(RefCell::new(TracingSink)))
    }
    #[cfg(not(feature = "trace"))]
    {
        Tracer::none()
    }
}
