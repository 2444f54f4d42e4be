// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for timers, triggers and counters.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! timing utilities call as they schedule, cancel and fire work. All method
//! bodies default to no-ops, so implementing only the events you care about
//! is fine.
//!
//! [`Tracer`] is a cloneable handle around an optional shared sink. Each
//! [`Throttle`](crate::throttle::Throttle), [`Debounce`](crate::debounce::Debounce)
//! and [`VisibilityTrigger`](crate::visibility::VisibilityTrigger) keeps its
//! own copy. When the `trace` feature is **off**, every `Tracer` method
//! compiles to nothing and the handle is zero-sized. When **on**, each method
//! performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies.

#[cfg(feature = "trace")]
use alloc::rc::Rc;
#[cfg(feature = "trace")]
use core::cell::RefCell;

use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which rate-limiting utility produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// A [`Throttle`](crate::throttle::Throttle).
    Throttle,
    /// A [`Debounce`](crate::debounce::Debounce).
    Debounce,
}

/// Whether an action ran at call time or from a deferred timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Ran synchronously inside the call.
    Leading,
    /// Ran from a timer after the call returned.
    Trailing,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a deferred execution is scheduled.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleEvent {
    /// Label of the wrapper that scheduled it.
    pub label: &'static str,
    /// Which utility scheduled it.
    pub source: Source,
    /// Host time of the call.
    pub at: HostTime,
    /// Delay until the deferred execution.
    pub delay: Duration,
}

/// Emitted when a pending deferred execution is cancelled.
#[derive(Clone, Copy, Debug)]
pub struct CancelEvent {
    /// Label of the wrapper whose timer was cancelled.
    pub label: &'static str,
    /// Which utility cancelled it.
    pub source: Source,
    /// Host time of the cancellation.
    pub at: HostTime,
}

/// Emitted right before a wrapped action runs.
#[derive(Clone, Copy, Debug)]
pub struct FireEvent {
    /// Label of the wrapper.
    pub label: &'static str,
    /// Which utility fired.
    pub source: Source,
    /// Leading (synchronous) or trailing (deferred) execution.
    pub edge: Edge,
    /// Host time of the execution.
    pub at: HostTime,
}

/// Emitted when a watched element crosses its visibility threshold.
#[derive(Clone, Copy, Debug)]
pub struct VisibilityEvent {
    /// Label of the trigger.
    pub label: &'static str,
    /// Intersection ratio reported for the crossing.
    pub ratio: f64,
    /// Whether the element was unregistered after firing.
    pub released: bool,
}

/// Emitted for each animation frame of a counter.
#[derive(Clone, Copy, Debug)]
pub struct CounterFrameEvent {
    /// Value displayed on this frame.
    pub value: i64,
    /// Final value of the animation.
    pub target: i64,
    /// Whether this was the last frame.
    pub done: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the timing utilities.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a deferred execution is scheduled.
    fn on_schedule(&mut self, e: &ScheduleEvent) {
        _ = e;
    }

    /// Called when a pending deferred execution is cancelled.
    fn on_cancel(&mut self, e: &CancelEvent) {
        _ = e;
    }

    /// Called right before a wrapped action runs.
    fn on_fire(&mut self, e: &FireEvent) {
        _ = e;
    }

    /// Called when a watched element crosses its threshold.
    fn on_visibility(&mut self, e: &VisibilityEvent) {
        _ = e;
    }

    /// Called for each counter animation frame.
    fn on_counter_frame(&mut self, e: &CounterFrameEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer handle
// ---------------------------------------------------------------------------

/// Cloneable handle around an optional shared [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink. Sinks must not call back into the utility that
/// is emitting the event.
#[derive(Clone, Default)]
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Rc<RefCell<dyn TraceSink>>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[cfg(feature = "trace")]
    #[inline]
    #[must_use]
    pub fn new(sink: Rc<RefCell<dyn TraceSink>>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Emits a [`ScheduleEvent`].
    #[inline]
    pub fn schedule(&self, e: &ScheduleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &self.sink {
            s.borrow_mut().on_schedule(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CancelEvent`].
    #[inline]
    pub fn cancel(&self, e: &CancelEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &self.sink {
            s.borrow_mut().on_cancel(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FireEvent`].
    #[inline]
    pub fn fire(&self, e: &FireEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &self.sink {
            s.borrow_mut().on_fire(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`VisibilityEvent`].
    #[inline]
    pub fn visibility(&self, e: &VisibilityEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &self.sink {
            s.borrow_mut().on_visibility(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CounterFrameEvent`].
    #[inline]
    pub fn counter_frame(&self, e: &CounterFrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &self.sink {
            s.borrow_mut().on_counter_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
