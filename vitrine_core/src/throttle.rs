// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rate limiting with a guaranteed trailing execution.
//!
//! A [`Throttle`] wraps an action so it runs at most once per interval. A
//! call that arrives after more than `interval` has passed since the last
//! execution runs the action immediately. Any other call replaces the pending
//! deferred execution with one carrying its own arguments, timed to land
//! exactly `interval` after the last execution. Bursts therefore collapse to
//! one leading and one trailing execution, and the newest arguments always
//! win.
//!
//! The boundary comparison is strict: a call exactly `interval` after the
//! last execution is deferred (by zero) rather than run inline.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::time::{Duration, HostTime};
use crate::timer::{TimerHost, TimerId};
use crate::trace::{CancelEvent, Edge, FireEvent, ScheduleEvent, Source, Tracer};

/// Wraps an action so it executes at most once per interval, trailing edge
/// guaranteed.
///
/// Cloning yields another handle to the same limiter.
///
/// ```rust,ignore
/// let on_scroll = Throttle::new(timers, Duration::from_millis(16), move |()| {
///     navbar.refresh();
/// });
/// window.on_scroll(move || on_scroll.call(()));
/// ```
pub struct Throttle<A> {
    inner: Rc<ThrottleInner<A>>,
}

struct ThrottleInner<A> {
    timers: Rc<dyn TimerHost>,
    interval: Duration,
    last_fire: Cell<Option<HostTime>>,
    pending: Cell<Option<TimerId>>,
    action: RefCell<Box<dyn FnMut(A)>>,
    label: Cell<&'static str>,
    tracer: RefCell<Tracer>,
}

impl<A> Clone for Throttle<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Throttle<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("label", &self.inner.label.get())
            .field("interval", &self.inner.interval)
            .field("last_fire", &self.inner.last_fire.get())
            .field("pending", &self.inner.pending.get())
            .finish_non_exhaustive()
    }
}

impl<A: 'static> Throttle<A> {
    /// Wraps `action`, limiting it to one execution per `interval` (plus the
    /// trailing execution).
    pub fn new(
        timers: Rc<dyn TimerHost>,
        interval: Duration,
        action: impl FnMut(A) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(ThrottleInner {
                timers,
                interval,
                last_fire: Cell::new(None),
                pending: Cell::new(None),
                action: RefCell::new(Box::new(action)),
                label: Cell::new("throttle"),
                tracer: RefCell::new(Tracer::none()),
            }),
        }
    }

    /// Attaches a label and tracer used for diagnostics.
    #[must_use]
    pub fn traced(self, label: &'static str, tracer: Tracer) -> Self {
        self.inner.label.set(label);
        *self.inner.tracer.borrow_mut() = tracer;
        self
    }

    /// Invokes the throttled action with `args`.
    ///
    /// # Panics
    ///
    /// Panics if the wrapped action calls back into the same limiter while
    /// it is running.
    pub fn call(&self, args: A) {
        let inner = &self.inner;
        let now = inner.timers.now();
        let elapsed = inner
            .last_fire
            .get()
            .map(|last| now.saturating_duration_since(last));

        match elapsed {
            Some(elapsed) if elapsed <= inner.interval => {
                inner.cancel_pending(now);
                let delay = inner.interval - elapsed;
                let weak: Weak<ThrottleInner<A>> = Rc::downgrade(inner);
                let id = inner.timers.schedule(
                    delay,
                    Box::new(move || {
                        if let Some(inner) = weak.upgrade() {
                            inner.pending.set(None);
                            inner.fire(args, Edge::Trailing);
                        }
                    }),
                );
                inner.pending.set(Some(id));
                inner.tracer.borrow().schedule(&ScheduleEvent {
                    label: inner.label.get(),
                    source: Source::Throttle,
                    at: now,
                    delay,
                });
            }
            _ => {
                inner.cancel_pending(now);
                inner.fire(args, Edge::Leading);
            }
        }
    }

    /// Drops the pending trailing execution, if any.
    ///
    /// Calling this with nothing pending is a no-op.
    pub fn cancel(&self) {
        self.inner.cancel_pending(self.inner.timers.now());
    }

    /// Returns `true` while a trailing execution is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }

    /// Host time of the most recent execution.
    #[must_use]
    pub fn last_fire(&self) -> Option<HostTime> {
        self.inner.last_fire.get()
    }

    /// The configured interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }
}

impl<A> ThrottleInner<A> {
    fn cancel_pending(&self, now: HostTime) {
        if let Some(id) = self.pending.take() {
            self.timers.cancel(id);
            self.tracer.borrow().cancel(&CancelEvent {
                label: self.label.get(),
                source: Source::Throttle,
                at: now,
            });
        }
    }

    fn fire(&self, args: A, edge: Edge) {
        let now = self.timers.now();
        // Keep `last_fire` monotone even if the host clock stutters.
        let last = match self.last_fire.get() {
            Some(prev) if prev > now => prev,
            _ => now,
        };
        self.last_fire.set(Some(last));
        self.tracer.borrow().fire(&FireEvent {
            label: self.label.get(),
            source: Source::Throttle,
            edge,
            at: now,
        });
        (self.action.borrow_mut())(args);
    }
}
