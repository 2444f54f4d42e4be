// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quiet-period execution.
//!
//! A [`Debounce`] runs its action once after calls stop arriving for `wait`.
//! Every call cancels the pending execution and starts the wait over, so a
//! burst of calls collapses into a single execution with the last call's
//! arguments. In `immediate` mode the first call of an idle period runs the
//! action synchronously instead, and the quiet-period timer only re-arms the
//! leading edge.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::time::{Duration, HostTime};
use crate::timer::{Task, TimerHost, TimerId};
use crate::trace::{CancelEvent, Edge, FireEvent, ScheduleEvent, Source, Tracer};

/// Wraps an action so bursts of calls run it exactly once.
///
/// Cloning yields another handle to the same debouncer.
pub struct Debounce<A> {
    inner: Rc<DebounceInner<A>>,
}

struct DebounceInner<A> {
    timers: Rc<dyn TimerHost>,
    wait: Duration,
    immediate: bool,
    pending: Cell<Option<TimerId>>,
    action: RefCell<Box<dyn FnMut(A)>>,
    label: Cell<&'static str>,
    tracer: RefCell<Tracer>,
}

impl<A> Clone for Debounce<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Debounce<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounce")
            .field("label", &self.inner.label.get())
            .field("wait", &self.inner.wait)
            .field("immediate", &self.inner.immediate)
            .field("pending", &self.inner.pending.get())
            .finish_non_exhaustive()
    }
}

impl<A: 'static> Debounce<A> {
    /// Wraps `action` so it runs after `wait` of inactivity, or at the start
    /// of each burst when `immediate` is set.
    pub fn new(
        timers: Rc<dyn TimerHost>,
        wait: Duration,
        immediate: bool,
        action: impl FnMut(A) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(DebounceInner {
                timers,
                wait,
                immediate,
                pending: Cell::new(None),
                action: RefCell::new(Box::new(action)),
                label: Cell::new("debounce"),
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

    /// Invokes the debounced action with `args`.
    ///
    /// # Panics
    ///
    /// Panics if the wrapped action calls back into the same debouncer while
    /// it is running.
    pub fn call(&self, args: A) {
        let inner = &self.inner;
        let now = inner.timers.now();
        let call_now = inner.immediate && inner.pending.get().is_none();
        inner.cancel_pending(now);

        let weak: Weak<DebounceInner<A>> = Rc::downgrade(inner);
        if inner.immediate {
            inner.arm(
                now,
                Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.pending.set(None);
                    }
                }),
            );
            if call_now {
                inner.fire(args, Edge::Leading);
            }
        } else {
            inner.arm(
                now,
                Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.pending.set(None);
                        inner.fire(args, Edge::Trailing);
                    }
                }),
            );
        }
    }

    /// Drops the pending execution (or, in immediate mode, ends the quiet
    /// period early). Calling this with nothing pending is a no-op.
    pub fn cancel(&self) {
        self.inner.cancel_pending(self.inner.timers.now());
    }

    /// Returns `true` while the quiet-period timer is armed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }

    /// The configured quiet period.
    #[must_use]
    pub fn wait(&self) -> Duration {
        self.inner.wait
    }
}

impl<A> DebounceInner<A> {
    fn arm(&self, now: HostTime, task: Task) {
        let id = self.timers.schedule(self.wait, task);
        self.pending.set(Some(id));
        self.tracer.borrow().schedule(&ScheduleEvent {
            label: self.label.get(),
            source: Source::Debounce,
            at: now,
            delay: self.wait,
        });
    }

    fn cancel_pending(&self, now: HostTime) {
        if let Some(id) = self.pending.take() {
            self.timers.cancel(id);
            self.tracer.borrow().cancel(&CancelEvent {
                label: self.label.get(),
                source: Source::Debounce,
                at: now,
            });
        }
    }

    fn fire(&self, args: A, edge: Edge) {
        self.tracer.borrow().fire(&FireEvent {
            label: self.label.get(),
            source: Source::Debounce,
            edge,
            at: self.timers.now(),
        });
        (self.action.borrow_mut())(args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualTimers;
    use alloc::vec;
    use alloc::vec::Vec;

    type Log = Rc<RefCell<Vec<(u64, &'static str)>>>;

    fn setup(wait_ms: u64, immediate: bool) -> (Rc<ManualTimers>, Debounce<&'static str>, Log) {
        let timers = Rc::new(ManualTimers::new());
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let (clock, out) = (timers.clone(), log.clone());
        let debounce = Debounce::new(
            timers.clone(),
            Duration::from_millis(wait_ms),
            immediate,
            move |arg| out.borrow_mut().push((clock.now().as_millis(), arg)),
        );
        (timers, debounce, log)
    }

    fn call_at(timers: &ManualTimers, debounce: &Debounce<&'static str>, ms: u64, arg: &'static str) {
        timers.advance_to(HostTime::from_millis(ms));
        debounce.call(arg);
    }

    #[test]
    fn burst_collapses_to_one_trailing_run_with_last_args() {
        let (timers, debounce, log) = setup(150, false);
        call_at(&timers, &debounce, 0, "a");
        call_at(&timers, &debounce, 50, "b");
        call_at(&timers, &debounce, 100, "c");

        timers.advance_to(HostTime::from_millis(249));
        assert!(log.borrow().is_empty(), "ran before the quiet period ended");

        timers.advance_to(HostTime::from_millis(1_000));
        assert_eq!(*log.borrow(), vec![(250, "c")]);
    }

    #[test]
    fn separate_bursts_each_run_once() {
        let (timers, debounce, log) = setup(100, false);
        call_at(&timers, &debounce, 0, "a");
        call_at(&timers, &debounce, 300, "b");
        call_at(&timers, &debounce, 350, "c");
        timers.advance_to(HostTime::from_millis(1_000));
        assert_eq!(*log.borrow(), vec![(100, "a"), (450, "c")]);
    }

    #[test]
    fn immediate_runs_synchronously_once_per_idle_period() {
        let (timers, debounce, log) = setup(150, true);
        call_at(&timers, &debounce, 0, "a");
        assert_eq!(*log.borrow(), vec![(0, "a")], "leading call must run inline");

        call_at(&timers, &debounce, 50, "b");
        call_at(&timers, &debounce, 100, "c");
        timers.advance_to(HostTime::from_millis(1_000));
        assert_eq!(*log.borrow(), vec![(0, "a")], "quiet timer must not re-run");
    }

    #[test]
    fn immediate_rearms_after_quiet_period() {
        let (timers, debounce, log) = setup(150, true);
        call_at(&timers, &debounce, 0, "a");
        call_at(&timers, &debounce, 100, "b");
        // The second call restarted the wait, so 200 is still inside it.
        call_at(&timers, &debounce, 200, "c");
        call_at(&timers, &debounce, 400, "d");
        assert_eq!(*log.borrow(), vec![(0, "a"), (400, "d")]);
    }

    #[test]
    fn only_one_timer_is_ever_pending() {
        let (timers, debounce, _log) = setup(150, false);
        for ms in 0..20 {
            call_at(&timers, &debounce, ms * 10, "x");
            assert_eq!(timers.pending(), 1);
        }
    }

    #[test]
    fn cancel_drops_pending_run_and_is_idempotent() {
        let (timers, debounce, log) = setup(100, false);
        debounce.cancel();
        call_at(&timers, &debounce, 0, "a");
        assert!(debounce.is_pending());
        debounce.cancel();
        debounce.cancel();
        assert!(!debounce.is_pending());
        timers.advance_to(HostTime::from_millis(500));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn zero_wait_runs_on_next_turn() {
        let (timers, debounce, log) = setup(0, false);
        debounce.call("a");
        debounce.call("b");
        assert!(log.borrow().is_empty());
        timers.advance(Duration::ZERO);
        assert_eq!(*log.borrow(), vec![(0, "b")]);
    }
}
