// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred-callback scheduling.
//!
//! [`TimerHost`] is the only capability the rate-limiting utilities need
//! from their environment: read the clock, schedule a one-shot task after a
//! delay, and cancel it by [`TimerId`]. On the web it is backed by
//! `setTimeout`/`clearTimeout`; [`ManualTimers`] is a virtual single-threaded
//! task queue that runs tasks only when the caller advances its clock, which
//! makes timing behavior reproducible in tests.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::time::{Duration, HostTime};

/// A one-shot deferred task.
pub type Task = Box<dyn FnOnce()>;

/// Cancellation token for a scheduled [`Task`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

impl fmt::Debug for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerId({})", self.0)
    }
}

/// A single-threaded deferred-callback scheduler.
///
/// Implementations take `&self` and use interior mutability: tasks are
/// allowed to schedule and cancel other tasks while they run.
pub trait TimerHost {
    /// Returns the current host time.
    fn now(&self) -> HostTime;

    /// Runs `task` once after `delay`, returning its cancellation token.
    fn schedule(&self, delay: Duration, task: Task) -> TimerId;

    /// Cancels a scheduled task.
    ///
    /// Cancelling a task that already ran or was already cancelled is a
    /// no-op.
    fn cancel(&self, id: TimerId);
}

impl<T: TimerHost + ?Sized> TimerHost for Rc<T> {
    fn now(&self) -> HostTime {
        (**self).now()
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        (**self).schedule(delay, task)
    }

    fn cancel(&self, id: TimerId) {
        (**self).cancel(id);
    }
}

struct Entry {
    id: TimerId,
    due: HostTime,
    task: Task,
}

#[derive(Default)]
struct QueueState {
    now: HostTime,
    next_id: u64,
    entries: Vec<Entry>,
}

impl QueueState {
    /// Removes and returns the earliest entry due at or before `limit`.
    ///
    /// Ties are broken by scheduling order.
    fn pop_due(&mut self, limit: HostTime) -> Option<Entry> {
        let (idx, _) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= limit)
            .min_by_key(|(_, e)| (e.due, e.id))?;
        Some(self.entries.remove(idx))
    }
}

/// A virtual clock with a task queue that only advances on request.
///
/// Nothing runs until [`advance`](Self::advance),
/// [`advance_to`](Self::advance_to) or [`run_until_idle`](Self::run_until_idle)
/// is called. Tasks run in due-time order; the clock reads each task's due
/// time while it runs.
#[derive(Default)]
pub struct ManualTimers {
    state: RefCell<QueueState>,
}

impl fmt::Debug for ManualTimers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualTimers")
            .field("now", &state.now)
            .field("pending", &state.entries.len())
            .finish()
    }
}

impl ManualTimers {
    /// Creates a queue whose clock starts at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue whose clock starts at `now`.
    #[must_use]
    pub fn starting_at(now: HostTime) -> Self {
        Self {
            state: RefCell::new(QueueState {
                now,
                ..QueueState::default()
            }),
        }
    }

    /// Number of scheduled tasks that have neither run nor been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.borrow().entries.len()
    }

    /// Due time of the next task, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<HostTime> {
        self.state.borrow().entries.iter().map(|e| e.due).min()
    }

    /// Advances the clock by `by`, running every task that falls due.
    pub fn advance(&self, by: Duration) {
        let target = self.now().saturating_add(by);
        self.advance_to(target);
    }

    /// Advances the clock to `target`, running every task due at or before
    /// it. Moving backwards is ignored.
    pub fn advance_to(&self, target: HostTime) {
        while self.run_next(target) {}
        let mut state = self.state.borrow_mut();
        if target > state.now {
            state.now = target;
        }
    }

    /// Runs tasks until the queue is empty, moving the clock to each due
    /// time in turn. Returns the number of tasks run.
    ///
    /// A task that always reschedules itself keeps this from returning, so
    /// frame-style loops should be driven with [`advance`](Self::advance).
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while let Some(due) = self.next_due() {
            if self.run_next(due) {
                ran += 1;
            }
        }
        ran
    }

    /// Pops and runs the earliest task due at or before `limit`.
    ///
    /// The queue borrow is released before the task runs.
    fn run_next(&self, limit: HostTime) -> bool {
        let entry = {
            let mut state = self.state.borrow_mut();
            let Some(entry) = state.pop_due(limit) else {
                return false;
            };
            if entry.due > state.now {
                state.now = entry.due;
            }
            entry
        };
        (entry.task)();
        true
    }
}

impl TimerHost for ManualTimers {
    fn now(&self) -> HostTime {
        self.state.borrow().now
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let due = state.now.saturating_add(delay);
        state.entries.push(Entry { id, due, task });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.state.borrow_mut().entries.retain(|e| e.id != id);
    }
}
