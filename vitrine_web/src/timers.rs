// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout`-backed [`TimerHost`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use vitrine_core::time::{Duration, HostTime};
use vitrine_core::timer::{Task, TimerHost, TimerId};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use crate::raf;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, delay_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(handle: i32);
}

/// Converts a delay to the whole milliseconds `setTimeout` takes.
///
/// Rounds up and saturates at `i32::MAX`.
pub(crate) fn delay_millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis_ceil()).unwrap_or(i32::MAX)
}

/// Scheduled tasks and the host resources backing them.
///
/// A cancelled timer's resource is handed back to the caller to release. A
/// fired timer's resource is retired instead, because its callback is still
/// on the stack; it is dropped when the next timer fires.
pub(crate) struct Slots<R> {
    pending: HashMap<u64, (R, Task)>,
    retired: Option<R>,
}

impl<R> Default for Slots<R> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
            retired: None,
        }
    }
}

impl<R> Slots<R> {
    pub(crate) fn insert(&mut self, id: u64, resource: R, task: Task) {
        self.pending.insert(id, (resource, task));
    }

    pub(crate) fn cancel(&mut self, id: u64) -> Option<R> {
        self.pending.remove(&id).map(|(resource, _)| resource)
    }

    /// Takes the task for `id`, retiring its resource and releasing the one
    /// retired before it.
    pub(crate) fn fire(&mut self, id: u64) -> Option<Task> {
        let (resource, task) = self.pending.remove(&id)?;
        self.retired = Some(resource);
        Some(task)
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}

struct Scheduled {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

#[derive(Default)]
struct TimerState {
    next_id: Cell<u64>,
    slots: RefCell<Slots<Scheduled>>,
}

/// Browser timers.
///
/// Tasks and their JS callbacks are owned on the Rust side keyed by
/// [`TimerId`]; cancelling clears the timeout and frees both.
#[derive(Default)]
pub struct WebTimers {
    state: Rc<TimerState>,
}

impl fmt::Debug for WebTimers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebTimers")
            .field("pending", &self.pending())
            .finish()
    }
}

impl WebTimers {
    /// Creates an empty timer set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scheduled tasks that have not run or been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.slots.borrow().len()
    }
}

impl TimerHost for WebTimers {
    fn now(&self) -> HostTime {
        raf::now()
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);

        let state: Weak<TimerState> = Rc::downgrade(&self.state);
        let callback = Closure::wrap(Box::new(move || {
            let Some(state) = state.upgrade() else {
                return;
            };
            let task = state.slots.borrow_mut().fire(id);
            if let Some(task) = task {
                task();
            }
        }) as Box<dyn FnMut()>);
        let handle = set_timeout(callback.as_ref(), delay_millis(delay));
        self.state.slots.borrow_mut().insert(
            id,
            Scheduled {
                handle,
                _callback: callback,
            },
            task,
        );
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) {
        let cancelled = self.state.slots.borrow_mut().cancel(id.0);
        if let Some(scheduled) = cancelled {
            clear_timeout(scheduled.handle);
        }
    }
}
