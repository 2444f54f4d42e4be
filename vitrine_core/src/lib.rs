// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timing utilities and page controllers for interactive static sites.
//!
//! `vitrine_core` holds everything about a landing page's client-side
//! behavior that does not depend on a browser. It is `no_std` compatible
//! (with `alloc`). The browser is reached only through the capability traits
//! in [`host`], so every controller runs unchanged against the in-memory host
//! used by the tests.
//!
//! # Architecture
//!
//! ```text
//!   Host (timers, frames, events, viewport, DOM)
//!       │
//!       ▼
//!   DOM event ──► Throttle / Debounce ──► controller action
//!   intersection batch ──► VisibilityTrigger::deliver ──► callback
//!   animation frame ──► CounterAnimation::frame ──► text update
//!       │
//!       ▼
//!   TimerHost::schedule ──► deferred task (cancellable by TimerId)
//! ```
//!
//! **[`time`]**: Host timestamps and durations in microseconds.
//!
//! **[`timer`]**: The [`TimerHost`](timer::TimerHost) task queue with
//! cancellation tokens, and [`ManualTimers`](timer::ManualTimers), a virtual
//! clock.
//!
//! **[`throttle`]** and **[`debounce`]**: Rate limiting that never loses the
//! trailing call, and quiet-period collapsing with an optional leading edge.
//!
//! **[`visibility`]**: Threshold crossing over intersection batches, with
//! `rootMargin` parsing and fire-once release.
//!
//! **[`counter`]**: Integer count-up interpolation.
//!
//! **[`host`]**: The capability traits a platform implements.
//!
//! **[`site`]**: The page controllers and [`Site`](site::Site), which
//! installs them all.
//!
//! **[`config`]**: [`SiteConfig`](config::SiteConfig) tunables and
//! validation.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! timer and trigger instrumentation, with the zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `serde` (disabled by default): Deserializes [`SiteConfig`](config::SiteConfig).
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod counter;
pub mod debounce;
pub mod host;
pub mod site;
pub mod throttle;
pub mod time;
pub mod timer;
pub mod trace;
pub mod visibility;
