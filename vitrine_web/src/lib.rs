// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for vitrine.
//!
//! This crate implements the [`vitrine_core::host`] traits on top of browser
//! APIs:
//!
//! - [`WebHost`]: document lookup, event listeners, scrolling,
//!   `IntersectionObserver`, `requestAnimationFrame` and timers
//! - [`DomElement`]: [`Element`](vitrine_core::host::Element) over a live DOM
//!   node
//! - [`WebTimers`]: `setTimeout` / `clearTimeout` task queue
//!
//! plus the ambient pieces a page entry point needs: [`init_logging`] routes
//! `tracing` output to the browser console, [`tracer`] bridges core trace
//! events into `tracing`, and [`page_config`] reads JSON overrides of the
//! [`SiteConfig`](vitrine_core::config::SiteConfig) from the page.
//!
//! Everything here calls into the browser; on a native target the crate
//! still builds, and only its pure helpers are exercised by tests.

mod config;
mod dom;
mod error;
mod host;
mod logging;
mod observer;
mod raf;
mod sink;
mod timers;

pub use config::{CONFIG_ELEMENT_ID, config_from_json, page_config};
pub use dom::DomElement;
pub use error::WebError;
pub use host::WebHost;
pub use logging::{ConsoleMakeWriter, ConsoleWriter, init_logging, parse_filter};
pub use raf::now;
pub use sink::{TracingSink, tracer};
pub use timers::WebTimers;
