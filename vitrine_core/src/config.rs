// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Site configuration.
//!
//! [`SiteConfig`] carries every tunable the page controllers use. The
//! defaults ([`SiteConfig::landing`]) reproduce the landing page's stock
//! timings, thresholds and offsets. With the `serde` feature the
//! config deserializes from a partial object: missing fields keep their
//! defaults and negative millisecond values clamp to zero.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::time::Duration;
use crate::visibility::{ObserveOptions, RootMargin, RootMarginError};

/// Errors reported by [`SiteConfig::validate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A visibility threshold fell outside `[0, 1]`.
    #[error("{name} must be within [0, 1], got {value}")]
    ThresholdOutOfRange {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A root margin string did not parse.
    #[error("{name} is not a valid root margin")]
    RootMargin {
        /// Field name.
        name: &'static str,
        /// Parse failure.
        #[source]
        source: RootMarginError,
    },
}

/// Tunables for the page controllers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SiteConfig {
    /// Scroll handler throttle interval, in ms.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "millis"))]
    pub scroll_throttle_ms: u64,
    /// Scroll distance past which the navbar gets its heavy shadow, in px.
    pub navbar_shadow_offset: f64,
    /// Offset subtracted from section tops when picking the active link.
    pub active_link_offset: f64,
    /// Gap left above a section when scrolling to it, in px.
    pub scroll_offset: f64,
    /// Visible ratio that reveals an entrance-animated element.
    pub reveal_threshold: f64,
    /// Root margin for entrance animations, CSS shorthand.
    pub reveal_root_margin: String,
    /// Visible ratio that starts a counter.
    pub counter_threshold: f64,
    /// Counter animation length, in ms.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "millis"))]
    pub counter_duration_ms: u64,
    /// Visible ratio that loads a lazy image.
    pub lazy_threshold: f64,
    /// Simulated submission latency, in ms.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "millis"))]
    pub submit_delay_ms: u64,
    /// How long the form outcome banner stays up, in ms.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "millis"))]
    pub form_message_ms: u64,
    /// Default notification lifetime, in ms.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "millis"))]
    pub notification_ms: u64,
    /// Exit transition before a notification is detached, in ms.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "millis"))]
    pub notification_exit_ms: u64,
    /// Delay before the loader starts fading, in ms.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "millis"))]
    pub loader_delay_ms: u64,
    /// Loader fade duration, in ms.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "millis"))]
    pub loader_fade_ms: u64,
    /// Fallback delay after window `load`, in ms.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "millis"))]
    pub loader_fallback_ms: u64,
    /// Images preloaded at startup.
    pub critical_images: Vec<String>,
    /// `tracing` filter directive used by the web logger.
    pub log_filter: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::landing()
    }
}

impl SiteConfig {
    /// The landing page defaults.
    #[must_use]
    pub fn landing() -> Self {
        Self {
            scroll_throttle_ms: 16,
            navbar_shadow_offset: 50.0,
            active_link_offset: 100.0,
            scroll_offset: 80.0,
            reveal_threshold: 0.1,
            reveal_root_margin: String::from("0px 0px -50px 0px"),
            counter_threshold: 0.5,
            counter_duration_ms: 2_000,
            lazy_threshold: 0.0,
            submit_delay_ms: 1_500,
            form_message_ms: 5_000,
            notification_ms: 5_000,
            notification_exit_ms: 300,
            loader_delay_ms: 500,
            loader_fade_ms: 300,
            loader_fallback_ms: 800,
            critical_images: vec![String::from("./img/Isotipo.png")],
            log_filter: String::from("info"),
        }
    }

    /// Checks thresholds and root margins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("reveal_threshold", self.reveal_threshold)?;
        check_threshold("counter_threshold", self.counter_threshold)?;
        check_threshold("lazy_threshold", self.lazy_threshold)?;
        self.reveal_margin()?;
        Ok(())
    }

    /// Parsed entrance-animation root margin.
    pub fn reveal_margin(&self) -> Result<RootMargin, ConfigError> {
        self.reveal_root_margin
            .parse()
            .map_err(|source| ConfigError::RootMargin {
                name: "reveal_root_margin",
                source,
            })
    }

    /// Entrance animations re-arm on every crossing.
    pub fn reveal_options(&self) -> Result<ObserveOptions, ConfigError> {
        Ok(ObserveOptions::new(self.reveal_threshold).with_root_margin(self.reveal_margin()?))
    }

    /// Counters start once.
    #[must_use]
    pub fn counter_options(&self) -> ObserveOptions {
        ObserveOptions::new(self.counter_threshold).fire_once(true)
    }

    /// Lazy images load once.
    #[must_use]
    pub fn lazy_options(&self) -> ObserveOptions {
        ObserveOptions::new(self.lazy_threshold).fire_once(true)
    }

    /// Scroll throttle interval.
    #[must_use]
    pub fn scroll_throttle(&self) -> Duration {
        Duration::from_millis(self.scroll_throttle_ms)
    }

    /// Counter animation length.
    #[must_use]
    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    /// Simulated submission latency.
    #[must_use]
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Form outcome banner lifetime.
    #[must_use]
    pub fn form_message(&self) -> Duration {
        Duration::from_millis(self.form_message_ms)
    }

    /// Default notification lifetime.
    #[must_use]
    pub fn notification(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    /// Notification exit transition.
    #[must_use]
    pub fn notification_exit(&self) -> Duration {
        Duration::from_millis(self.notification_exit_ms)
    }

    /// Loader fade start delay.
    #[must_use]
    pub fn loader_delay(&self) -> Duration {
        Duration::from_millis(self.loader_delay_ms)
    }

    /// Loader fade duration.
    #[must_use]
    pub fn loader_fade(&self) -> Duration {
        Duration::from_millis(self.loader_fade_ms)
    }

    /// Loader fallback delay after window `load`.
    #[must_use]
    pub fn loader_fallback(&self) -> Duration {
        Duration::from_millis(self.loader_fallback_ms)
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange { name, value })
    }
}

/// Deserializes a millisecond count, clamping negative and NaN values to 0.
#[cfg(feature = "serde")]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is checked positive; `as` saturates past u64::MAX"
)]
fn millis<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let ms = <f64 as serde::Deserialize>::deserialize(deserializer)?;
    Ok(if ms > 0.0 { ms as u64 } else { 0 })
}
