// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear count-up interpolation for numeric counters.
//!
//! A [`CounterAnimation`] maps elapsed time to the integer a counter should
//! display: `floor(target * elapsed / duration)`, clamped so the last frame
//! shows the exact target. It holds no timers; the caller samples it once
//! per animation frame.

use core::fmt;

use crate::time::{Duration, HostTime};

/// A count from zero to `target` over `duration`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CounterAnimation {
    target: i64,
    duration: Duration,
    start: HostTime,
}

impl fmt::Debug for CounterAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CounterAnimation")
            .field("target", &self.target)
            .field("duration", &self.duration)
            .field("start", &self.start)
            .finish()
    }
}

/// One sampled value of a [`CounterAnimation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    /// Value to display.
    pub value: i64,
    /// Whether this is the final frame.
    pub done: bool,
}

impl CounterAnimation {
    /// Starts an animation at `start`.
    #[must_use]
    pub const fn new(target: i64, duration: Duration, start: HostTime) -> Self {
        Self {
            target,
            duration,
            start,
        }
    }

    /// Final value.
    #[must_use]
    pub const fn target(&self) -> i64 {
        self.target
    }

    /// Total running time.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Value after `elapsed` has passed since the start.
    ///
    /// Non-positive targets and zero durations jump straight to the target.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the quotient is bounded by `target`, which is an i64"
    )]
    pub fn value_at(&self, elapsed: Duration) -> i64 {
        if self.target <= 0 || elapsed >= self.duration {
            return self.target;
        }
        let scaled = i128::from(self.target) * i128::from(elapsed.ticks());
        (scaled / i128::from(self.duration.ticks())) as i64
    }

    /// Samples the animation at host time `now`.
    #[must_use]
    pub fn frame(&self, now: HostTime) -> CounterFrame {
        let elapsed = now.saturating_duration_since(self.start);
        let value = self.value_at(elapsed);
        CounterFrame {
            value,
            done: value == self.target,
        }
    }
}

/// Parses a counter target the way `parseInt(s, 10)` does: optional leading
/// whitespace, an optional sign, then as many decimal digits as are present.
/// Anything unparsable yields `0`; values saturate at the `i64` range.
#[must_use]
pub fn parse_counter_target(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    value
}
