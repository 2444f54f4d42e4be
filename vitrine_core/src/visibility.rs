// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold-crossing callbacks for watched elements.
//!
//! [`VisibilityTrigger`] holds a set of watched elements and a callback. The
//! host's intersection primitive (an `IntersectionObserver` on the web)
//! delivers batches of [`IntersectionEntry`] values through
//! [`deliver`](VisibilityTrigger::deliver); the trigger turns them into one
//! callback per upward threshold crossing.
//!
//! An element *qualifies* when it intersects the (margin-adjusted) root and
//! its visible ratio is at least the threshold. The callback runs on the
//! transition from not qualifying to qualifying. With
//! [`fire_once`](ObserveOptions::fire_once) the element is released right
//! after its first callback; otherwise it re-arms once it stops qualifying.
//!
//! Entries for elements that are not watched are ignored, so an element
//! removed from the document (for which the host stops reporting) simply
//! never fires again.
//!
//! [`RootMargin`] mirrors the CSS `rootMargin` shorthand and
//! [`IntersectionEntry::from_geometry`] computes entries from layout
//! rectangles for hosts without a native intersection primitive.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use kurbo::{Insets, Rect};

use crate::trace::{Tracer, VisibilityEvent};

// ---------------------------------------------------------------------------
// Root margin
// ---------------------------------------------------------------------------

/// Errors from parsing a [`RootMargin`] shorthand.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RootMarginError {
    /// The string held no values.
    #[error("root margin is empty")]
    Empty,
    /// More than four values were given.
    #[error("root margin takes at most 4 values, got {0}")]
    TooManyValues(usize),
    /// A value was not a pixel or percentage length.
    #[error("invalid root margin value `{0}` (expected px or %)")]
    InvalidValue(String),
}

/// A single side of a [`RootMargin`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarginLength {
    /// Absolute offset in CSS pixels.
    Px(f64),
    /// Offset relative to the root's width (left/right) or height
    /// (top/bottom).
    Percent(f64),
}

impl MarginLength {
    /// Resolves the length against the root extent along its axis.
    #[must_use]
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => extent * pct / 100.0,
        }
    }

    fn parse(token: &str) -> Result<Self, RootMarginError> {
        let invalid = || RootMarginError::InvalidValue(String::from(token));
        if let Some(num) = token.strip_suffix("px") {
            num.parse().map(Self::Px).map_err(|_| invalid())
        } else if let Some(num) = token.strip_suffix('%') {
            num.parse().map(Self::Percent).map_err(|_| invalid())
        } else {
            // Unitless zero is the only bare number CSS accepts here.
            match token.parse::<f64>() {
                Ok(v) if v == 0.0 => Ok(Self::Px(0.0)),
                _ => Err(invalid()),
            }
        }
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Offsets that grow (positive) or shrink (negative) the root box before
/// intersections are computed, in CSS `rootMargin` order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    /// Top offset.
    pub top: MarginLength,
    /// Right offset.
    pub right: MarginLength,
    /// Bottom offset.
    pub bottom: MarginLength,
    /// Left offset.
    pub left: MarginLength,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl RootMargin {
    /// No adjustment.
    pub const ZERO: Self = Self::px(0.0, 0.0, 0.0, 0.0);

    /// Creates a margin from pixel offsets.
    #[must_use]
    pub const fn px(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top: MarginLength::Px(top),
            right: MarginLength::Px(right),
            bottom: MarginLength::Px(bottom),
            left: MarginLength::Px(left),
        }
    }

    /// Resolves the margin against `root` into outward [`Insets`].
    #[must_use]
    pub fn to_insets(&self, root: Rect) -> Insets {
        let (w, h) = (root.width(), root.height());
        Insets::new(
            self.left.resolve(w),
            self.top.resolve(h),
            self.right.resolve(w),
            self.bottom.resolve(h),
        )
    }

    /// Applies the margin to `root`.
    #[must_use]
    pub fn apply(&self, root: Rect) -> Rect {
        root + self.to_insets(root)
    }
}

impl FromStr for RootMargin {
    type Err = RootMarginError;

    /// Parses the 1 to 4 value CSS shorthand (`"10px"`, `"0px 0px -50px 0px"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = [MarginLength::Px(0.0); 4];
        let mut count = 0;
        for token in s.split_whitespace() {
            if count == 4 {
                return Err(RootMarginError::TooManyValues(s.split_whitespace().count()));
            }
            values[count] = MarginLength::parse(token)?;
            count += 1;
        }
        let [a, b, c, d] = values;
        match count {
            0 => Err(RootMarginError::Empty),
            1 => Ok(Self { top: a, right: a, bottom: a, left: a }),
            2 => Ok(Self { top: a, right: b, bottom: a, left: b }),
            3 => Ok(Self { top: a, right: b, bottom: c, left: b }),
            _ => Ok(Self { top: a, right: b, bottom: c, left: d }),
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

// ---------------------------------------------------------------------------
// Options and entries
// ---------------------------------------------------------------------------

/// How a [`VisibilityTrigger`] decides that an element became visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserveOptions {
    /// Minimum visible ratio, in `[0, 1]`. Zero means any intersection.
    pub threshold: f64,
    /// Adjustment applied to the root box.
    pub root_margin: RootMargin,
    /// Release each element after its first callback.
    pub fire_once: bool,
}

impl ObserveOptions {
    /// Re-arming options with the given threshold and no root margin.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            root_margin: RootMargin::ZERO,
            fire_once: false,
        }
    }

    /// Sets the root margin.
    #[must_use]
    pub const fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }

    /// Sets whether elements are released after their first callback.
    #[must_use]
    pub const fn fire_once(mut self, fire_once: bool) -> Self {
        self.fire_once = fire_once;
        self
    }
}

/// One visibility observation for one element.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry<E> {
    /// The observed element.
    pub target: E,
    /// Visible fraction of the element's area, in `[0, 1]`.
    pub ratio: f64,
    /// Whether the element touches the root at all.
    pub is_intersecting: bool,
}

impl<E> IntersectionEntry<E> {
    /// Computes an entry from the element's bounds and the root (viewport)
    /// rectangle, adjusted by `margin`.
    ///
    /// Edge-adjacent rectangles intersect with ratio 0, except that a
    /// zero-area element inside the root reports ratio 1.
    pub fn from_geometry(target: E, bounds: Rect, root: Rect, margin: &RootMargin) -> Self {
        let root = margin.apply(root);
        let x0 = bounds.x0.max(root.x0);
        let y0 = bounds.y0.max(root.y0);
        let x1 = bounds.x1.min(root.x1);
        let y1 = bounds.y1.min(root.y1);
        let is_intersecting = x0 <= x1 && y0 <= y1;

        let area = bounds.area().abs();
        let ratio = if !is_intersecting {
            0.0
        } else if area == 0.0 {
            1.0
        } else {
            ((x1 - x0) * (y1 - y0) / area).clamp(0.0, 1.0)
        };

        Self {
            target,
            ratio,
            is_intersecting,
        }
    }
}

// ---------------------------------------------------------------------------
// VisibilityTrigger
// ---------------------------------------------------------------------------

struct Watched<E> {
    element: E,
    qualifying: bool,
}

/// Invokes a callback when watched elements cross a visibility threshold.
pub struct VisibilityTrigger<E> {
    options: ObserveOptions,
    watched: Vec<Watched<E>>,
    callback: Box<dyn FnMut(&E)>,
    label: &'static str,
    tracer: Tracer,
}

impl<E> fmt::Debug for VisibilityTrigger<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityTrigger")
            .field("label", &self.label)
            .field("options", &self.options)
            .field("watched", &self.watched.len())
            .finish_non_exhaustive()
    }
}

impl<E: PartialEq> VisibilityTrigger<E> {
    /// Watches `elements`, calling `callback` on each upward crossing.
    pub fn observe(
        elements: impl IntoIterator<Item = E>,
        callback: impl FnMut(&E) + 'static,
        options: ObserveOptions,
    ) -> Self {
        let mut trigger = Self {
            options,
            watched: Vec::new(),
            callback: Box::new(callback),
            label: "visibility",
            tracer: Tracer::none(),
        };
        for element in elements {
            trigger.watch(element);
        }
        trigger
    }

    /// Attaches a label and tracer used for diagnostics.
    #[must_use]
    pub fn traced(mut self, label: &'static str, tracer: Tracer) -> Self {
        self.label = label;
        self.tracer = tracer;
        self
    }

    /// The options this trigger was created with.
    #[must_use]
    pub fn options(&self) -> &ObserveOptions {
        &self.options
    }

    /// Diagnostic label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Starts watching `element`. Watching an element twice is a no-op.
    pub fn watch(&mut self, element: E) {
        if !self.is_watched(&element) {
            self.watched.push(Watched {
                element,
                qualifying: false,
            });
        }
    }

    /// Stops watching `element`, returning whether it was watched.
    pub fn unwatch(&mut self, element: &E) -> bool {
        let before = self.watched.len();
        self.watched.retain(|w| w.element != *element);
        self.watched.len() != before
    }

    /// Returns `true` if `element` is watched.
    #[must_use]
    pub fn is_watched(&self, element: &E) -> bool {
        self.watched.iter().any(|w| w.element == *element)
    }

    /// Iterates over the watched elements.
    pub fn watched(&self) -> impl Iterator<Item = &E> {
        self.watched.iter().map(|w| &w.element)
    }

    /// Number of watched elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.watched.len()
    }

    /// Returns `true` once nothing is watched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }

    /// Whether `entry` meets the threshold.
    #[must_use]
    pub fn qualifies(&self, entry: &IntersectionEntry<E>) -> bool {
        entry.is_intersecting && entry.ratio >= self.options.threshold
    }

    /// Processes a batch of observations, in any element order.
    ///
    /// Returns the elements released by `fire_once`, so the host can stop
    /// observing them.
    pub fn deliver(&mut self, entries: impl IntoIterator<Item = IntersectionEntry<E>>) -> Vec<E> {
        let mut released = Vec::new();
        for entry in entries {
            let qualifies = self.qualifies(&entry);
            let Some(idx) = self.watched.iter().position(|w| w.element == entry.target) else {
                continue;
            };
            let was_qualifying = core::mem::replace(&mut self.watched[idx].qualifying, qualifies);
            if !qualifies || was_qualifying {
                continue;
            }

            let fire_once = self.options.fire_once;
            self.tracer.visibility(&VisibilityEvent {
                label: self.label,
                ratio: entry.ratio,
                released: fire_once,
            });
            if fire_once {
                let watched = self.watched.remove(idx);
                (self.callback)(&watched.element);
                released.push(watched.element);
            } else {
                (self.callback)(&self.watched[idx].element);
            }
        }
        released
    }
}
