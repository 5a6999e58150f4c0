#![forbid(unsafe_code)]

//! Affine maps from time and row index to pixel positions.
//!
//! [`TimeScale`] is the horizontal axis: it maps the view window onto
//! the chart area and extrapolates linearly for timestamps outside the
//! window instead of clamping, so bars that start before the window or
//! end after it keep their true proportions. [`RowScale`] is the
//! vertical axis: each task row is a fixed-height band below the top
//! inset.

use crate::time::{DAY_MS, TimeRange};
use chrono::{DateTime, Utc};

/// Affine map from timestamps to horizontal pixel positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: TimeRange,
    px_start: f64,
    px_diff: f64,
}

impl TimeScale {
    /// Map `domain` onto the pixel interval `[px_start, px_end]`.
    ///
    /// A reversed interval (`px_end < px_start`) produces a descending
    /// axis; that is well-defined, just unusual.
    pub fn new(domain: TimeRange, px_start: f64, px_end: f64) -> Self {
        Self {
            domain,
            px_start,
            px_diff: px_end - px_start,
        }
    }

    /// The time interval this scale maps from.
    #[inline]
    pub fn domain(&self) -> TimeRange {
        self.domain
    }

    /// Pixel position of the domain start.
    #[inline]
    pub fn pixel_start(&self) -> f64 {
        self.px_start
    }

    /// Pixel position of the domain end.
    #[inline]
    pub fn pixel_end(&self) -> f64 {
        self.px_start + self.px_diff
    }

    /// Pixel position of `t`.
    ///
    /// Defined for every timestamp; times outside the domain
    /// extrapolate past the pixel bounds.
    pub fn position(&self, t: DateTime<Utc>) -> f64 {
        let elapsed = (t.timestamp_millis() - self.domain.start().timestamp_millis()) as f64;
        let fraction = elapsed / self.domain.span_millis() as f64;
        self.px_start + fraction * self.px_diff
    }

    /// Timestamp at a pixel position, rounded to whole milliseconds.
    ///
    /// `None` when the pixel span is zero (the map has no inverse) or
    /// the result is outside the representable timestamp range.
    pub fn time_at(&self, px: f64) -> Option<DateTime<Utc>> {
        if self.px_diff == 0.0 || !px.is_finite() {
            return None;
        }
        let fraction = (px - self.px_start) / self.px_diff;
        let ms = self.domain.start().timestamp_millis() as f64
            + fraction * self.domain.span_millis() as f64;
        if !ms.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis(ms.round() as i64)
    }

    /// How many pixels one day covers at this scale.
    pub fn pixels_per_day(&self) -> f64 {
        self.px_diff / self.domain.span_millis() as f64 * DAY_MS as f64
    }
}

/// Affine map from row index to vertical pixel position.
///
/// `position(i)` is the top edge of row `i`; `position(i + 1)` is its
/// bottom edge, so fractional indexes address points inside a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowScale {
    top: f64,
    row_height: f64,
}

impl RowScale {
    /// Rows of `row_height` pixels starting at `top`.
    pub const fn new(top: f64, row_height: f64) -> Self {
        Self { top, row_height }
    }

    /// Top edge of the first row.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.top
    }

    /// Height of one row.
    #[inline]
    pub const fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Pixel position of row `index`.
    pub fn position(&self, index: f64) -> f64 {
        self.top + index * self.row_height
    }
}
