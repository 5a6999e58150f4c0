#![forbid(unsafe_code)]

//! Chart layout parameters.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// Default container width in pixels.
pub const DEFAULT_CONTAINER_WIDTH: f64 = 1000.0;
/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f64 = 40.0;

/// Insets for chart padding, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    /// Create new insets with specific values.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create new insets with equal values on every side.
    pub const fn all(val: f64) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new insets from vertical and horizontal values.
    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal_sum(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_sum(&self) -> f64 {
        self.top + self.bottom
    }

    fn validate(&self) -> Result<(), GeometryError> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GeometryError::InvalidInset { side, value });
            }
        }
        Ok(())
    }
}

impl Default for Insets {
    /// The chart padding the default layout ships with.
    fn default() -> Self {
        Self::new(20.0, 20.0, 40.0, 150.0)
    }
}

impl From<f64> for Insets {
    fn from(val: f64) -> Self {
        Self::all(val)
    }
}

impl From<(f64, f64)> for Insets {
    fn from((vertical, horizontal): (f64, f64)) -> Self {
        Self::symmetric(vertical, horizontal)
    }
}

impl From<(f64, f64, f64, f64)> for Insets {
    fn from((top, right, bottom, left): (f64, f64, f64, f64)) -> Self {
        Self::new(top, right, bottom, left)
    }
}

/// Pixel-space parameters of a timeline chart.
///
/// The horizontal chart area runs from `insets.left` to
/// `container_width - insets.right`; rows start at `insets.top` and are
/// `row_height` tall each. [`validate`](Self::validate) must pass
/// before the layout is used to build scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub container_width: f64,
    pub row_height: f64,
    pub insets: Insets,
}

impl ChartLayout {
    /// Create a layout and validate it in one step.
    pub fn new(
        container_width: f64,
        row_height: f64,
        insets: Insets,
    ) -> Result<Self, GeometryError> {
        let layout = Self {
            container_width,
            row_height,
            insets,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Check every dimension: widths and heights must be finite and
    /// positive, insets finite and non-negative, and the horizontal
    /// insets must leave a positive chart area.
    pub fn validate(&self) -> Result<(), GeometryError> {
        for (name, value) in [
            ("container width", self.container_width),
            ("row height", self.row_height),
        ] {
            if !value.is_finite() {
                return Err(GeometryError::NonFiniteDimension { name, value });
            }
            if value <= 0.0 {
                return Err(GeometryError::NonPositiveDimension { name, value });
            }
        }
        self.insets.validate()?;
        if self.container_width <= self.insets.horizontal_sum() {
            return Err(GeometryError::CollapsedChartArea {
                container_width: self.container_width,
                horizontal_insets: self.insets.horizontal_sum(),
            });
        }
        Ok(())
    }

    /// Left edge of the chart area.
    #[inline]
    pub fn chart_left(&self) -> f64 {
        self.insets.left
    }

    /// Right edge of the chart area.
    #[inline]
    pub fn chart_right(&self) -> f64 {
        self.container_width - self.insets.right
    }

    /// Top edge of the first row.
    #[inline]
    pub fn chart_top(&self) -> f64 {
        self.insets.top
    }

    /// Width of the chart area. Positive for a validated layout.
    #[inline]
    pub fn chart_width(&self) -> f64 {
        self.chart_right() - self.chart_left()
    }

    /// Total height needed to show `rows` task rows plus the insets.
    pub fn height_for_rows(&self, rows: usize) -> f64 {
        self.insets.vertical_sum() + self.row_height * rows as f64
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            container_width: DEFAULT_CONTAINER_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            insets: Insets::default(),
        }
    }
}
