#![forbid(unsafe_code)]

//! Validation errors for the core geometry types.

use chrono::{DateTime, Utc};
use std::fmt;

/// Why a range, layout, or scale input was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// A time range whose end does not lie strictly after its start.
    EmptyRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// A rescale factor that is not a finite positive number.
    InvalidScaleFactor { factor: f64 },
    /// Arithmetic left the range of representable timestamps.
    TimestampOutOfRange,
    /// A layout dimension that must be finite was NaN or infinite.
    NonFiniteDimension { name: &'static str, value: f64 },
    /// A layout dimension that must be positive was zero or below.
    NonPositiveDimension { name: &'static str, value: f64 },
    /// An inset component was negative or non-finite.
    InvalidInset { side: &'static str, value: f64 },
    /// Horizontal insets consume the whole container width.
    CollapsedChartArea {
        container_width: f64,
        horizontal_insets: f64,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRange { start, end } => {
                write!(f, "time range end {end} must lie after start {start}")
            }
            Self::InvalidScaleFactor { factor } => {
                write!(f, "scale factor {factor} must be finite and positive")
            }
            Self::TimestampOutOfRange => {
                write!(f, "timestamp arithmetic left the representable range")
            }
            Self::NonFiniteDimension { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
            Self::NonPositiveDimension { name, value } => {
                write!(f, "{name} must be positive, got {value}")
            }
            Self::InvalidInset { side, value } => {
                write!(f, "{side} inset must be a finite non-negative number, got {value}")
            }
            Self::CollapsedChartArea {
                container_width,
                horizontal_insets,
            } => {
                write!(
                    f,
                    "container width {container_width} leaves no chart area after {horizontal_insets} of horizontal insets"
                )
            }
        }
    }
}

impl std::error::Error for GeometryError {}
