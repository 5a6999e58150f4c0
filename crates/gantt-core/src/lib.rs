#![forbid(unsafe_code)]

//! Core geometry for timeline charts.
//!
//! Everything here is plain math over validated inputs: a [`TimeRange`]
//! that cannot be empty, affine [`TimeScale`]/[`RowScale`] maps from
//! time and row index to pixel positions, a validated [`ChartLayout`],
//! packed [`Rgba`] colors, and calendar-aligned axis [`ticks()`].
//!
//! Nothing in this crate holds mutable state or performs IO; the
//! stateful container lives in `gantt-store`.

pub mod color;
pub mod error;
pub mod geometry;
pub mod scale;
pub mod ticks;
pub mod time;

pub use color::{ParseColorError, Rgba};
pub use error::GeometryError;
pub use geometry::{ChartLayout, Insets};
pub use scale::{RowScale, TimeScale};
pub use ticks::{Tick, TickUnit, ticks};
pub use time::{DAY_MS, TimeRange};
