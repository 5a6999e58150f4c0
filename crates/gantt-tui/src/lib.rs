#![forbid(unsafe_code)]

//! Terminal rendering for Gantt timelines.
//!
//! Two pieces: [`TextSurface`], a width x height grid of colored
//! characters with edge-clipping writers, and [`ChartRenderer`], which
//! draws a [`gantt_store::TimelineStore`] onto a surface: an axis
//! header, one row per task, bars in each task's color.
//!
//! The renderer maps the store's pixel coordinates onto the surface
//! width, so the same store renders at any terminal size. Output comes
//! out of [`TextSurface::to_plain_lines`] (tests, logs) or
//! [`TextSurface::to_ansi_lines`] (truecolor escapes for a real
//! terminal).

pub mod chart;
pub mod surface;

pub use chart::ChartRenderer;
pub use surface::TextSurface;
