#![forbid(unsafe_code)]

//! Timeline state for Gantt charts.
//!
//! [`TimelineStore`] owns the task list, the visible time window, the
//! zoom level, and the chart layout, and derives per-task screen
//! geometry from them on demand. Mutations go through validating
//! methods that either apply completely or return a [`TimelineError`]
//! and change nothing; hosts poll [`TimelineStore::take_dirty`] to
//! find out what to recompute.
//!
//! Interactive date editing lives in [`drag`]: a [`DragSession`]
//! snapshots a task at pointer-down and derives day-snapped dates from
//! the current pointer position.
//!
//! With the `tracing` feature enabled, mutations open debug spans and
//! note zoom saturation; without it the crate stays dependency-light.

pub mod drag;
pub mod error;
pub mod store;
pub mod task;

pub use drag::{DragKind, DragSession};
pub use error::TimelineError;
pub use store::{
    Dirty, MAX_ZOOM, MIN_ZOOM, TIMELINE_SCHEMA_VERSION, TaskBar, TimelineSnapshot, TimelineStore,
};
pub use task::{Task, TaskId, demo_tasks};
