#![forbid(unsafe_code)]

//! The timeline store and its derived geometry.

use crate::error::TimelineError;
use crate::task::{Task, TaskId, demo_day, demo_tasks};
use bitflags::bitflags;
use chrono::{DateTime, Utc};
use gantt_core::{ChartLayout, DAY_MS, RowScale, TimeRange, TimeScale};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lowest zoom level: the window may grow to 10x its 1.0 width.
pub const MIN_ZOOM: f64 = 0.1;
/// Highest zoom level: the window may shrink to a fifth of its 1.0 width.
pub const MAX_ZOOM: f64 = 5.0;

/// Version tag for [`TimelineSnapshot`].
pub const TIMELINE_SCHEMA_VERSION: u16 = 1;

bitflags! {
    /// Which parts of the store changed since the last
    /// [`TimelineStore::take_dirty`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Dirty: u8 {
        /// Task list contents changed.
        const TASKS = 1 << 0;
        /// View window or zoom level changed.
        const VIEW = 1 << 1;
        /// Layout parameters changed.
        const LAYOUT = 1 << 2;
    }
}

/// A task plus its derived screen geometry, in pixel coordinates.
///
/// `x`/`width` come straight from the time scale, so a task outside
/// the view window carries coordinates outside the chart area rather
/// than being dropped. `width` is zero exactly for milestones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskBar<'a> {
    pub task: &'a Task,
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

/// State container for one timeline chart.
///
/// Owns the task list (in row order), the visible window, the zoom
/// level, and the layout. All derived values are recomputed on demand;
/// [`revision`](Self::revision) and [`take_dirty`](Self::take_dirty)
/// tell hosts when a recompute is due.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineStore {
    tasks: Vec<Task>,
    view: TimeRange,
    zoom_level: f64,
    layout: ChartLayout,
    revision: u64,
    dirty: Dirty,
}

impl TimelineStore {
    /// Create a store from validated parts.
    ///
    /// Rejects an invalid layout, any task with inverted dates, and
    /// duplicate task ids. Zoom starts at 1.0.
    pub fn new(
        tasks: Vec<Task>,
        view: TimeRange,
        layout: ChartLayout,
    ) -> Result<Self, TimelineError> {
        layout.validate()?;
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            task.validate()?;
            if !seen.insert(task.id) {
                return Err(TimelineError::DuplicateTaskId { id: task.id });
            }
        }
        Ok(Self {
            tasks,
            view,
            zoom_level: 1.0,
            layout,
            revision: 0,
            dirty: Dirty::empty(),
        })
    }

    /// The January 2023 demo chart: three seed tasks, a one-month
    /// window, and the default layout.
    pub fn demo() -> Self {
        // The window constants are ordered, so construction cannot fail.
        let view = TimeRange::new(demo_day(0), demo_day(31)).unwrap_or_default();
        Self {
            tasks: demo_tasks(),
            view,
            zoom_level: 1.0,
            layout: ChartLayout::default(),
            revision: 0,
            dirty: Dirty::empty(),
        }
    }

    // --- reads ---

    /// Tasks in row order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// The visible time window.
    pub fn view(&self) -> TimeRange {
        self.view
    }

    /// Current zoom level, always within `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    /// Current layout parameters.
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// Bumped by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Horizontal scale mapping the view window onto the chart area.
    pub fn time_scale(&self) -> TimeScale {
        TimeScale::new(self.view, self.layout.chart_left(), self.layout.chart_right())
    }

    /// Vertical scale mapping row index to pixel position.
    pub fn row_scale(&self) -> RowScale {
        RowScale::new(self.layout.chart_top(), self.layout.row_height)
    }

    /// Total chart height for the current task count.
    pub fn chart_height(&self) -> f64 {
        self.layout.height_for_rows(self.tasks.len())
    }

    /// Derive one bar per task, in row order.
    pub fn task_bars(&self) -> Vec<TaskBar<'_>> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("task_bars", tasks = self.tasks.len()).entered();

        let time = self.time_scale();
        let rows = self.row_scale();
        self.tasks
            .iter()
            .enumerate()
            .map(|(index, task)| {
                let x = time.position(task.start);
                TaskBar {
                    task,
                    x,
                    y: rows.position(index as f64),
                    width: time.position(task.end) - x,
                }
            })
            .collect()
    }

    /// Return and clear the accumulated change flags.
    pub fn take_dirty(&mut self) -> Dirty {
        std::mem::take(&mut self.dirty)
    }

    // --- mutations ---

    /// Replace one task's dates.
    ///
    /// Unknown ids and `end < start` are rejected; `end == start`
    /// turns the task into a milestone. No other task is touched.
    pub fn update_task_dates(
        &mut self,
        id: TaskId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), TimelineError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("update_task_dates", id = id.get()).entered();

        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TimelineError::TaskNotFound { id })?;
        if end < start {
            return Err(TimelineError::InvalidTaskDates { id, start, end });
        }
        task.start = start;
        task.end = end;
        self.touch(Dirty::TASKS);
        Ok(())
    }

    /// Zoom about the window midpoint and return the new zoom level.
    ///
    /// The level is `level * factor` clamped to
    /// `[MIN_ZOOM, MAX_ZOOM]`; the window is rescaled by the clamped
    /// ratio, so span and level stay consistent and a saturated zoom
    /// leaves the window as it was.
    pub fn zoom(&mut self, factor: f64) -> Result<f64, TimelineError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("zoom", factor).entered();

        if !factor.is_finite() || factor <= 0.0 {
            return Err(TimelineError::InvalidZoomFactor { factor });
        }
        let new_level = (self.zoom_level * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let effective = new_level / self.zoom_level;
        let view = self.view.rescaled_about_midpoint(effective)?;

        #[cfg(feature = "tracing")]
        if effective != factor {
            tracing::debug!(factor, new_level, "zoom clamped at the level bound");
        }

        self.zoom_level = new_level;
        self.view = view;
        self.touch(Dirty::VIEW);
        Ok(new_level)
    }

    /// Shift the window by a number of (possibly fractional) days.
    ///
    /// Both ends move by the same whole-millisecond amount, so the
    /// span is preserved exactly and `pan(d)` followed by `pan(-d)`
    /// restores the original window.
    pub fn pan(&mut self, days: f64) -> Result<(), TimelineError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("pan", days).entered();

        if !days.is_finite() {
            return Err(TimelineError::InvalidPanDelta { days });
        }
        // An out-of-range product saturates the cast and fails the
        // checked shift below.
        let delta_ms = (days * DAY_MS as f64).round() as i64;
        self.view = self.view.shifted_millis(delta_ms)?;
        self.touch(Dirty::VIEW);
        Ok(())
    }

    /// Replace the view window. The zoom level is left alone.
    pub fn set_view(&mut self, view: TimeRange) {
        self.view = view;
        self.touch(Dirty::VIEW);
    }

    /// Resize the container, re-validating the layout.
    pub fn set_container_width(&mut self, width: f64) -> Result<(), TimelineError> {
        let mut layout = self.layout;
        layout.container_width = width;
        layout.validate()?;
        self.layout = layout;
        self.touch(Dirty::LAYOUT);
        Ok(())
    }

    /// Change the row height, re-validating the layout.
    pub fn set_row_height(&mut self, height: f64) -> Result<(), TimelineError> {
        let mut layout = self.layout;
        layout.row_height = height;
        layout.validate()?;
        self.layout = layout;
        self.touch(Dirty::LAYOUT);
        Ok(())
    }

    /// Change the chart insets, re-validating the layout.
    pub fn set_insets(&mut self, insets: gantt_core::Insets) -> Result<(), TimelineError> {
        let mut layout = self.layout;
        layout.insets = insets;
        layout.validate()?;
        self.layout = layout;
        self.touch(Dirty::LAYOUT);
        Ok(())
    }

    /// Capture the full state for host interchange.
    pub fn snapshot(&self) -> TimelineSnapshot {
        TimelineSnapshot {
            schema_version: TIMELINE_SCHEMA_VERSION,
            tasks: self.tasks.clone(),
            view: self.view,
            zoom_level: self.zoom_level,
            layout: self.layout,
        }
    }

    /// Rebuild a store from a snapshot, re-validating everything.
    pub fn from_snapshot(snapshot: TimelineSnapshot) -> Result<Self, TimelineError> {
        if snapshot.schema_version != TIMELINE_SCHEMA_VERSION {
            return Err(TimelineError::UnsupportedSchemaVersion {
                version: snapshot.schema_version,
            });
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&snapshot.zoom_level) {
            return Err(TimelineError::InvalidZoomFactor {
                factor: snapshot.zoom_level,
            });
        }
        let mut store = Self::new(snapshot.tasks, snapshot.view, snapshot.layout)?;
        store.zoom_level = snapshot.zoom_level;
        Ok(store)
    }

    fn touch(&mut self, bits: Dirty) {
        self.revision += 1;
        self.dirty |= bits;
    }
}

/// Serializable capture of a whole store.
///
/// This is in-memory interchange, not persistence: restoring goes
/// through [`TimelineStore::from_snapshot`], which re-validates every
/// field against the current schema version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub schema_version: u16,
    pub tasks: Vec<Task>,
    pub view: TimeRange,
    pub zoom_level: f64,
    pub layout: ChartLayout,
}
