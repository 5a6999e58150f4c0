#![forbid(unsafe_code)]

//! Pointer-driven date editing.
//!
//! A [`DragSession`] snapshots a task's dates and the pointer position
//! when the drag begins, then derives new dates from the current
//! pointer position alone. Nothing accumulates between updates, so
//! replaying the same pointer position is idempotent and pointer
//! jitter cannot compound into drift.
//!
//! Deltas snap to whole days: at chart densities a day is the smallest
//! meaningful unit, and snapping keeps bars aligned with the day grid
//! while dragging.

use crate::error::TimelineError;
use crate::store::TimelineStore;
use crate::task::TaskId;
use chrono::{DateTime, TimeDelta, Utc};
use gantt_core::GeometryError;

/// Which part of the bar the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Drag the whole bar, preserving its duration.
    Move,
    /// Drag the left edge; the end date stays put.
    ResizeStart,
    /// Drag the right edge; the start date stays put.
    ResizeEnd,
}

/// A drag in progress.
///
/// Dropping the session ends the drag; the store needs no cleanup
/// because every update went through its validating mutation path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    task: TaskId,
    kind: DragKind,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    origin_x: f64,
}

impl DragSession {
    /// Start dragging `id` at pixel position `pointer_x`.
    pub fn begin(
        store: &TimelineStore,
        id: TaskId,
        kind: DragKind,
        pointer_x: f64,
    ) -> Result<Self, TimelineError> {
        let task = store.task(id).ok_or(TimelineError::TaskNotFound { id })?;
        Ok(Self {
            task: id,
            kind,
            start: task.start,
            end: task.end,
            origin_x: pointer_x,
        })
    }

    /// The task being dragged.
    pub fn task(&self) -> TaskId {
        self.task
    }

    /// What the drag moves.
    pub fn kind(&self) -> DragKind {
        self.kind
    }

    /// Whole-day pointer travel at the store's current time scale.
    ///
    /// The scale is read per call, so zooming mid-drag changes how far
    /// the remaining travel reaches, exactly like the live chart.
    pub fn delta_days(&self, store: &TimelineStore, pointer_x: f64) -> i64 {
        let ppd = store.time_scale().pixels_per_day();
        if !ppd.is_finite() || ppd == 0.0 {
            return 0;
        }
        ((pointer_x - self.origin_x) / ppd).round() as i64
    }

    /// Re-derive the task's dates from the current pointer position.
    ///
    /// Returns whether the task actually changed. Resize edges clamp
    /// at the opposite date, so dragging past it produces a milestone
    /// rather than an inverted task.
    pub fn update(
        &self,
        store: &mut TimelineStore,
        pointer_x: f64,
    ) -> Result<bool, TimelineError> {
        let days = self.delta_days(store, pointer_x);
        let delta = TimeDelta::try_days(days)
            .ok_or(TimelineError::Geometry(GeometryError::TimestampOutOfRange))?;

        #[cfg(feature = "tracing")]
        tracing::trace!(id = self.task.get(), days, "drag update");

        let (new_start, new_end) = match self.kind {
            DragKind::Move => (shifted(self.start, delta)?, shifted(self.end, delta)?),
            DragKind::ResizeStart => {
                let start = shifted(self.start, delta)?;
                (start.min(self.end), self.end)
            }
            DragKind::ResizeEnd => {
                let end = shifted(self.end, delta)?;
                (self.start, end.max(self.start))
            }
        };

        let current = store
            .task(self.task)
            .ok_or(TimelineError::TaskNotFound { id: self.task })?;
        if current.start == new_start && current.end == new_end {
            return Ok(false);
        }
        store.update_task_dates(self.task, new_start, new_end)?;
        Ok(true)
    }
}

fn shifted(t: DateTime<Utc>, delta: TimeDelta) -> Result<DateTime<Utc>, TimelineError> {
    t.checked_add_signed(delta)
        .ok_or(TimelineError::Geometry(GeometryError::TimestampOutOfRange))
}

#[cfg(test)]
mod tests {
    use super::{DragKind, DragSession};
    use crate::error::TimelineError;
    use crate::store::TimelineStore;
    use crate::task::{TaskId, demo_day};

    fn id(raw: u64) -> TaskId {
        TaskId::new(raw).unwrap()
    }

    // Demo chart: 830 px across 31 days.
    fn pixels_for_days(days: f64) -> f64 {
        days * 830.0 / 31.0
    }

    #[test]
    fn begin_rejects_unknown_tasks() {
        let store = TimelineStore::demo();
        let err = DragSession::begin(&store, id(9), DragKind::Move, 300.0).unwrap_err();
        assert_eq!(err, TimelineError::TaskNotFound { id: id(9) });
    }

    #[test]
    fn move_shifts_both_dates_by_whole_days() {
        let mut store = TimelineStore::demo();
        let session = DragSession::begin(&store, id(1), DragKind::Move, 200.0).unwrap();

        let changed = session
            .update(&mut store, 200.0 + pixels_for_days(2.0))
            .unwrap();
        assert!(changed);
        let task = store.task(id(1)).unwrap();
        assert_eq!(task.start, demo_day(2));
        assert_eq!(task.end, demo_day(11));
    }

    #[test]
    fn sub_half_day_travel_snaps_to_no_change() {
        let mut store = TimelineStore::demo();
        let session = DragSession::begin(&store, id(1), DragKind::Move, 200.0).unwrap();

        let changed = session
            .update(&mut store, 200.0 + pixels_for_days(0.4))
            .unwrap();
        assert!(!changed);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn updates_derive_from_the_snapshot_not_the_previous_update() {
        let mut store = TimelineStore::demo();
        let session = DragSession::begin(&store, id(1), DragKind::Move, 200.0).unwrap();

        session
            .update(&mut store, 200.0 + pixels_for_days(5.0))
            .unwrap();
        // Pointer returns close to where it started: dates follow it
        // back instead of adding another five days.
        session
            .update(&mut store, 200.0 + pixels_for_days(1.0))
            .unwrap();
        let task = store.task(id(1)).unwrap();
        assert_eq!(task.start, demo_day(1));
        assert_eq!(task.end, demo_day(10));
    }

    #[test]
    fn repeating_a_pointer_position_is_idempotent() {
        let mut store = TimelineStore::demo();
        let session = DragSession::begin(&store, id(2), DragKind::Move, 400.0).unwrap();

        let x = 400.0 + pixels_for_days(3.0);
        assert!(session.update(&mut store, x).unwrap());
        let revision = store.revision();
        assert!(!session.update(&mut store, x).unwrap());
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn resize_start_clamps_at_the_end_date() {
        let mut store = TimelineStore::demo();
        // Task 1 runs Jan 1-10; drag its left edge 20 days right.
        let session = DragSession::begin(&store, id(1), DragKind::ResizeStart, 150.0).unwrap();
        session
            .update(&mut store, 150.0 + pixels_for_days(20.0))
            .unwrap();
        let task = store.task(id(1)).unwrap();
        assert_eq!(task.start, demo_day(9));
        assert_eq!(task.end, demo_day(9));
        assert!(task.is_milestone());
    }

    #[test]
    fn resize_end_clamps_at_the_start_date() {
        let mut store = TimelineStore::demo();
        let session = DragSession::begin(&store, id(3), DragKind::ResizeEnd, 700.0).unwrap();
        session
            .update(&mut store, 700.0 - pixels_for_days(30.0))
            .unwrap();
        let task = store.task(id(3)).unwrap();
        assert_eq!(task.start, demo_day(11));
        assert_eq!(task.end, demo_day(11));
    }

    #[test]
    fn resize_end_extends_normally() {
        let mut store = TimelineStore::demo();
        let session = DragSession::begin(&store, id(2), DragKind::ResizeEnd, 500.0).unwrap();
        session
            .update(&mut store, 500.0 + pixels_for_days(4.0))
            .unwrap();
        let task = store.task(id(2)).unwrap();
        assert_eq!(task.start, demo_day(4));
        assert_eq!(task.end, demo_day(18));
    }

    #[test]
    fn zooming_mid_drag_changes_the_snap_distance() {
        let mut store = TimelineStore::demo();
        let session = DragSession::begin(&store, id(1), DragKind::Move, 200.0).unwrap();
        let travel = pixels_for_days(2.0);

        store.zoom(2.0).unwrap();
        // Twice the zoom doubles pixels per day, so the same travel
        // now reads as one day instead of two.
        assert_eq!(session.delta_days(&store, 200.0 + travel), 1);
    }
}
