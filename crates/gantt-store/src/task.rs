#![forbid(unsafe_code)]

//! Task model and seed data.

use crate::error::TimelineError;
use chrono::{DateTime, TimeDelta, Utc};
use gantt_core::{DAY_MS, Rgba};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier for a task. Id 0 is reserved and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Create a task id, rejecting the reserved value 0.
    pub fn new(raw: u64) -> Result<Self, TimelineError> {
        if raw == 0 {
            return Err(TimelineError::ZeroTaskId);
        }
        Ok(Self(raw))
    }

    /// The raw id value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u64::deserialize(deserializer)?;
        TaskId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// One row of the chart.
///
/// `end >= start` is the task invariant; `end == start` marks a
/// milestone that renders as a zero-width bar. The store re-validates
/// tasks on construction and snapshot restore, so mutate owned tasks
/// freely before handing them over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color: Rgba,
}

impl Task {
    /// Create a task, rejecting `end < start`.
    pub fn new(
        id: TaskId,
        name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        color: Rgba,
    ) -> Result<Self, TimelineError> {
        let task = Self {
            id,
            name: name.into(),
            start,
            end,
            color,
        };
        task.validate()?;
        Ok(task)
    }

    /// Check the date invariant.
    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.end < self.start {
            return Err(TimelineError::InvalidTaskDates {
                id: self.id,
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// How long the task runs. Zero for milestones.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Whether the task is a zero-length milestone.
    pub fn is_milestone(&self) -> bool {
        self.start == self.end
    }
}

/// Midnight UTC `days` days after 2023-01-01.
///
/// Seed offsets stay inside early 2023, far from the edges of the
/// representable range, so the add cannot panic.
pub(crate) fn demo_day(days: i64) -> DateTime<Utc> {
    const JAN_1_2023_MS: i64 = 1_672_531_200_000;
    DateTime::UNIX_EPOCH + TimeDelta::milliseconds(JAN_1_2023_MS + days * DAY_MS)
}

/// The three-task January 2023 data set the demo chart ships with.
///
/// Task 1 runs Jan 1-10, Task 2 Jan 5-15, Task 3 Jan 12-20.
pub fn demo_tasks() -> Vec<Task> {
    vec![
        Task {
            id: TaskId(1),
            name: "Task 1".to_string(),
            start: demo_day(0),
            end: demo_day(9),
            color: Rgba::rgb(0x4E, 0x79, 0xA7),
        },
        Task {
            id: TaskId(2),
            name: "Task 2".to_string(),
            start: demo_day(4),
            end: demo_day(14),
            color: Rgba::rgb(0xF2, 0x8E, 0x2B),
        },
        Task {
            id: TaskId(3),
            name: "Task 3".to_string(),
            start: demo_day(11),
            end: demo_day(19),
            color: Rgba::rgb(0xE1, 0x57, 0x59),
        },
    ]
}
