#![forbid(unsafe_code)]

//! Errors surfaced by the timeline store.

use crate::task::TaskId;
use chrono::{DateTime, Utc};
use gantt_core::GeometryError;
use std::fmt;

/// Why a store operation was rejected. Failed operations leave the
/// store untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineError {
    /// Task id 0 is reserved.
    ZeroTaskId,
    /// Two tasks with the same id in one store.
    DuplicateTaskId { id: TaskId },
    /// The addressed task does not exist.
    TaskNotFound { id: TaskId },
    /// A task whose end would lie before its start.
    InvalidTaskDates {
        id: TaskId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// A zoom factor that is not a finite positive number.
    InvalidZoomFactor { factor: f64 },
    /// A pan distance that is not a finite number of days.
    InvalidPanDelta { days: f64 },
    /// A snapshot produced by an incompatible version.
    UnsupportedSchemaVersion { version: u16 },
    /// Window or layout math failed.
    Geometry(GeometryError),
}

impl fmt::Display for TimelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTaskId => write!(f, "task id 0 is invalid"),
            Self::DuplicateTaskId { id } => write!(f, "duplicate task id {id}"),
            Self::TaskNotFound { id } => write!(f, "task {id} not found"),
            Self::InvalidTaskDates { id, start, end } => {
                write!(f, "task {id} end {end} must not lie before start {start}")
            }
            Self::InvalidZoomFactor { factor } => {
                write!(f, "zoom factor {factor} must be finite and positive")
            }
            Self::InvalidPanDelta { days } => {
                write!(f, "pan distance {days} days must be finite")
            }
            Self::UnsupportedSchemaVersion { version } => {
                write!(
                    f,
                    "unsupported timeline schema version {version} (expected {})",
                    crate::store::TIMELINE_SCHEMA_VERSION
                )
            }
            Self::Geometry(err) => write!(f, "geometry error: {err}"),
        }
    }
}

impl std::error::Error for TimelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Geometry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GeometryError> for TimelineError {
    fn from(err: GeometryError) -> Self {
        Self::Geometry(err)
    }
}
