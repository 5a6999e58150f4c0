#![forbid(unsafe_code)]

//! Calendar-aligned axis ticks.
//!
//! Ticks are derived from a [`TimeScale`]: the walk visits every day,
//! Monday, or first-of-month boundary inside the scale's domain and
//! carries a ready-made label so every renderer draws the same axis.

use crate::scale::TimeScale;
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};

/// Granularity of the axis, picked from how wide a day renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickUnit {
    /// One tick per day, labeled with the day of month.
    Days,
    /// One tick per ISO week, starting on Mondays.
    Weeks,
    /// One tick per month.
    Months,
}

impl TickUnit {
    /// Choose a unit dense enough to label at `ppd` pixels per day.
    ///
    /// Day labels need roughly 20 px per day to stay readable; weeks
    /// work down to a few px per day; anything tighter gets months.
    pub fn for_pixels_per_day(ppd: f64) -> Self {
        if ppd >= 20.0 {
            Self::Days
        } else if ppd >= 4.0 {
            Self::Weeks
        } else {
            Self::Months
        }
    }
}

/// One axis tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// The boundary this tick marks (a UTC midnight).
    pub time: DateTime<Utc>,
    /// Horizontal pixel position from the scale.
    pub position: f64,
    /// Label text: `"08"` for days, `"W02"` for weeks, `"Jan 2023"`
    /// for months.
    pub label: String,
    /// Whether this tick starts a month (always true for month ticks).
    pub major: bool,
}

/// Generate ticks across the scale's domain.
///
/// The walk starts at the first boundary at or after the domain start
/// and stops at the domain end, so a window that begins mid-month gets
/// no tick before its left edge.
pub fn ticks(scale: &TimeScale, unit: TickUnit) -> Vec<Tick> {
    let domain = scale.domain();
    let end = domain.end();
    let mut out = Vec::new();

    let Some(mut day) = first_boundary(domain.start(), unit) else {
        return out;
    };

    loop {
        let time = midnight(day);
        if time > end {
            break;
        }
        let (label, major) = match unit {
            TickUnit::Days => (format!("{:02}", day.day()), day.day() == 1),
            TickUnit::Weeks => (day.format("W%V").to_string(), day.day() <= 7),
            TickUnit::Months => (day.format("%b %Y").to_string(), true),
        };
        out.push(Tick {
            time,
            position: scale.position(time),
            label,
            major,
        });

        day = match step(day, unit) {
            Some(next) => next,
            None => break,
        };
    }

    out
}

/// First tick boundary at or after `start`. `None` only at the far edge
/// of the representable calendar.
fn first_boundary(start: DateTime<Utc>, unit: TickUnit) -> Option<NaiveDate> {
    let date = start.date_naive();
    let first_day = if midnight(date) == start {
        date
    } else {
        date.succ_opt()?
    };
    match unit {
        TickUnit::Days => Some(first_day),
        TickUnit::Weeks => {
            let offset = (7 - first_day.weekday().num_days_from_monday()) % 7;
            first_day.checked_add_days(Days::new(u64::from(offset)))
        }
        TickUnit::Months => {
            if first_day.day() == 1 {
                Some(first_day)
            } else {
                next_month_start(first_day)
            }
        }
    }
}

fn step(day: NaiveDate, unit: TickUnit) -> Option<NaiveDate> {
    match unit {
        TickUnit::Days => day.succ_opt(),
        TickUnit::Weeks => day.checked_add_days(Days::new(7)),
        TickUnit::Months => next_month_start(day),
    }
}

fn next_month_start(day: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}
