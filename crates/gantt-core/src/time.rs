#![forbid(unsafe_code)]

//! Validated time intervals.
//!
//! [`TimeRange`] is the visible window of a timeline: a closed interval
//! over [`DateTime<Utc>`] whose end lies at least one millisecond after
//! its start. The invariant is enforced at every construction site,
//! including deserialization, so downstream scale math never has to
//! re-check for an empty domain.

use crate::error::GeometryError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Milliseconds per day.
pub const DAY_MS: i64 = 86_400_000;

/// A non-empty time interval (`end > start`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a range, rejecting any span below one millisecond.
    ///
    /// The interval is measured at millisecond resolution, so an end
    /// that trails the start by mere nanoseconds still counts as empty.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, GeometryError> {
        if end.timestamp_millis() <= start.timestamp_millis() {
            return Err(GeometryError::EmptyRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Start of the interval.
    #[inline]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the interval.
    #[inline]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Width in milliseconds. Always at least 1.
    #[inline]
    pub fn span_millis(&self) -> i64 {
        self.end.timestamp_millis() - self.start.timestamp_millis()
    }

    /// Width in (fractional) days.
    pub fn span_days(&self) -> f64 {
        self.span_millis() as f64 / DAY_MS as f64
    }

    /// Center of the interval, rounded down to whole milliseconds.
    pub fn midpoint(&self) -> DateTime<Utc> {
        // The midpoint lies inside the range, so the add cannot leave
        // the representable timestamp range.
        self.start + TimeDelta::milliseconds(self.span_millis() / 2)
    }

    /// Whether `t` lies within the closed interval.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }

    /// Shift both endpoints by the same number of milliseconds.
    ///
    /// The width is preserved exactly; shifting by `d` then `-d`
    /// restores the original range bit for bit.
    pub fn shifted_millis(&self, delta_ms: i64) -> Result<Self, GeometryError> {
        let delta = TimeDelta::milliseconds(delta_ms);
        let start = self
            .start
            .checked_add_signed(delta)
            .ok_or(GeometryError::TimestampOutOfRange)?;
        let end = self
            .end
            .checked_add_signed(delta)
            .ok_or(GeometryError::TimestampOutOfRange)?;
        Ok(Self { start, end })
    }

    /// Shrink (`factor > 1`) or grow (`factor < 1`) the interval about
    /// its midpoint: the new width is `span / factor`, rounded to whole
    /// milliseconds and floored at 1 ms.
    ///
    /// The midpoint moves by at most 1 ms (integer halving of an odd
    /// width).
    pub fn rescaled_about_midpoint(&self, factor: f64) -> Result<Self, GeometryError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(GeometryError::InvalidScaleFactor { factor });
        }
        let span = self.span_millis();
        let scaled = (span as f64 / factor).round();
        if !scaled.is_finite() || scaled > i64::MAX as f64 {
            return Err(GeometryError::TimestampOutOfRange);
        }
        let new_span = (scaled as i64).max(1);
        let mid_ms = self.start.timestamp_millis() + span / 2;
        let start_ms = mid_ms - new_span / 2;
        let start = datetime_from_millis(start_ms)?;
        let end = datetime_from_millis(start_ms + new_span)?;
        Ok(Self { start, end })
    }
}

impl Default for TimeRange {
    /// The first day of the Unix epoch.
    fn default() -> Self {
        // Epoch plus one day is far inside the representable range, so
        // the add cannot panic and the range is trivially non-empty.
        Self {
            start: DateTime::UNIX_EPOCH,
            end: DateTime::UNIX_EPOCH + TimeDelta::milliseconds(DAY_MS),
        }
    }
}

impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        }
        let raw = Raw::deserialize(deserializer)?;
        TimeRange::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

fn datetime_from_millis(ms: i64) -> Result<DateTime<Utc>, GeometryError> {
    DateTime::from_timestamp_millis(ms).ok_or(GeometryError::TimestampOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::{DAY_MS, TimeRange};
    use crate::error::GeometryError;
    use chrono::{DateTime, TimeZone, Utc};

    fn date(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, 0, 0, 0).unwrap()
    }

    fn january() -> TimeRange {
        TimeRange::new(date(2023, 1, 1), date(2023, 2, 1)).unwrap()
    }

    // --- construction ---

    #[test]
    fn rejects_empty_and_inverted_ranges() {
        let t = date(2023, 1, 1);
        assert!(matches!(
            TimeRange::new(t, t),
            Err(GeometryError::EmptyRange { .. })
        ));
        assert!(matches!(
            TimeRange::new(date(2023, 1, 2), t),
            Err(GeometryError::EmptyRange { .. })
        ));
    }

    #[test]
    fn rejects_sub_millisecond_ranges() {
        let t = date(2023, 1, 1);
        assert!(matches!(
            TimeRange::new(t, t + chrono::TimeDelta::nanoseconds(400_000)),
            Err(GeometryError::EmptyRange { .. })
        ));
    }

    #[test]
    fn january_spans_31_days() {
        assert_eq!(january().span_millis(), 31 * DAY_MS);
        assert_eq!(january().span_days(), 31.0);
    }

    #[test]
    fn default_range_is_the_epoch_day() {
        let r = TimeRange::default();
        assert_eq!(r.start(), DateTime::UNIX_EPOCH);
        assert_eq!(r.span_millis(), DAY_MS);
    }

    #[test]
    fn midpoint_of_january_is_noon_on_the_16th() {
        let mid = january().midpoint();
        assert_eq!(mid, Utc.with_ymd_and_hms(2023, 1, 16, 12, 0, 0).unwrap());
    }

    // --- shifting ---

    #[test]
    fn shift_preserves_span_and_round_trips() {
        let r = january();
        let delta = 3 * DAY_MS + 7_500;
        let shifted = r.shifted_millis(delta).unwrap();
        assert_eq!(shifted.span_millis(), r.span_millis());
        assert_eq!(shifted.shifted_millis(-delta).unwrap(), r);
    }

    #[test]
    fn shift_beyond_representable_time_fails() {
        let r = january();
        assert_eq!(
            r.shifted_millis(i64::MAX),
            Err(GeometryError::TimestampOutOfRange)
        );
    }

    // --- rescaling ---

    #[test]
    fn halving_january_keeps_the_midpoint() {
        let r = january().rescaled_about_midpoint(2.0).unwrap();
        assert_eq!(
            r.start(),
            Utc.with_ymd_and_hms(2023, 1, 8, 18, 0, 0).unwrap()
        );
        assert_eq!(r.end(), Utc.with_ymd_and_hms(2023, 1, 24, 6, 0, 0).unwrap());
        assert_eq!(r.midpoint(), january().midpoint());
    }

    #[test]
    fn rescale_below_one_grows_the_range() {
        let r = january().rescaled_about_midpoint(0.5).unwrap();
        assert_eq!(r.span_millis(), 62 * DAY_MS);
        assert_eq!(r.midpoint(), january().midpoint());
    }

    #[test]
    fn rescale_never_collapses_below_one_millisecond() {
        let narrow = TimeRange::new(
            date(2023, 1, 1),
            date(2023, 1, 1) + chrono::TimeDelta::milliseconds(1),
        )
        .unwrap();
        let r = narrow.rescaled_about_midpoint(1_000.0).unwrap();
        assert_eq!(r.span_millis(), 1);
    }

    #[test]
    fn rescale_rejects_bad_factors() {
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                january().rescaled_about_midpoint(factor),
                Err(GeometryError::InvalidScaleFactor { .. })
            ));
        }
    }

    // --- serde ---

    #[test]
    fn serde_round_trips() {
        let r = january();
        let json = serde_json::to_string(&r).unwrap();
        let back: TimeRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn deserialize_rejects_inverted_range() {
        let json = r#"{"start":"2023-02-01T00:00:00Z","end":"2023-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<TimeRange>(json).is_err());
    }
}
