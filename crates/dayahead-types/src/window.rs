//! Query window normalization.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use std::str::FromStr;

use crate::DayaheadError;

/// Naive formats accepted when parsing a bound from text, most specific first.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A caller-supplied start or end instant.
///
/// Zoned values are converted to UTC; naive values are assumed to already be UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowBound {
    /// An instant carrying an explicit offset.
    Zoned(DateTime<FixedOffset>),
    /// A zone-less instant, taken as UTC.
    Naive(NaiveDateTime),
}

impl WindowBound {
    /// Returns the bound as a UTC instant.
    #[must_use]
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            Self::Zoned(dt) => dt.with_timezone(&Utc),
            Self::Naive(naive) => naive.and_utc(),
        }
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for WindowBound {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::Zoned(dt.fixed_offset())
    }
}

impl From<NaiveDateTime> for WindowBound {
    fn from(naive: NaiveDateTime) -> Self {
        Self::Naive(naive)
    }
}

impl From<NaiveDate> for WindowBound {
    fn from(date: NaiveDate) -> Self {
        Self::Naive(date.and_time(NaiveTime::MIN))
    }
}

impl FromStr for WindowBound {
    type Err = DayaheadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Zoned(dt));
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self::Naive(naive));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self::from)
            .map_err(|_| DayaheadError::InvalidBound(s.to_string()))
    }
}

/// A UTC-anchored query window.
///
/// `end > start` is expected but not enforced: an inverted window supplied by the
/// caller is kept as is and handed to the remote API unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryWindow {
    /// Start instant (UTC).
    pub start: DateTime<Utc>,
    /// End instant (UTC).
    pub end: DateTime<Utc>,
}

impl QueryWindow {
    /// Length of the window when no end is given.
    pub const DEFAULT_SPAN_DAYS: i64 = 1;

    /// Creates a window from two UTC instants without validation.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Resolves optional bounds into a concrete window using the current time.
    ///
    /// A missing start defaults to now, a missing end to one day after start.
    #[must_use]
    pub fn normalize(start: Option<WindowBound>, end: Option<WindowBound>) -> Self {
        Self::normalize_at(start, end, Utc::now())
    }

    /// Resolves optional bounds into a concrete window, with `now` as the clock.
    #[must_use]
    pub fn normalize_at(
        start: Option<WindowBound>,
        end: Option<WindowBound>,
        now: DateTime<Utc>,
    ) -> Self {
        let start = start.map_or(now, |bound| bound.to_utc());
        let end = end.map_or_else(
            || start + TimeDelta::days(Self::DEFAULT_SPAN_DAYS),
            |bound| bound.to_utc(),
        );
        Self { start, end }
    }

    /// Returns the window length. Negative for an inverted window.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns true if end does not lie after start.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.end <= self.start
    }

    /// Returns true if the instant lies in `[start, end)`.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts < self.end
    }
}

impl std::fmt::Display for QueryWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%dT%H:%MZ"),
            self.end.format("%Y-%m-%dT%H:%MZ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_defaults_span_one_day() {
        let window = QueryWindow::normalize(None, None);
        assert_eq!(window.duration(), TimeDelta::days(1));
        assert_eq!(window.start.timezone(), Utc);
        assert!(!window.is_inverted());
    }

    #[test]
    fn test_default_start_is_now() {
        let now = utc(2024, 3, 10, 14, 37);
        let window = QueryWindow::normalize_at(None, None, now);
        assert_eq!(window.start, now);
        assert_eq!(window.end, utc(2024, 3, 11, 14, 37));
    }

    #[test]
    fn test_offset_start_converted_to_utc() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let start = offset.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let window = QueryWindow::normalize(Some(start.into()), None);

        assert_eq!(window.start, utc(2024, 6, 1, 10, 0));
        assert_eq!(window.end, utc(2024, 6, 2, 10, 0));
    }

    #[test]
    fn test_naive_start_unchanged() {
        let naive = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let window = QueryWindow::normalize(Some(naive.into()), None);
        assert_eq!(window.start, utc(2024, 6, 1, 12, 0));
    }

    #[test]
    fn test_end_offset_converted() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let end = offset.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
        let window =
            QueryWindow::normalize(Some(utc(2024, 6, 1, 0, 0).into()), Some(end.into()));
        assert_eq!(window.end, utc(2024, 6, 3, 5, 0));
    }

    #[test]
    fn test_inverted_window_passed_through() {
        let start = utc(2024, 6, 5, 0, 0);
        let end = utc(2024, 6, 1, 0, 0);
        let window = QueryWindow::normalize(Some(start.into()), Some(end.into()));

        assert_eq!(window.start, start);
        assert_eq!(window.end, end);
        assert!(window.is_inverted());
    }

    #[test]
    fn test_contains_half_open() {
        let window = QueryWindow::new(utc(2024, 1, 1, 0, 0), utc(2024, 1, 2, 0, 0));
        assert!(window.contains(utc(2024, 1, 1, 0, 0)));
        assert!(window.contains(utc(2024, 1, 1, 23, 0)));
        assert!(!window.contains(utc(2024, 1, 2, 0, 0)));
        assert!(!window.contains(utc(2023, 12, 31, 23, 0)));
    }

    #[test]
    fn test_bound_from_str() {
        let zoned: WindowBound = "2024-06-01T12:00:00+02:00".parse().unwrap();
        assert_eq!(zoned.to_utc(), utc(2024, 6, 1, 10, 0));

        let naive: WindowBound = "2024-06-01T12:30".parse().unwrap();
        assert_eq!(naive.to_utc(), utc(2024, 6, 1, 12, 30));

        let date: WindowBound = "2024-06-01".parse().unwrap();
        assert_eq!(date.to_utc(), utc(2024, 6, 1, 0, 0));

        assert!(matches!(
            "yesterday".parse::<WindowBound>(),
            Err(DayaheadError::InvalidBound(_))
        ));
    }

    #[test]
    fn test_display() {
        let window = QueryWindow::new(utc(2024, 1, 1, 23, 0), utc(2024, 1, 2, 23, 0));
        assert_eq!(window.to_string(), "2024-01-01T23:00Z to 2024-01-02T23:00Z");
    }
}
