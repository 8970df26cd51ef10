//! Reference timestamp captured once per query invocation.

use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};

use crate::types::record::RECORD_TIMESTAMP_FORMAT;

/// Wall-clock source. Injected so the pipeline can run against a fixed time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Minute-truncated UTC instant shared by every row of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReferenceTimestamp(NaiveDateTime);

impl ReferenceTimestamp {
    /// Truncate `instant` to the start of its minute.
    pub fn truncate(instant: DateTime<Utc>) -> Self {
        let naive = instant.naive_utc();
        let minute = naive
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(naive);
        Self(minute)
    }

    /// Read the clock once and truncate.
    pub fn capture(clock: &dyn Clock) -> Self {
        Self::truncate(clock.now())
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Absolute time `minutes` before the reference.
    pub fn minus_minutes(&self, minutes: u32) -> NaiveDateTime {
        self.0 - Duration::minutes(i64::from(minutes))
    }

    pub fn format(&self) -> String {
        format_record_time(self.0)
    }
}

pub fn format_record_time(time: NaiveDateTime) -> String {
    time.format(RECORD_TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_truncates_seconds_and_subseconds() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 10, 42).unwrap()
            + Duration::milliseconds(987);
        let reference = ReferenceTimestamp::truncate(instant);
        assert_eq!(reference.format(), "2024-01-01 00:10:00");
        assert_eq!(reference.as_naive().second(), 0);
        assert_eq!(reference.as_naive().nanosecond(), 0);
    }

    #[test]
    fn test_minus_minutes_crosses_day_boundary() {
        let reference =
            ReferenceTimestamp::truncate(Utc.with_ymd_and_hms(2024, 3, 1, 0, 3, 0).unwrap());
        assert_eq!(
            format_record_time(reference.minus_minutes(5)),
            "2024-02-29 23:58:00"
        );
        assert_eq!(format_record_time(reference.minus_minutes(0)), "2024-03-01 00:03:00");
    }

    #[test]
    fn test_fixed_clock_capture() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 10, 59).unwrap());
        assert_eq!(ReferenceTimestamp::capture(&clock).format(), "2024-01-01 00:10:00");
    }
}
