//! Time source for timestamps, default dates and photo ids.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::constants::DATE_FORMAT;

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Today's UTC date as `YYYY-MM-DD`.
    fn today(&self) -> String {
        self.now().format(DATE_FORMAT).to_string()
    }

    /// RFC 3339 UTC timestamp with millisecond precision.
    fn timestamp(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Milliseconds since the Unix epoch.
    fn millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_formats() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 2, 29, 13, 5, 9).unwrap());
        assert_eq!(clock.today(), "2024-02-29");
        assert_eq!(clock.timestamp(), "2024-02-29T13:05:09.000Z");
        assert_eq!(clock.millis(), 1_709_211_909_000);
    }
}
