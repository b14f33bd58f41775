//! Conversions between TimeTree's epoch-millisecond timestamps and chrono.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Interpret a millisecond epoch value as an instant in `tz`.
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn timestamp_to_datetime(millis: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    timestamp_to_utc(millis).map(|dt| dt.with_timezone(tz))
}

/// Interpret a millisecond epoch value as a UTC instant.
pub fn timestamp_to_utc(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// Inverse of [`timestamp_to_datetime`].
pub fn datetime_to_timestamp<T: chrono::TimeZone>(dt: &DateTime<T>) -> i64 {
    dt.timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_round_trip_is_zone_independent() {
        let millis = 1_686_819_600_123;
        for tz in [Tz::UTC, Tz::Asia__Tokyo, Tz::America__New_York, Tz::Asia__Kolkata] {
            let dt = timestamp_to_datetime(millis, &tz).unwrap();
            assert_eq!(dt.timezone(), tz);
            assert_eq!(datetime_to_timestamp(&dt), millis);
        }
    }

    #[test]
    fn test_seconds_round_trip() {
        let millis = 1_686_819_600_000;
        let dt = timestamp_to_datetime(millis, &Tz::Europe__Berlin).unwrap();
        assert_eq!(dt.timestamp() * 1000, millis);
    }

    #[test]
    fn test_wall_clock_follows_zone() {
        let expected = Tz::Asia__Tokyo.with_ymd_and_hms(2023, 6, 15, 18, 0, 0).unwrap();
        let dt = timestamp_to_datetime(expected.timestamp_millis(), &Tz::Asia__Tokyo).unwrap();
        assert_eq!(dt, expected);
        assert_eq!(dt.hour(), 18);
    }

    #[test]
    fn test_out_of_range_is_none() {
        assert_eq!(timestamp_to_utc(i64::MAX), None);
    }
}
