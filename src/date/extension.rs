//! Intervals between dates and human readable durations

use chrono::NaiveDateTime;
use std::time::Duration;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Render a duration as `"1d 2h 3m 4s"`, leaving out zero units.
///
/// Durations under a second render as milliseconds, zero as `"0s"`.
///
/// ```rust
/// use std::time::Duration;
/// use feilong_core::date::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(93_784)), "1d 2h 3m 4s");
/// assert_eq!(format_duration(Duration::from_secs(3_600)), "1h");
/// assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
/// assert_eq!(format_duration(Duration::ZERO), "0s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    if total == 0 {
        let millis = duration.subsec_millis();
        return if millis > 0 {
            format!("{}ms", millis)
        } else {
            "0s".to_string()
        };
    }

    let units = [
        (total / SECONDS_PER_DAY, "d"),
        (total % SECONDS_PER_DAY / SECONDS_PER_HOUR, "h"),
        (total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE, "m"),
        (total % SECONDS_PER_MINUTE, "s"),
    ];
    units
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Absolute time between two dates
pub fn get_interval(a: &NaiveDateTime, b: &NaiveDateTime) -> Duration {
    (*b - *a).abs().to_std().unwrap_or(Duration::ZERO)
}

/// Whole days between two dates, ignoring order
pub fn get_interval_day(a: &NaiveDateTime, b: &NaiveDateTime) -> i64 {
    (*b - *a).num_days().abs()
}

/// Whole hours between two dates, ignoring order
pub fn get_interval_hour(a: &NaiveDateTime, b: &NaiveDateTime) -> i64 {
    (*b - *a).num_hours().abs()
}

/// Whole seconds between two dates, ignoring order
pub fn get_interval_second(a: &NaiveDateTime, b: &NaiveDateTime) -> i64 {
    (*b - *a).num_seconds().abs()
}

/// [`format_duration`] of the time between two dates
pub fn get_interval_for_view(begin: &NaiveDateTime, end: &NaiveDateTime) -> String {
    format_duration(get_interval(begin, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(59)), "59s");
        assert_eq!(format_duration(Duration::from_secs(61)), "1m 1s");
        assert_eq!(format_duration(Duration::from_secs(86_400 * 3 + 5)), "3d 5s");
        assert_eq!(format_duration(Duration::from_millis(1_999)), "1s");
    }

    #[test]
    fn test_intervals_ignore_order() {
        let a = at(1, 0, 0, 0);
        let b = at(3, 12, 30, 15);

        assert_eq!(get_interval_day(&a, &b), 2);
        assert_eq!(get_interval_day(&b, &a), 2);
        assert_eq!(get_interval_hour(&a, &b), 60);
        assert_eq!(get_interval_second(&a, &a), 0);
        assert_eq!(get_interval_for_view(&b, &a), "2d 12h 30m 15s");
        assert_eq!(get_interval_for_view(&a, &a), "0s");
    }
}
