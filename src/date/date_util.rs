//! Formatting, parsing and arithmetic on [`NaiveDateTime`]

use crate::core::{FeilongError, Result};
use crate::date::pattern::to_strftime;
use crate::lang::validate;
use chrono::format::{parse, ParseResult, Parsed, StrftimeItems};
use chrono::{
    Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike,
};
use std::fmt::Write as _;

/// Current local date and time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Format `date` with a date pattern such as `"yyyy-MM-dd HH:mm:ss"`
///
/// ```rust
/// use chrono::NaiveDate;
/// use feilong_core::date::{self, DatePattern};
///
/// let dt = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap().and_hms_opt(8, 5, 0).unwrap();
/// assert_eq!(date::to_string(&dt, DatePattern::COMMON_DATE_AND_TIME).unwrap(), "2024-02-09 08:05:00");
/// ```
pub fn to_string(date: &NaiveDateTime, pattern: &str) -> Result<String> {
    let format = to_strftime(pattern)?;
    let mut out = String::new();
    write!(out, "{}", date.format(&format)).map_err(|_| {
        FeilongError::invalid_argument(
            "pattern",
            format!("\"{}\" can't format a date without an offset", pattern),
        )
    })?;
    Ok(out)
}

/// Parse `value` with the first of `patterns` that matches.
///
/// Fields a pattern leaves out take defaults: year 1970, January, the 1st,
/// midnight. `"HH:mm"` therefore parses `"13:45"` as `1970-01-01 13:45:00`.
///
/// # Errors
///
/// `DateParse` listing every pattern tried when none matches.
pub fn to_date<S: AsRef<str>>(value: &str, patterns: &[S]) -> Result<NaiveDateTime> {
    validate::not_blank("value", value)?;
    validate::not_empty("patterns", patterns)?;

    let value = value.trim();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let format = to_strftime(pattern)?;
        match parse_with_defaults(value, &format) {
            Ok(date) => return Ok(date),
            Err(e) => log::trace!("'{}' does not match '{}': {}", value, pattern, e),
        }
    }
    Err(FeilongError::date_parse(value, patterns))
}

fn parse_with_defaults(value: &str, format: &str) -> ParseResult<NaiveDateTime> {
    let mut parsed = Parsed::new();
    parse(&mut parsed, value, StrftimeItems::new(format))?;

    if parsed.year().is_none()
        && parsed.year_div_100().is_none()
        && parsed.year_mod_100().is_none()
        && parsed.isoyear().is_none()
    {
        parsed.set_year(1970)?;
    }
    // a day of year already pins month and day
    if parsed.ordinal().is_none() {
        if parsed.month().is_none() {
            parsed.set_month(1)?;
        }
        if parsed.day().is_none() {
            parsed.set_day(1)?;
        }
    }
    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, None) => parsed.set_hour(0)?,
        // 12-hour clock without an AM/PM marker reads as AM
        (None, Some(_)) => parsed.set_ampm(false)?,
        _ => {}
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    if parsed.second().is_none() {
        parsed.set_second(0)?;
    }
    parsed.to_naive_datetime_with_offset(0)
}

fn out_of_range(what: &str) -> FeilongError {
    FeilongError::invalid_argument(what, "result is out of the supported date range")
}

/// Add (or with a negative count subtract) years; Feb 29 becomes Feb 28 when needed
pub fn add_years(date: &NaiveDateTime, years: i32) -> Result<NaiveDateTime> {
    let months = years
        .checked_mul(12)
        .ok_or_else(|| out_of_range("years"))?;
    add_months(date, months)
}

/// Add months, clamping the day to the end of the target month
pub fn add_months(date: &NaiveDateTime, months: i32) -> Result<NaiveDateTime> {
    let delta = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    };
    shifted.ok_or_else(|| out_of_range("months"))
}

/// Add days
pub fn add_days(date: &NaiveDateTime, days: i64) -> Result<NaiveDateTime> {
    let delta = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(delta)
    } else {
        date.checked_sub_days(delta)
    };
    shifted.ok_or_else(|| out_of_range("days"))
}

fn add_delta(date: &NaiveDateTime, delta: Option<TimeDelta>, what: &str) -> Result<NaiveDateTime> {
    delta
        .and_then(|d| date.checked_add_signed(d))
        .ok_or_else(|| out_of_range(what))
}

/// Add hours
pub fn add_hours(date: &NaiveDateTime, hours: i64) -> Result<NaiveDateTime> {
    add_delta(date, TimeDelta::try_hours(hours), "hours")
}

/// Add minutes
pub fn add_minutes(date: &NaiveDateTime, minutes: i64) -> Result<NaiveDateTime> {
    add_delta(date, TimeDelta::try_minutes(minutes), "minutes")
}

/// Add seconds
pub fn add_seconds(date: &NaiveDateTime, seconds: i64) -> Result<NaiveDateTime> {
    add_delta(date, TimeDelta::try_seconds(seconds), "seconds")
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // 23:59:59.999 is always a valid time
    date.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN))
}

/// `00:00:00.000` of the same day
pub fn first_date_of_day(date: &NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

/// `23:59:59.999` of the same day
pub fn last_date_of_day(date: &NaiveDateTime) -> NaiveDateTime {
    end_of_day(date.date())
}

/// Start of the Monday of the same ISO week.
///
/// In the first week of the supported range this is [`NaiveDate::MIN`].
pub fn first_date_of_week(date: &NaiveDateTime) -> NaiveDateTime {
    let offset = Days::new(u64::from(date.weekday().num_days_from_monday()));
    let monday = date.date().checked_sub_days(offset).unwrap_or(NaiveDate::MIN);
    monday.and_time(NaiveTime::MIN)
}

/// End of the Sunday of the same ISO week.
///
/// In the last week of the supported range this is [`NaiveDate::MAX`].
pub fn last_date_of_week(date: &NaiveDateTime) -> NaiveDateTime {
    let offset = Days::new(u64::from(6 - date.weekday().num_days_from_monday()));
    end_of_day(date.date().checked_add_days(offset).unwrap_or(NaiveDate::MAX))
}

/// Start of the first day of the month
pub fn first_date_of_month(date: &NaiveDateTime) -> NaiveDateTime {
    let first = date.date().with_day(1).unwrap_or(date.date());
    first.and_time(NaiveTime::MIN)
}

/// End of the last day of the month
pub fn last_date_of_month(date: &NaiveDateTime) -> NaiveDateTime {
    let first = date.date().with_day(1).unwrap_or(date.date());
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);
    end_of_day(last)
}

/// Start of January 1st
pub fn first_date_of_year(date: &NaiveDateTime) -> NaiveDateTime {
    let first = date.date().with_ordinal(1).unwrap_or(date.date());
    first.and_time(NaiveTime::MIN)
}

/// End of December 31st
pub fn last_date_of_year(date: &NaiveDateTime) -> NaiveDateTime {
    let last = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date.date());
    end_of_day(last)
}

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Whether `date` lies strictly between `begin` and `end`
pub fn is_in_time(date: &NaiveDateTime, begin: &NaiveDateTime, end: &NaiveDateTime) -> bool {
    begin < date && date < end
}

/// Whether `date` is strictly before `when`
pub fn is_before(date: &NaiveDateTime, when: &NaiveDateTime) -> bool {
    date < when
}

/// Whether two values fall on the same calendar day
pub fn is_same_day(a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Hour of day, 0-23
pub fn get_hour_of_day(date: &NaiveDateTime) -> u32 {
    date.hour()
}
