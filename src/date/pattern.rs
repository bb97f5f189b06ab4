//! Date patterns and their translation to `chrono` format strings.
//!
//! Patterns use the letters most date libraries share:
//!
//! | letters | meaning              | chrono |
//! |---------|----------------------|--------|
//! | `yyyy`  | year                 | `%Y`   |
//! | `yy`    | two digit year       | `%y`   |
//! | `MM`/`M`| month                | `%m`/`%-m` |
//! | `MMM`/`MMMM` | month name      | `%b`/`%B` |
//! | `dd`/`d`| day of month         | `%d`/`%-d` |
//! | `HH`/`H`| hour 0-23            | `%H`/`%-H` |
//! | `hh`/`h`| hour 1-12            | `%I`/`%-I` |
//! | `mm`/`m`| minute               | `%M`/`%-M` |
//! | `ss`/`s`| second               | `%S`/`%-S` |
//! | `SSS`   | millisecond          | `%3f`  |
//! | `a`     | AM/PM                | `%p`   |
//! | `EEE`/`EEEE` | weekday name    | `%a`/`%A` |
//! | `D`     | day of year          | `%j`   |
//!
//! Text in single quotes is literal, `''` is a quote.

use crate::core::{FeilongError, Result};
use crate::lang::validate;
use chrono::format::{Item, StrftimeItems};

/// Common patterns
pub struct DatePattern;

impl DatePattern {
    /// `2024-01-31`
    pub const COMMON_DATE: &'static str = "yyyy-MM-dd";
    /// `2024-01-31 13:45:00`
    pub const COMMON_DATE_AND_TIME: &'static str = "yyyy-MM-dd HH:mm:ss";
    /// `2024-01-31 13:45:00.123`
    pub const COMMON_DATE_AND_TIME_WITH_MILLISECOND: &'static str = "yyyy-MM-dd HH:mm:ss.SSS";
    /// `2024-01-31 13:45`
    pub const COMMON_DATE_AND_TIME_WITHOUT_SECOND: &'static str = "yyyy-MM-dd HH:mm";
    /// `13:45`
    pub const COMMON_TIME: &'static str = "HH:mm";
    /// `13:45:00`
    pub const COMMON_TIME_WITH_SECOND: &'static str = "HH:mm:ss";
    /// `2024-01`
    pub const YEAR_AND_MONTH: &'static str = "yyyy-MM";
    /// `01-31`
    pub const MONTH_AND_DAY: &'static str = "MM-dd";
    /// `20240131134500`
    pub const TIMESTAMP: &'static str = "yyyyMMddHHmmss";
    /// `20240131134500123`
    pub const TIMESTAMP_WITH_MILLISECOND: &'static str = "yyyyMMddHHmmssSSS";
    /// `20240131`
    pub const YYYYMMDD: &'static str = "yyyyMMdd";
}

fn token(letter: char, count: usize) -> Option<&'static str> {
    let directive = match (letter, count) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('d', 1) => "%-d",
        ('d', _) => "%d",
        ('H', 1) => "%-H",
        ('H', _) => "%H",
        ('h', 1) => "%-I",
        ('h', _) => "%I",
        ('m', 1) => "%-M",
        ('m', _) => "%M",
        ('s', 1) => "%-S",
        ('s', _) => "%S",
        ('S', 1..=3) => "%3f",
        ('S', 4..=6) => "%6f",
        ('S', _) => "%9f",
        ('a', _) => "%p",
        ('E', 1..=3) => "%a",
        ('E', _) => "%A",
        ('D', _) => "%j",
        _ => return None,
    };
    Some(directive)
}

/// Translate a date pattern into a `chrono` format string.
///
/// ```rust
/// use feilong_core::date::to_strftime;
///
/// assert_eq!(to_strftime("yyyy-MM-dd HH:mm:ss").unwrap(), "%Y-%m-%d %H:%M:%S");
/// assert_eq!(to_strftime("'at' h a").unwrap(), "at %-I %p");
/// ```
///
/// # Errors
///
/// `InvalidArgument` for a blank pattern, an unterminated quote or an
/// unsupported unquoted letter.
pub fn to_strftime(pattern: &str) -> Result<String> {
    validate::not_blank("pattern", pattern)?;

    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut in_quote = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
            } else {
                in_quote = !in_quote;
                i += 1;
            }
            continue;
        }
        if c == '%' {
            out.push_str("%%");
            i += 1;
            continue;
        }
        if in_quote || !c.is_ascii_alphabetic() {
            out.push(c);
            i += 1;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        let directive = token(c, run).ok_or_else(|| {
            FeilongError::invalid_argument(
                "pattern",
                format!("unsupported letter '{}' in \"{}\"", c, pattern),
            )
        })?;
        out.push_str(directive);
        i += run;
    }

    if in_quote {
        return Err(FeilongError::invalid_argument(
            "pattern",
            format!("unterminated quote in \"{}\"", pattern),
        ));
    }
    if StrftimeItems::new(&out).any(|item| matches!(item, Item::Error)) {
        return Err(FeilongError::invalid_argument(
            "pattern",
            format!("\"{}\" translates to invalid format \"{}\"", pattern, out),
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_patterns() {
        assert_eq!(to_strftime(DatePattern::COMMON_DATE).unwrap(), "%Y-%m-%d");
        assert_eq!(
            to_strftime(DatePattern::COMMON_DATE_AND_TIME_WITH_MILLISECOND).unwrap(),
            "%Y-%m-%d %H:%M:%S.%3f"
        );
        assert_eq!(to_strftime(DatePattern::TIMESTAMP).unwrap(), "%Y%m%d%H%M%S");
        assert_eq!(to_strftime("yy/M/d").unwrap(), "%y/%-m/%-d");
        assert_eq!(to_strftime("EEEE, MMMM d").unwrap(), "%A, %B %-d");
    }

    #[test]
    fn test_quotes_and_percent() {
        assert_eq!(to_strftime("yyyy'年'MM'月'").unwrap(), "%Y年%m月");
        assert_eq!(to_strftime("HH 'o''clock'").unwrap(), "%H o'clock");
        assert_eq!(to_strftime("dd%").unwrap(), "%d%%");
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(to_strftime("").is_err());
        assert!(to_strftime("yyyy-QQ").is_err());
        assert!(to_strftime("yyyy 'open").is_err());
        // NaiveDateTime carries no offset
        assert!(to_strftime("yyyy-MM-dd HH:mm Z").is_err());
    }
}
