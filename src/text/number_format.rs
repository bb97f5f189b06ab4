//! Pattern based number formatting.
//!
//! Patterns follow the familiar decimal-format notation:
//!
//! | char | meaning                                   |
//! |------|-------------------------------------------|
//! | `0`  | digit, shown as `0` when absent           |
//! | `#`  | digit, omitted when absent                |
//! | `.`  | decimal separator                         |
//! | `,`  | grouping separator, size taken from the last group |
//! | `%`  | multiply by 100 and show as percent       |
//! | `‰`  | multiply by 1000 and show as per mille    |
//! | `'`  | quotes literal text, `''` is a single quote |
//!
//! Anything before or after the digit characters is a literal prefix or suffix.
//! Only the positive sub-pattern is used; text after an unquoted `;` is ignored.
//!
//! Rounding works on the shortest decimal representation of the `f64`, so
//! `format(0.125, "0.00")` rounds the decimal `0.125` rather than its binary
//! approximation.

use crate::core::{FeilongError, Result};
use crate::lang::validate;
use serde::{Deserialize, Serialize};

/// Common patterns
pub struct NumberPattern;

impl NumberPattern {
    /// Integer, no fraction digits
    pub const NO_SCALE: &'static str = "#";
    /// Two fraction digits, at least one integer digit
    pub const TWO_DECIMAL_POINTS: &'static str = "#0.00";
    /// Whole percent
    pub const PERCENT_WITH_NOPOINT: &'static str = "##%";
    /// Percent with one fraction digit
    pub const PERCENT_WITH_1POINT: &'static str = "#0.0%";
    /// Percent with two fraction digits
    pub const PERCENT_WITH_2POINT: &'static str = "#0.00%";
    /// Thousands separated integer
    pub const THOUSANDS: &'static str = "#,##0";
    /// Thousands separated, two fraction digits
    pub const MONEY: &'static str = "#,##0.00";
}

/// How discarded digits are rounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Away from zero
    Up,
    /// Towards zero
    Down,
    /// Towards positive infinity
    Ceiling,
    /// Towards negative infinity
    Floor,
    /// Nearest neighbour, ties away from zero
    #[default]
    HalfUp,
    /// Nearest neighbour, ties towards zero
    HalfDown,
    /// Nearest neighbour, ties to the even neighbour
    HalfEven,
}

#[derive(Debug, Default, PartialEq)]
struct ParsedPattern {
    prefix: String,
    suffix: String,
    min_int: usize,
    min_frac: usize,
    max_frac: usize,
    grouping: Option<usize>,
    shift: usize,
}

#[derive(PartialEq)]
enum Phase {
    Prefix,
    Number,
    Suffix,
}

fn is_number_char(c: char) -> bool {
    matches!(c, '#' | '0' | ',' | '.')
}

fn parse_pattern(pattern: &str) -> Result<ParsedPattern> {
    let mut parsed = ParsedPattern::default();
    let mut number = String::new();
    let mut phase = Phase::Prefix;
    let mut in_quote = false;
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        let affix = if phase == Phase::Prefix {
            &mut parsed.prefix
        } else {
            &mut parsed.suffix
        };

        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
                affix.push('\'');
            } else {
                in_quote = !in_quote;
            }
            if phase == Phase::Number {
                phase = Phase::Suffix;
            }
            continue;
        }
        if in_quote {
            affix.push(c);
            continue;
        }
        if c == ';' {
            break;
        }

        match phase {
            Phase::Prefix | Phase::Number if is_number_char(c) => {
                phase = Phase::Number;
                number.push(c);
            }
            Phase::Suffix if is_number_char(c) => {
                return Err(FeilongError::number_format(
                    pattern,
                    format!("unquoted '{}' after the number part", c),
                ));
            }
            _ => {
                if phase == Phase::Number {
                    phase = Phase::Suffix;
                }
                let affix = if phase == Phase::Prefix {
                    &mut parsed.prefix
                } else {
                    &mut parsed.suffix
                };
                match c {
                    '%' => parsed.shift = 2,
                    '‰' => parsed.shift = 3,
                    _ => {}
                }
                affix.push(c);
            }
        }
    }

    if in_quote {
        return Err(FeilongError::number_format(pattern, "unterminated quote"));
    }
    if number.is_empty() {
        return Err(FeilongError::number_format(pattern, "no digit characters"));
    }

    let (integer, fraction) = match number.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (number.as_str(), None),
    };

    parsed.min_int = integer.chars().filter(|&c| c == '0').count();
    if let Some(last_comma) = integer.rfind(',') {
        let size = integer.len() - last_comma - 1;
        if size > 0 {
            parsed.grouping = Some(size);
        }
    }

    if let Some(fraction) = fraction {
        if fraction.contains(|c: char| c == '.' || c == ',') {
            return Err(FeilongError::number_format(
                pattern,
                "separator inside the fraction part",
            ));
        }
        parsed.min_frac = fraction.chars().filter(|&c| c == '0').count();
        parsed.max_frac = fraction.len();
    }

    Ok(parsed)
}

/// Decimal digits of a non-negative number with `point` integer digits
struct Digits {
    digits: Vec<u8>,
    point: usize,
}

impl Digits {
    fn from_f64(value: f64) -> Self {
        // Display of f64 is the shortest round-trip representation and never
        // uses exponent notation.
        let repr = format!("{}", value.abs());
        let (integer, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
        let digits = integer
            .bytes()
            .chain(fraction.bytes())
            .map(|b| b - b'0')
            .collect();
        Digits {
            digits,
            point: integer.len(),
        }
    }

    fn shift_left(&mut self, places: usize) {
        self.point += places;
        if self.digits.len() < self.point {
            self.digits.resize(self.point, 0);
        }
    }

    fn round(&mut self, max_frac: usize, mode: RoundingMode, negative: bool) {
        let keep = self.point + max_frac;
        if self.digits.len() <= keep {
            return;
        }

        let first = self.digits[keep];
        let rest_nonzero = self.digits[keep + 1..].iter().any(|&d| d != 0);
        let any_nonzero = first != 0 || rest_nonzero;
        let last_kept_odd = keep > 0 && self.digits[keep - 1] % 2 == 1;

        let increment = match mode {
            RoundingMode::Down => false,
            RoundingMode::Up => any_nonzero,
            RoundingMode::Ceiling => !negative && any_nonzero,
            RoundingMode::Floor => negative && any_nonzero,
            RoundingMode::HalfUp => first >= 5,
            RoundingMode::HalfDown => first > 5 || (first == 5 && rest_nonzero),
            RoundingMode::HalfEven => {
                first > 5 || (first == 5 && (rest_nonzero || last_kept_odd))
            }
        };

        self.digits.truncate(keep);
        if increment {
            let mut i = keep;
            loop {
                if i == 0 {
                    self.digits.insert(0, 1);
                    self.point += 1;
                    break;
                }
                i -= 1;
                if self.digits[i] == 9 {
                    self.digits[i] = 0;
                } else {
                    self.digits[i] += 1;
                    break;
                }
            }
        }
    }

    fn is_zero(&self) -> bool {
        self.digits.iter().all(|&d| d == 0)
    }
}

fn group_digits(integer: &str, size: usize) -> String {
    let mut grouped = String::with_capacity(integer.len() + integer.len() / size);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % size == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Format `value` with `pattern`, rounding [`RoundingMode::HalfUp`].
///
/// ```rust
/// use feilong_core::text::number_format::format;
///
/// assert_eq!(format(25.5, "#####").unwrap(), "26");
/// assert_eq!(format(1234567.891, "#,##0.00").unwrap(), "1,234,567.89");
/// assert_eq!(format(0.24, "#%").unwrap(), "24%");
/// ```
pub fn format(value: f64, pattern: &str) -> Result<String> {
    format_with_rounding(value, pattern, RoundingMode::HalfUp)
}

/// Format `value` with `pattern` and an explicit rounding mode
pub fn format_with_rounding(value: f64, pattern: &str, mode: RoundingMode) -> Result<String> {
    validate::not_blank("pattern", pattern)?;
    if !value.is_finite() {
        return Err(FeilongError::number_format(
            pattern,
            format!("{} is not a finite number", value),
        ));
    }

    let parsed = parse_pattern(pattern)?;
    let negative = value.is_sign_negative();

    let mut digits = Digits::from_f64(value);
    digits.shift_left(parsed.shift);
    digits.round(parsed.max_frac, mode, negative);

    let to_text = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();

    let mut integer = to_text(&digits.digits[..digits.point]);
    let integer_trimmed = integer.trim_start_matches('0');
    integer = if integer_trimmed.len() < parsed.min_int {
        format!("{:0>width$}", integer_trimmed, width = parsed.min_int)
    } else {
        integer_trimmed.to_string()
    };

    let mut fraction = to_text(&digits.digits[digits.point..]);
    fraction.truncate(parsed.max_frac);
    while fraction.len() > parsed.min_frac && fraction.ends_with('0') {
        fraction.pop();
    }
    while fraction.len() < parsed.min_frac {
        fraction.push('0');
    }

    if integer.is_empty() && fraction.is_empty() {
        integer.push('0');
    }
    if let Some(size) = parsed.grouping {
        integer = group_digits(&integer, size);
    }

    let mut out = String::new();
    if negative && !digits.is_zero() {
        out.push('-');
    }
    out.push_str(&parsed.prefix);
    out.push_str(&integer);
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(&fraction);
    }
    out.push_str(&parsed.suffix);
    Ok(out)
}

/// Integer string, rounded half up
pub fn to_no_scale(value: f64) -> Result<String> {
    format(value, NumberPattern::NO_SCALE)
}

/// `current / total` as a whole percent, e.g. `"50%"`
pub fn get_progress(current: u64, total: u64) -> Result<String> {
    get_progress_with_pattern(current, total, NumberPattern::PERCENT_WITH_NOPOINT)
}

/// `current / total` formatted with `pattern`
///
/// # Errors
///
/// `InvalidArgument` if `total` is 0 or `current > total`.
pub fn get_progress_with_pattern(current: u64, total: u64, pattern: &str) -> Result<String> {
    validate::is_true("total", total > 0, "must be > 0")?;
    validate::is_true(
        "current",
        current <= total,
        format!("{} is greater than total {}", current, total),
    )?;
    format(current as f64 / total as f64, pattern)
}
