//! Date formatting, parsing and arithmetic built on `chrono`.
//!
//! All functions work on [`chrono::NaiveDateTime`] in local wall clock time.

pub mod date_util;
pub mod extension;
pub mod pattern;

pub use date_util::*;
pub use extension::{
    format_duration, get_interval, get_interval_day, get_interval_for_view, get_interval_hour,
    get_interval_second,
};
pub use pattern::{to_strftime, DatePattern};
