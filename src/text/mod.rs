//! Number and message formatting

pub mod message_format;
pub mod number_format;

pub use number_format::{NumberPattern, RoundingMode};
