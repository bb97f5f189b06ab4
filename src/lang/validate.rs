//! Eager argument validation.
//!
//! Every function returns [`FeilongError::InvalidArgument`] naming the parameter
//! that failed, so callers can check arguments with `?` before doing any work.

use crate::core::{FeilongError, Result};

/// Reject empty or whitespace-only strings
pub fn not_blank(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FeilongError::invalid_argument(name, "can't be blank"));
    }
    Ok(())
}

/// Reject empty slices
pub fn not_empty<T>(name: &str, value: &[T]) -> Result<()> {
    if value.is_empty() {
        return Err(FeilongError::invalid_argument(name, "can't be empty"));
    }
    Ok(())
}

/// Unwrap an option or fail with an argument error
pub fn not_none<T>(name: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| FeilongError::invalid_argument(name, "can't be none"))
}

/// Fail with `message` unless `condition` holds
pub fn is_true(name: &str, condition: bool, message: impl Into<String>) -> Result<()> {
    if !condition {
        return Err(FeilongError::invalid_argument(name, message));
    }
    Ok(())
}

/// Reject zero
pub fn greater_than_zero(name: &str, value: usize) -> Result<()> {
    is_true(name, value > 0, format!("must be > 0, but was {}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("pattern", "#").is_ok());
        assert!(not_blank("pattern", "").is_err());

        let err = not_blank("pattern", " \t ").unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument 'pattern': can't be blank");
    }

    #[test]
    fn test_not_empty_and_none() {
        assert!(not_empty("list", &[1]).is_ok());
        assert!(not_empty::<u8>("list", &[]).is_err());

        assert_eq!(not_none("value", Some(3)).unwrap(), 3);
        assert!(not_none::<u8>("value", None).is_err());
    }

    #[test]
    fn test_greater_than_zero() {
        assert!(greater_than_zero("each_size", 1).is_ok());
        let err = greater_than_zero("each_size", 0).unwrap_err();
        assert!(err.to_string().contains("must be > 0, but was 0"));
    }
}
