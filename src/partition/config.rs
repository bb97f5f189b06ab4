//! Partition sizing configuration

use crate::core::{FeilongError, Result};
use serde::{Deserialize, Serialize};

/// Default upper bound on the number of batches (and threads) of one execution
pub const DEFAULT_MAX_THREAD_COUNT: usize = 100;

/// Default lower bound on the number of elements in one batch
pub const DEFAULT_MIN_EACH_SIZE: usize = 10;

/// Bounds used to derive a per-batch size from the size of the input list.
///
/// ```rust
/// use feilong_core::partition::{calculate_each_size, PartitionThreadConfig};
///
/// let config = PartitionThreadConfig::new()
///     .with_max_thread_count(4)
///     .with_min_each_size(10);
///
/// // 100 elements would need 10 batches of 10, capped at 4 batches of 25
/// assert_eq!(calculate_each_size(100, &config), 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionThreadConfig {
    /// Maximum number of batches
    pub max_thread_count: usize,
    /// Minimum number of elements per batch
    pub min_each_size: usize,
}

impl Default for PartitionThreadConfig {
    fn default() -> Self {
        Self {
            max_thread_count: DEFAULT_MAX_THREAD_COUNT,
            min_each_size: DEFAULT_MIN_EACH_SIZE,
        }
    }
}

impl PartitionThreadConfig {
    /// Configuration with the default bounds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of batches
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_thread_count(mut self, max_thread_count: usize) -> Self {
        self.max_thread_count = max_thread_count;
        self
    }

    /// Set the minimum batch size
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_min_each_size(mut self, min_each_size: usize) -> Self {
        self.min_each_size = min_each_size;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_thread_count == 0 {
            return Err(FeilongError::invalid_config(
                "max_thread_count",
                "Maximum thread count must be greater than 0",
            ));
        }
        if self.min_each_size == 0 {
            return Err(FeilongError::invalid_config(
                "min_each_size",
                "Minimum batch size must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Compute the batch size for `total` elements.
///
/// The batch count is `ceil(total / min_each_size)` clamped to
/// `1..=max_thread_count`, and the batch size spreads `total` evenly over it.
/// Returns 0 for an empty list. Zero bounds are treated as 1.
pub fn calculate_each_size(total: usize, config: &PartitionThreadConfig) -> usize {
    if total == 0 {
        return 0;
    }
    let min_each_size = config.min_each_size.max(1);
    let max_thread_count = config.max_thread_count.max(1);

    let thread_count = total.div_ceil(min_each_size).clamp(1, max_thread_count);
    total.div_ceil(thread_count)
}

/// Number of batches `total` elements split into with `each_size`
pub fn batch_count(total: usize, each_size: usize) -> usize {
    if each_size == 0 {
        return 0;
    }
    total.div_ceil(each_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PartitionThreadConfig::default();
        assert_eq!(config.max_thread_count, 100);
        assert_eq!(config.min_each_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let config = PartitionThreadConfig::new().with_max_thread_count(0);
        assert!(matches!(
            config.validate(),
            Err(FeilongError::InvalidConfig { .. })
        ));

        let config = PartitionThreadConfig::new().with_min_each_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_small_list_is_one_batch() {
        let config = PartitionThreadConfig::default();
        assert_eq!(calculate_each_size(0, &config), 0);
        assert_eq!(calculate_each_size(1, &config), 1);
        assert_eq!(calculate_each_size(10, &config), 10);
    }

    #[test]
    fn test_uses_min_each_size_until_thread_cap() {
        let config = PartitionThreadConfig::default();
        // 11 elements -> 2 batches of 6
        assert_eq!(calculate_each_size(11, &config), 6);
        assert_eq!(calculate_each_size(500, &config), 10);
        assert_eq!(calculate_each_size(1000, &config), 10);
        // past 100 * 10 the thread cap kicks in
        assert_eq!(calculate_each_size(1001, &config), 11);
        assert_eq!(calculate_each_size(100_000, &config), 1000);
    }

    #[test]
    fn test_batch_count() {
        assert_eq!(batch_count(0, 3), 0);
        assert_eq!(batch_count(10, 3), 4);
        assert_eq!(batch_count(9, 3), 3);
        assert_eq!(batch_count(9, 0), 0);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: PartitionThreadConfig =
            serde_json::from_str(r#"{"max_thread_count": 8}"#).expect("valid json");
        assert_eq!(config.max_thread_count, 8);
        assert_eq!(config.min_each_size, DEFAULT_MIN_EACH_SIZE);
    }
}
