//! Batch metadata handed to partition handlers

use serde::Serialize;

/// Describes one batch of a partitioned execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionThreadEntity {
    /// Batch name, also used as the job name in log output
    pub name: String,
    /// Size of the whole input list
    pub total_list_count: usize,
    /// Configured batch size
    pub each_size: usize,
    /// Zero-based index of this batch
    pub batch_number: usize,
    /// Number of elements in this batch
    pub current_list_size: usize,
}

impl PartitionThreadEntity {
    /// Create the metadata for batch `batch_number`
    pub fn new(
        name: impl Into<String>,
        total_list_count: usize,
        each_size: usize,
        batch_number: usize,
        current_list_size: usize,
    ) -> Self {
        Self {
            name: name.into(),
            total_list_count,
            each_size,
            batch_number,
            current_list_size,
        }
    }

    /// Index of this batch's first element in the input list
    pub fn start_index(&self) -> usize {
        self.batch_number * self.each_size
    }

    /// Whether this is the last batch
    pub fn is_last(&self) -> bool {
        self.start_index() + self.current_list_size >= self.total_list_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_index_and_last() {
        let first = PartitionThreadEntity::new("batch-0", 25, 10, 0, 10);
        assert_eq!(first.start_index(), 0);
        assert!(!first.is_last());

        let last = PartitionThreadEntity::new("batch-2", 25, 10, 2, 5);
        assert_eq!(last.start_index(), 20);
        assert!(last.is_last());
    }
}
