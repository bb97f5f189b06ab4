//! Partitioned parallel execution over a fixed-size thread pool

pub mod builder;
pub mod config;
pub mod entity;
pub mod executor;

pub use builder::{PartitionPerElementHandler, PartitionPerHandler, PartitionRunnableBuilder};
pub use config::{
    batch_count, calculate_each_size, PartitionThreadConfig, DEFAULT_MAX_THREAD_COUNT,
    DEFAULT_MIN_EACH_SIZE,
};
pub use entity::PartitionThreadEntity;
pub use executor::{
    execute, execute_with_config, execute_with_params, parallel_each, partition, PartitionReport,
};
