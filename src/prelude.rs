//! Convenient re-exports for common types and traits

pub use crate::core::{BoxedJob, ClosureJob, FeilongError, Job, Result};
pub use crate::date::{self, DatePattern};
pub use crate::json::{self, JsonFormatConfig};
pub use crate::net::uri;
pub use crate::partition::{
    self, PartitionPerElementHandler, PartitionPerHandler, PartitionReport,
    PartitionRunnableBuilder, PartitionThreadConfig, PartitionThreadEntity,
};
pub use crate::pool::{ThreadPool, ThreadPoolConfig, WorkerStats};
pub use crate::sort::{
    self, BooleanComparator, Comparator, FixedOrderComparator, PropertyComparator,
    RegexGroupNumberComparator, SortOrder,
};
pub use crate::text::{message_format, number_format, NumberPattern, RoundingMode};
