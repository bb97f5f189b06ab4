//! # feilong-core
//!
//! General purpose utilities: partitioned parallel execution, sorting and
//! comparators, number, date and message formatting, URI and JSON helpers.
//!
//! ## Features
//!
//! - **Partitioned execution**: split a list into batches and run one job per batch on a fixed-size pool
//! - **Thread Pool**: worker pool fed from a crossbeam channel, with per-worker statistics
//! - **Sorting**: `"name desc"` style property sorts, fixed-order, regex and boolean comparators
//! - **Formatting**: number patterns such as `"#,##0.00"`, `{0}` message templates and date patterns
//! - **URI and JSON**: form encoding, query parameter editing, filtered pretty JSON
//!
//! ## Partitioned execution
//!
//! ```rust
//! use feilong_core::prelude::*;
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let handler = PartitionPerHandler::new(
//!     |batch: &[u64], entity: &PartitionThreadEntity, total: &AtomicU64| {
//!         log::debug!("{} handles {} elements", entity.name, batch.len());
//!         total.fetch_add(batch.iter().sum::<u64>(), Ordering::Relaxed);
//!         Ok(())
//!     },
//! );
//!
//! let total = Arc::new(AtomicU64::new(0));
//! let report = partition::execute((1..=1000).collect(), 100, Arc::clone(&total), &handler)?;
//!
//! assert_eq!(report.batch_count, 10);
//! assert_eq!(total.load(Ordering::Relaxed), 500_500);
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Pool
//!
//! ```rust
//! use feilong_core::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let config = ThreadPoolConfig::new(4).with_thread_name_prefix("my-worker");
//! let pool = ThreadPool::with_config(config)?;
//! pool.start()?;
//!
//! for i in 0..10 {
//!     pool.execute(move || {
//!         log::trace!("job {} executing", i);
//!         Ok(())
//!     })?;
//! }
//!
//! assert_eq!(pool.total_jobs_submitted(), 10);
//!
//! // Queued jobs finish before shutdown returns
//! pool.shutdown()?;
//! assert_eq!(pool.total_jobs_processed(), 10);
//! # Ok(())
//! # }
//! ```
//!
//! ## Sorting and formatting
//!
//! ```rust
//! use feilong_core::prelude::*;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! # fn main() -> Result<()> {
//! let mut users = vec![
//!     User { name: "b".into(), age: 30 },
//!     User { name: "a".into(), age: 30 },
//!     User { name: "c".into(), age: 18 },
//! ];
//! sort::sort_list_by_property_names(&mut users, &["age desc", "name"])?;
//! let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
//! assert_eq!(names, ["a", "b", "c"]);
//!
//! assert_eq!(number_format::format(1234.567, NumberPattern::MONEY)?, "1,234.57");
//! assert_eq!(message_format::format("{0} users", &[&users.len()])?, "3 users");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bean;
pub mod core;
pub mod date;
pub mod json;
pub mod lang;
pub mod net;
pub mod partition;
pub mod pool;
pub mod prelude;
pub mod sort;
pub mod text;
pub mod util;

pub use crate::core::{BoxedJob, ClosureJob, FeilongError, Job, Result};
pub use crate::partition::{
    PartitionPerElementHandler, PartitionPerHandler, PartitionReport, PartitionRunnableBuilder,
    PartitionThreadConfig, PartitionThreadEntity,
};
pub use crate::pool::{ThreadPool, ThreadPoolConfig, WorkerStats};
