//! Partitioned parallel execution.
//!
//! The input list is split into contiguous batches, each batch is turned into a
//! job by a [`PartitionRunnableBuilder`] and submitted to a fixed-size
//! [`ThreadPool`]. The caller blocks until every batch has finished.

use crate::core::{BoxedJob, FeilongError, Job, Result};
use crate::lang::validate;
use crate::partition::builder::{PartitionPerElementHandler, PartitionRunnableBuilder};
use crate::partition::config::{
    calculate_each_size, PartitionThreadConfig, DEFAULT_MAX_THREAD_COUNT,
};
use crate::partition::entity::PartitionThreadEntity;
use crate::pool::worker::panic_message;
use crate::pool::{ThreadPool, ThreadPoolConfig};
use crossbeam_utils::sync::WaitGroup;
use parking_lot::Mutex;
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Summary of a completed execution
#[derive(Debug, Clone, Serialize)]
pub struct PartitionReport {
    /// Identifier used in log output
    pub execution_id: Uuid,
    /// Number of batches
    pub batch_count: usize,
    /// Number of worker threads used
    pub thread_count: usize,
    /// Size of the input list
    pub total_list_count: usize,
    /// Batch size
    pub each_size: usize,
    /// Wall time from the first submission to the last batch finishing
    pub elapsed: Duration,
}

/// Split `list` into contiguous batches of `each_size` elements.
///
/// Order is preserved; only the last batch may be shorter. `each_size == 0`
/// yields no batches.
pub fn partition<T>(list: Vec<T>, each_size: usize) -> Vec<Vec<T>> {
    if each_size == 0 || list.is_empty() {
        return Vec::new();
    }
    let mut batches = Vec::with_capacity(list.len().div_ceil(each_size));
    let mut iter = list.into_iter().peekable();
    while iter.peek().is_some() {
        batches.push(iter.by_ref().take(each_size).collect());
    }
    batches
}

/// Records the outcome of one batch and releases the wait group when dropped
struct BatchJob {
    inner: BoxedJob,
    failures: Arc<Mutex<Vec<String>>>,
    #[cfg(feature = "tracing")]
    span: tracing::Span,
    _done: WaitGroup,
}

impl Job for BatchJob {
    fn execute(&mut self) -> Result<()> {
        #[cfg(feature = "tracing")]
        let span = self.span.clone();
        #[cfg(feature = "tracing")]
        let _entered = span.enter();

        let outcome = catch_unwind(AssertUnwindSafe(|| self.inner.execute()));
        let result = match outcome {
            Ok(result) => result,
            Err(payload) => Err(FeilongError::execution(
                self.inner.job_type(),
                format!("panicked: {}", panic_message(payload.as_ref())),
            )),
        };
        if let Err(e) = &result {
            self.failures.lock().push(e.to_string());
        }
        result
    }

    fn job_type(&self) -> &str {
        self.inner.job_type()
    }
}

/// Run `builder` over `list` in batches of `each_size`, one job per batch.
///
/// At most [`DEFAULT_MAX_THREAD_COUNT`] worker threads are started; extra
/// batches queue behind them. Blocks until every batch is done.
///
/// # Errors
///
/// - `InvalidArgument` if `list` is empty or `each_size` is 0
/// - `PartitionFailed` if any batch returned an error or panicked
///
/// # Example
///
/// ```rust
/// use feilong_core::partition::{self, PartitionPerHandler, PartitionThreadEntity};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// # fn main() -> feilong_core::Result<()> {
/// let handler = PartitionPerHandler::new(
///     |batch: &[u64], _: &PartitionThreadEntity, sum: &AtomicUsize| {
///         sum.fetch_add(batch.iter().sum::<u64>() as usize, Ordering::Relaxed);
///         Ok(())
///     },
/// );
///
/// let sum = AtomicUsize::new(0);
/// let list: Vec<u64> = (1..=100).collect();
/// let (report, sum) = partition::execute_with_params(list, 10, sum, &handler)?;
/// assert_eq!(report.batch_count, 10);
/// assert_eq!(sum.load(Ordering::Relaxed), 5050);
/// # Ok(())
/// # }
/// ```
pub fn execute<T, P, B>(
    list: Vec<T>,
    each_size: usize,
    params: Arc<P>,
    builder: &B,
) -> Result<PartitionReport>
where
    T: Send + 'static,
    P: Send + Sync + 'static,
    B: PartitionRunnableBuilder<T, P> + ?Sized,
{
    validate::not_empty("list", &list)?;
    validate::greater_than_zero("each_size", each_size)?;

    run_batches(list, each_size, DEFAULT_MAX_THREAD_COUNT, params, builder)
}

/// Like [`execute`] but takes ownership of `params` and hands it back with the
/// report once every batch has finished.
pub fn execute_with_params<T, P, B>(
    list: Vec<T>,
    each_size: usize,
    params: P,
    builder: &B,
) -> Result<(PartitionReport, P)>
where
    T: Send + 'static,
    P: Send + Sync + 'static,
    B: PartitionRunnableBuilder<T, P> + ?Sized,
{
    let params = Arc::new(params);
    let report = execute(list, each_size, Arc::clone(&params), builder)?;
    // Every job, and with it every clone, is dropped before `execute` returns.
    let params = Arc::try_unwrap(params)
        .map_err(|_| FeilongError::other("partition params still shared after execution"))?;
    Ok((report, params))
}

/// Run `builder` with a batch size derived from `config`.
///
/// See [`calculate_each_size`] for the sizing rule; at most
/// `config.max_thread_count` threads are used.
pub fn execute_with_config<T, P, B>(
    list: Vec<T>,
    config: &PartitionThreadConfig,
    params: Arc<P>,
    builder: &B,
) -> Result<PartitionReport>
where
    T: Send + 'static,
    P: Send + Sync + 'static,
    B: PartitionRunnableBuilder<T, P> + ?Sized,
{
    config.validate()?;
    validate::not_empty("list", &list)?;

    let each_size = calculate_each_size(list.len(), config);
    run_batches(list, each_size, config.max_thread_count, params, builder)
}

/// Call `handler` for every element of `list`, `each_size` elements per batch
pub fn parallel_each<T, F>(list: Vec<T>, each_size: usize, handler: F) -> Result<PartitionReport>
where
    T: Send + 'static,
    F: Fn(&T) -> Result<()> + Send + Sync + 'static,
{
    let builder =
        PartitionPerElementHandler::new(move |element: &T, _: &PartitionThreadEntity, _: &()| {
            handler(element)
        });
    execute(list, each_size, Arc::new(()), &builder)
}

fn run_batches<T, P, B>(
    list: Vec<T>,
    each_size: usize,
    max_threads: usize,
    params: Arc<P>,
    builder: &B,
) -> Result<PartitionReport>
where
    T: Send + 'static,
    P: Send + Sync + 'static,
    B: PartitionRunnableBuilder<T, P> + ?Sized,
{
    let execution_id = Uuid::new_v4();
    let total_list_count = list.len();
    let batches = partition(list, each_size);
    let batch_count = batches.len();
    let thread_count = batch_count.clamp(1, max_threads.max(1));

    log::debug!(
        "partition {}: {} elements, each_size {}, {} batches on {} threads",
        execution_id,
        total_list_count,
        each_size,
        batch_count,
        thread_count
    );

    #[cfg(feature = "tracing")]
    let execution_span = tracing::info_span!("partition", %execution_id, batch_count, thread_count);

    let config = ThreadPoolConfig::new(thread_count).with_thread_name_prefix("partition");
    let pool = ThreadPool::with_config(config)?;
    pool.start()?;

    let start = Instant::now();
    let failures = Arc::new(Mutex::new(Vec::new()));
    let wait_group = WaitGroup::new();

    for (batch_number, batch) in batches.into_iter().enumerate() {
        let entity = PartitionThreadEntity::new(
            format!("partition-batch-{}", batch_number),
            total_list_count,
            each_size,
            batch_number,
            batch.len(),
        );
        let job = BatchJob {
            inner: builder.build(batch, entity, Arc::clone(&params)),
            failures: Arc::clone(&failures),
            #[cfg(feature = "tracing")]
            span: tracing::info_span!(parent: &execution_span, "batch", batch_number),
            _done: wait_group.clone(),
        };
        if let Err(e) = pool.submit(job) {
            // Jobs already queued still run during shutdown.
            let _ = pool.shutdown();
            return Err(e);
        }
    }

    wait_group.wait();
    let elapsed = start.elapsed();
    pool.shutdown()?;

    let failures = std::mem::take(&mut *failures.lock());
    if let Some(first_error) = failures.first() {
        log::warn!(
            "partition {}: {}/{} batches failed",
            execution_id,
            failures.len(),
            batch_count
        );
        return Err(FeilongError::partition_failed(
            failures.len(),
            batch_count,
            first_error.clone(),
        ));
    }

    log::debug!(
        "partition {}: finished {} batches in {:?}",
        execution_id,
        batch_count,
        elapsed
    );

    Ok(PartitionReport {
        execution_id,
        batch_count,
        thread_count,
        total_list_count,
        each_size,
        elapsed,
    })
}
