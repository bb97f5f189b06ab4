//! Fixed-size thread pool

use crate::core::{BoxedJob, ClosureJob, FeilongError, Job, Result};
use crate::pool::worker::{Worker, WorkerStats};
use crossbeam_channel::{unbounded, Sender};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Configuration for thread pool
#[derive(Debug, Clone)]
pub struct ThreadPoolConfig {
    /// Number of worker threads (0 = number of CPUs)
    pub num_threads: usize,
    /// Thread name prefix
    pub thread_name_prefix: String,
}

impl Default for ThreadPoolConfig {
    fn default() -> Self {
        Self {
            num_threads: num_cpus::get(),
            thread_name_prefix: "worker".to_string(),
        }
    }
}

impl ThreadPoolConfig {
    /// Create a new configuration with specified number of threads
    #[must_use]
    pub fn new(num_threads: usize) -> Self {
        Self {
            num_threads: if num_threads == 0 {
                num_cpus::get()
            } else {
                num_threads
            },
            ..Default::default()
        }
    }

    /// Set thread name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.num_threads == 0 {
            return Err(FeilongError::invalid_config(
                "num_threads",
                "Number of threads must be greater than 0",
            ));
        }
        if self.thread_name_prefix.trim().is_empty() {
            return Err(FeilongError::invalid_config(
                "thread_name_prefix",
                "Thread name prefix can't be blank",
            ));
        }
        Ok(())
    }
}

/// A pool with a fixed number of worker threads fed from an unbounded channel.
///
/// `shutdown` closes the channel and joins the workers; jobs already queued
/// are executed before it returns.
pub struct ThreadPool {
    config: ThreadPoolConfig,
    workers: RwLock<Vec<Worker>>,
    stats: RwLock<Vec<Arc<WorkerStats>>>,
    sender: RwLock<Option<Sender<BoxedJob>>>,
    running: AtomicBool,
    total_jobs_submitted: AtomicU64,
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("config", &self.config)
            .field("running", &self.running.load(Ordering::Relaxed))
            .field(
                "total_jobs_submitted",
                &self.total_jobs_submitted.load(Ordering::Relaxed),
            )
            .finish()
    }
}

impl ThreadPool {
    /// Create a new thread pool with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ThreadPoolConfig::default())
    }

    /// Create a thread pool with specified number of threads
    pub fn with_threads(num_threads: usize) -> Result<Self> {
        Self::with_config(ThreadPoolConfig::new(num_threads))
    }

    /// Create a thread pool with custom configuration
    pub fn with_config(config: ThreadPoolConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            workers: RwLock::new(Vec::new()),
            stats: RwLock::new(Vec::new()),
            sender: RwLock::new(None),
            running: AtomicBool::new(false),
            total_jobs_submitted: AtomicU64::new(0),
        })
    }

    /// Start the worker threads.
    ///
    /// A pool can be started again after `shutdown`.
    pub fn start(&self) -> Result<()> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(FeilongError::already_running(
                &self.config.thread_name_prefix,
                self.config.num_threads,
            ));
        }

        let (sender, receiver) = unbounded::<BoxedJob>();
        let mut workers = Vec::with_capacity(self.config.num_threads);
        for id in 0..self.config.num_threads {
            match Worker::new(id, &self.config.thread_name_prefix, receiver.clone()) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    // Dropping the sender lets the already spawned workers exit.
                    drop(sender);
                    for worker in workers {
                        let _ = worker.join();
                    }
                    self.running.store(false, Ordering::Release);
                    return Err(e);
                }
            }
        }

        *self.stats.write() = workers.iter().map(Worker::stats).collect();
        *self.workers.write() = workers;
        *self.sender.write() = Some(sender);

        log::debug!(
            "thread pool '{}' started with {} workers",
            self.config.thread_name_prefix,
            self.config.num_threads
        );
        Ok(())
    }

    /// Submit a job to the pool
    pub fn submit<J: Job + 'static>(&self, job: J) -> Result<()> {
        if !self.running.load(Ordering::Acquire) {
            return Err(FeilongError::not_running(&self.config.thread_name_prefix));
        }

        let sender_guard = self.sender.read();
        // Running but without a sender means shutdown has begun
        let sender = sender_guard.as_ref().ok_or(FeilongError::ShuttingDown)?;

        sender
            .send(Box::new(job))
            .map_err(|_| FeilongError::QueueSendError)?;

        self.total_jobs_submitted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Submit a closure as a job
    pub fn execute<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        self.submit(ClosureJob::new(f))
    }

    /// Get the number of worker threads
    pub fn num_threads(&self) -> usize {
        self.config.num_threads
    }

    /// Check if the pool is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Get total number of jobs submitted
    pub fn total_jobs_submitted(&self) -> u64 {
        self.total_jobs_submitted.load(Ordering::Relaxed)
    }

    /// Get statistics for all workers of the last start, kept after shutdown
    pub fn get_stats(&self) -> Vec<Arc<WorkerStats>> {
        self.stats.read().clone()
    }

    /// Get total jobs processed across all workers
    pub fn total_jobs_processed(&self) -> u64 {
        self.sum_stats(WorkerStats::get_jobs_processed)
    }

    /// Get total jobs failed across all workers
    pub fn total_jobs_failed(&self) -> u64 {
        self.sum_stats(WorkerStats::get_jobs_failed)
    }

    /// Get total jobs panicked across all workers
    pub fn total_jobs_panicked(&self) -> u64 {
        self.sum_stats(WorkerStats::get_jobs_panicked)
    }

    fn sum_stats(&self, f: fn(&WorkerStats) -> u64) -> u64 {
        self.stats.read().iter().map(|s| f(s)).sum()
    }

    /// Stop accepting jobs, drain the queue and join every worker.
    ///
    /// Calling it on a pool that is not running is a no-op.
    pub fn shutdown(&self) -> Result<()> {
        if self
            .running
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(());
        }

        // Dropping the last sender disconnects the channel once it is empty.
        drop(self.sender.write().take());

        let workers = std::mem::take(&mut *self.workers.write());
        let mut first_error = None;
        for worker in workers {
            if let Err(e) = worker.join() {
                first_error.get_or_insert(e);
            }
        }

        log::debug!(
            "thread pool '{}' shut down",
            self.config.thread_name_prefix
        );

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        if self.running.load(Ordering::Acquire) {
            if let Err(e) = self.shutdown() {
                log::error!(
                    "failed to shutdown thread pool '{}' during drop: {}",
                    self.config.thread_name_prefix,
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_thread_pool_creation() {
        let pool = ThreadPool::new().expect("Failed to create thread pool");
        assert!(!pool.is_running());

        pool.start().expect("Failed to start pool");
        assert!(pool.is_running());
        assert_eq!(pool.num_threads(), num_cpus::get());

        pool.shutdown().expect("Failed to shutdown pool");
        assert!(!pool.is_running());
    }

    #[test]
    fn test_zero_threads_means_cpu_count() {
        let config = ThreadPoolConfig::new(0);
        assert_eq!(config.num_threads, num_cpus::get());
    }

    #[test]
    fn test_blank_prefix_rejected() {
        let config = ThreadPoolConfig::new(2).with_thread_name_prefix("  ");
        assert!(matches!(
            ThreadPool::with_config(config),
            Err(FeilongError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_start_twice() {
        let pool = ThreadPool::with_threads(1).expect("Failed to create thread pool");
        pool.start().expect("Failed to start pool");
        assert!(matches!(
            pool.start(),
            Err(FeilongError::AlreadyRunning { .. })
        ));
        pool.shutdown().expect("Failed to shutdown pool");
    }

    #[test]
    fn test_shutdown_waits_for_jobs() {
        let pool = ThreadPool::with_threads(2).expect("Failed to create thread pool");
        pool.start().expect("Failed to start pool");

        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..100 {
            let counter_clone = Arc::clone(&counter);
            pool.execute(move || {
                counter_clone.fetch_add(1, Ordering::Relaxed);
                Ok(())
            })
            .expect("Failed to submit job");
        }

        let stats = pool.get_stats();
        pool.shutdown().expect("Failed to shutdown pool");

        assert_eq!(counter.load(Ordering::Relaxed), 100);
        assert_eq!(pool.total_jobs_submitted(), 100);
        let processed: u64 = stats.iter().map(|s| s.get_jobs_processed()).sum();
        assert_eq!(processed, 100);
        assert_eq!(pool.total_jobs_processed(), 100, "stats survive shutdown");
    }

    #[test]
    fn test_submit_when_not_running() {
        let pool = ThreadPool::with_threads(1).expect("Failed to create thread pool");
        let result = pool.execute(|| Ok(()));
        assert!(matches!(result, Err(FeilongError::NotRunning { .. })));
    }

    #[test]
    fn test_submit_after_shutdown() {
        let pool = ThreadPool::with_threads(2).expect("Failed to create thread pool");
        pool.start().expect("Failed to start pool");
        pool.execute(|| Ok(())).expect("Failed to submit job");
        pool.shutdown().expect("Failed to shutdown pool");

        let result = pool.execute(|| Ok(()));
        assert!(matches!(result, Err(FeilongError::NotRunning { .. })));
    }

    #[test]
    fn test_restart_after_shutdown() {
        let pool = ThreadPool::with_threads(1).expect("Failed to create thread pool");
        pool.start().expect("Failed to start pool");
        pool.shutdown().expect("Failed to shutdown pool");

        pool.start().expect("Failed to restart pool");
        pool.execute(|| Ok(())).expect("Failed to submit job");
        pool.shutdown().expect("Failed to shutdown pool");
    }

    #[test]
    fn test_failed_and_panicked_jobs_counted() {
        let pool = ThreadPool::with_threads(2).expect("Failed to create thread pool");
        pool.start().expect("Failed to start pool");

        for i in 0..10 {
            pool.execute(move || {
                if i % 2 == 0 {
                    Err(FeilongError::other("Test error"))
                } else {
                    Ok(())
                }
            })
            .expect("Failed to submit job");
        }
        pool.execute(|| panic!("boom")).expect("Failed to submit job");

        let stats = pool.get_stats();
        pool.shutdown().expect("Failed to shutdown pool");

        let failed: u64 = stats.iter().map(|s| s.get_jobs_failed()).sum();
        let processed: u64 = stats.iter().map(|s| s.get_jobs_processed()).sum();
        let panicked: u64 = stats.iter().map(|s| s.get_jobs_panicked()).sum();
        assert_eq!(failed, 5);
        assert_eq!(processed, 5);
        assert_eq!(panicked, 1);
    }
}
