//! Builders turning a batch into a job

use crate::core::{BoxedJob, ClosureJob, FeilongError, Result};
use crate::partition::entity::PartitionThreadEntity;
use std::marker::PhantomData;
use std::sync::Arc;

/// Builds the job that processes one batch.
///
/// `params` is shared by every batch of an execution. It is read-only from the
/// library's point of view; use interior mutability in `P` to collect results.
pub trait PartitionRunnableBuilder<T, P>: Send + Sync {
    /// Build the job for `batch`
    fn build(&self, batch: Vec<T>, entity: PartitionThreadEntity, params: Arc<P>) -> BoxedJob;
}

/// Runs a handler once per batch
pub struct PartitionPerHandler<T, P, F> {
    handler: Arc<F>,
    _marker: PhantomData<fn(&[T], &P)>,
}

impl<T, P, F> PartitionPerHandler<T, P, F>
where
    F: Fn(&[T], &PartitionThreadEntity, &P) -> Result<()> + Send + Sync + 'static,
{
    /// Wrap `handler`
    pub fn new(handler: F) -> Self {
        Self {
            handler: Arc::new(handler),
            _marker: PhantomData,
        }
    }
}

impl<T, P, F> PartitionRunnableBuilder<T, P> for PartitionPerHandler<T, P, F>
where
    T: Send + 'static,
    P: Send + Sync + 'static,
    F: Fn(&[T], &PartitionThreadEntity, &P) -> Result<()> + Send + Sync + 'static,
{
    fn build(&self, batch: Vec<T>, entity: PartitionThreadEntity, params: Arc<P>) -> BoxedJob {
        let handler = Arc::clone(&self.handler);
        let name = entity.name.clone();
        Box::new(ClosureJob::with_name(
            move || (*handler)(batch.as_slice(), &entity, &*params),
            name,
        ))
    }
}

/// Runs a handler once per element, batch by batch.
///
/// The first failing element stops the rest of its batch; other batches keep
/// running.
pub struct PartitionPerElementHandler<T, P, F> {
    handler: Arc<F>,
    _marker: PhantomData<fn(&T, &P)>,
}

impl<T, P, F> PartitionPerElementHandler<T, P, F>
where
    F: Fn(&T, &PartitionThreadEntity, &P) -> Result<()> + Send + Sync + 'static,
{
    /// Wrap `handler`
    pub fn new(handler: F) -> Self {
        Self {
            handler: Arc::new(handler),
            _marker: PhantomData,
        }
    }
}

impl<T, P, F> PartitionRunnableBuilder<T, P> for PartitionPerElementHandler<T, P, F>
where
    T: Send + 'static,
    P: Send + Sync + 'static,
    F: Fn(&T, &PartitionThreadEntity, &P) -> Result<()> + Send + Sync + 'static,
{
    fn build(&self, batch: Vec<T>, entity: PartitionThreadEntity, params: Arc<P>) -> BoxedJob {
        let handler = Arc::clone(&self.handler);
        let name = entity.name.clone();
        Box::new(ClosureJob::with_name(
            move || {
                for (offset, element) in batch.iter().enumerate() {
                    (*handler)(element, &entity, &*params).map_err(|e| {
                        FeilongError::execution(
                            entity.name.clone(),
                            format!("element {}: {}", entity.start_index() + offset, e),
                        )
                    })?;
                }
                Ok(())
            },
            name,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Job;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entity(size: usize) -> PartitionThreadEntity {
        PartitionThreadEntity::new("batch-1", 20, 10, 1, size)
    }

    #[test]
    fn test_per_handler_sees_whole_batch() {
        let builder = PartitionPerHandler::new(
            |batch: &[u32], entity: &PartitionThreadEntity, sum: &AtomicUsize| {
                assert_eq!(batch.len(), entity.current_list_size);
                let total: u32 = batch.iter().sum();
                sum.fetch_add(total as usize, Ordering::SeqCst);
                Ok(())
            },
        );

        let params = Arc::new(AtomicUsize::new(0));
        let mut job = builder.build(vec![1, 2, 3], entity(3), Arc::clone(&params));
        assert_eq!(job.job_type(), "batch-1");
        job.execute().expect("batch should succeed");
        assert_eq!(params.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_per_element_handler_stops_at_first_error() {
        let builder = PartitionPerElementHandler::new(
            |value: &u32, _: &PartitionThreadEntity, seen: &AtomicUsize| {
                seen.fetch_add(1, Ordering::SeqCst);
                if *value == 2 {
                    return Err(FeilongError::other("two is not allowed"));
                }
                Ok(())
            },
        );

        let seen = Arc::new(AtomicUsize::new(0));
        let mut job = builder.build(vec![1, 2, 3], entity(3), Arc::clone(&seen));
        let err = job.execute().unwrap_err();

        assert_eq!(seen.load(Ordering::SeqCst), 2);
        // batch 1 starts at index 10, the failing element is its second
        assert!(err.to_string().contains("element 11: two is not allowed"));
    }
}
