//! Integration tests for partitioned parallel execution

use feilong_core::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_batches_run_concurrently() {
    init_logger();

    // Two batches on two threads; each waits for the other to arrive
    let arrived = Arc::new(AtomicUsize::new(0));
    let handler = PartitionPerHandler::new(
        |_: &[u32], _: &PartitionThreadEntity, arrived: &AtomicUsize| {
            arrived.fetch_add(1, Ordering::SeqCst);
            for _ in 0..200 {
                if arrived.load(Ordering::SeqCst) == 2 {
                    return Ok(());
                }
                thread::sleep(Duration::from_millis(5));
            }
            Err(FeilongError::other("other batch never started"))
        },
    );

    let report = partition::execute(vec![1, 2, 3, 4], 2, Arc::clone(&arrived), &handler)
        .expect("both batches should meet");
    assert_eq!(report.thread_count, 2);
}

#[test]
fn test_entity_describes_each_batch() {
    init_logger();

    type Seen = Mutex<Vec<PartitionThreadEntity>>;

    let entities = Arc::new(Mutex::new(Vec::new()));
    let handler = PartitionPerHandler::new(
        |batch: &[usize], entity: &PartitionThreadEntity, seen: &Seen| {
            assert_eq!(batch.len(), entity.current_list_size);
            assert_eq!(batch.first().copied(), Some(entity.start_index()));
            seen.lock().unwrap().push(entity.clone());
            Ok(())
        },
    );

    partition::execute((0..23).collect(), 5, Arc::clone(&entities), &handler)
        .expect("execution should succeed");

    let mut entities = entities.lock().unwrap().clone();
    entities.sort_by_key(|e| e.batch_number);

    assert_eq!(entities.len(), 5);
    for (i, entity) in entities.iter().enumerate() {
        assert_eq!(entity.batch_number, i);
        assert_eq!(entity.total_list_count, 23);
        assert_eq!(entity.each_size, 5);
        assert_eq!(entity.is_last(), i == 4);
    }
    assert_eq!(entities[4].current_list_size, 3);

    let names: HashSet<_> = entities.iter().map(|e| e.name.clone()).collect();
    assert_eq!(names.len(), 5, "batch names should be unique");
}

#[test]
fn test_per_element_handler_reports_failing_element() {
    init_logger();

    let handler = PartitionPerElementHandler::new(
        |value: &i32, _: &PartitionThreadEntity, _: &()| {
            if *value == 13 {
                Err(FeilongError::other("unlucky"))
            } else {
                Ok(())
            }
        },
    );

    let result = partition::execute((0..30).collect(), 10, Arc::new(()), &handler);
    match result {
        Err(FeilongError::PartitionFailed {
            failed,
            total,
            first_error,
        }) => {
            assert_eq!(failed, 1);
            assert_eq!(total, 3);
            assert!(first_error.contains("unlucky"), "got {}", first_error);
        }
        other => panic!("expected PartitionFailed, got {:?}", other),
    }
}

/// A builder that is not a closure wrapper
struct SquareSum;

struct SquareSumJob {
    batch: Vec<u64>,
    total: Arc<AtomicUsize>,
}

impl Job for SquareSumJob {
    fn execute(&mut self) -> Result<()> {
        let sum: u64 = self.batch.iter().map(|v| v * v).sum();
        self.total.fetch_add(sum as usize, Ordering::SeqCst);
        Ok(())
    }

    fn job_type(&self) -> &str {
        "SquareSumJob"
    }
}

impl PartitionRunnableBuilder<u64, AtomicUsize> for SquareSum {
    fn build(
        &self,
        batch: Vec<u64>,
        _entity: PartitionThreadEntity,
        params: Arc<AtomicUsize>,
    ) -> BoxedJob {
        Box::new(SquareSumJob {
            batch,
            total: params,
        })
    }
}

#[test]
fn test_custom_builder() {
    init_logger();

    let total = Arc::new(AtomicUsize::new(0));
    let report = partition::execute((1..=10).collect(), 3, Arc::clone(&total), &SquareSum)
        .expect("execution should succeed");

    assert_eq!(report.batch_count, 4);
    assert_eq!(total.load(Ordering::SeqCst), 385);
}

#[test]
fn test_config_sizing_defaults() {
    init_logger();

    let counter = Arc::new(AtomicUsize::new(0));
    let handler = PartitionPerHandler::new(
        |batch: &[u32], _: &PartitionThreadEntity, counter: &AtomicUsize| {
            counter.fetch_add(batch.len(), Ordering::SeqCst);
            Ok(())
        },
    );

    // 2000 elements with at least 10 per batch would need 200 batches, capped at 100
    let report = partition::execute_with_config(
        (0..2000).collect(),
        &PartitionThreadConfig::default(),
        Arc::clone(&counter),
        &handler,
    )
    .expect("execution should succeed");

    assert_eq!(report.each_size, 20);
    assert_eq!(report.batch_count, 100);
    assert_eq!(counter.load(Ordering::SeqCst), 2000);

    let invalid = PartitionThreadConfig::new().with_min_each_size(0);
    let unused = Arc::new(AtomicUsize::new(0));
    let result = partition::execute_with_config(vec![1u32], &invalid, unused, &handler);
    assert!(matches!(result, Err(FeilongError::InvalidConfig { .. })));
}

#[test]
fn test_report_serializes() {
    let report = partition::parallel_each(vec!["a", "b", "c"], 2, |_| Ok(()))
        .expect("execution should succeed");

    let json = json::to_json_string(&report).expect("report should serialize");
    assert!(json.contains(&report.execution_id.to_string()));
    assert!(json.contains("\"batch_count\":2"));
}
