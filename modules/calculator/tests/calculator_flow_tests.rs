#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

//! Service-level flows over the in-memory store: chained operations, undo,
//! reset and concurrent use.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use calculator::{DomainError, EvalError, InstanceId, InstanceSnapshot, UndoOutcome};
use common::create_service;

fn snapshot(id: InstanceId, result: f64, total_ops: usize) -> InstanceSnapshot {
    InstanceSnapshot {
        id,
        result,
        total_ops,
    }
}

// =============================================================================
// Full flows
// =============================================================================

#[test]
fn test_chain_undo_and_reset() {
    let service = create_service();

    let init = service.init(10.0, 20.0, "add").unwrap();
    let id = init.id;
    assert_eq!(init, snapshot(id, 30.0, 1));

    assert_eq!(
        service.apply_operation(id, 10.0, "multiply").unwrap(),
        snapshot(id, 300.0, 2)
    );
    assert_eq!(
        service.apply_operation(id, 10.0, "subtract").unwrap(),
        snapshot(id, 290.0, 3)
    );
    assert_eq!(
        service.apply_operation(id, 10.0, "divide").unwrap(),
        snapshot(id, 29.0, 4)
    );

    assert_eq!(
        service.undo(id).unwrap(),
        UndoOutcome::Reverted(snapshot(id, 290.0, 3))
    );

    assert_eq!(
        service.reset(id).unwrap(),
        format!("Calculator {id} is now reset")
    );
    assert!(service.history(id).is_none());
}

#[test]
fn test_undo_until_history_cleared() {
    let service = create_service();

    let id = service.init(10.0, 1.5, "multiply").unwrap().id;
    assert_eq!(
        service.apply_operation(id, 10.0, "add").unwrap(),
        snapshot(id, 25.0, 2)
    );
    assert_eq!(
        service.apply_operation(id, 5.0, "subtract").unwrap(),
        snapshot(id, 20.0, 3)
    );

    assert_eq!(
        service.undo(id).unwrap(),
        UndoOutcome::Reverted(snapshot(id, 25.0, 2))
    );
    assert_eq!(
        service.undo(id).unwrap(),
        UndoOutcome::Reverted(snapshot(id, 15.0, 1))
    );
    assert_eq!(service.undo(id).unwrap(), UndoOutcome::HistoryCleared);

    assert!(service.history(id).is_none());
    assert_eq!(
        service.apply_operation(id, 1.0, "add").unwrap_err(),
        DomainError::instance_not_found(id)
    );
}

#[test]
fn test_init_divide_by_zero_creates_nothing() {
    let service = create_service();

    let err = service.init(10.0, 0.0, "divide").unwrap_err();
    assert_eq!(err.to_string(), "Cannot divide by zero");
    assert_eq!(service.live_instances(), 0);
}

// =============================================================================
// Failure isolation
// =============================================================================

#[test]
fn test_failed_divide_keeps_total_ops() {
    let service = create_service();
    let id = service.init(8.0, 2.0, "divide").unwrap().id;

    let err = service.apply_operation(id, -0.0, "divide").unwrap_err();
    assert_eq!(err, DomainError::Eval(EvalError::DivideByZero));

    let history = service.history(id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].result, 4.0);
}

#[test]
fn test_unknown_id_wins_over_bad_input() {
    let service = create_service();
    let unknown = InstanceId::new(999_999);

    let err = service.apply_operation(unknown, 0.0, "divide").unwrap_err();
    assert!(err.is_not_found());

    let err = service.apply_operation(unknown, 1.0, "modulo").unwrap_err();
    assert!(err.is_not_found());
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inits_get_unique_ids() {
    let service = create_service();

    let tasks: Vec<_> = (0..64)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.init(f64::from(i), 1.0, "add").unwrap().id })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        assert!(ids.insert(task.await.unwrap()));
    }
    assert_eq!(service.live_instances(), 64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_operations_on_one_instance() {
    let service = create_service();
    let id = service.init(0.0, 0.0, "add").unwrap().id;

    let tasks: Vec<_> = (0..100)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.apply_operation(id, 1.0, "add").unwrap() })
        })
        .collect();

    let mut totals = HashSet::new();
    for task in tasks {
        totals.insert(task.await.unwrap().total_ops);
    }

    // Every append observed a distinct history length
    assert_eq!(totals.len(), 100);
    let history = service.history(id).unwrap();
    assert_eq!(history.len(), 101);
    assert_eq!(history.last().unwrap().result, 100.0);
}
