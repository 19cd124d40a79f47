//! Tests for search budgets.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::*;

#[test]
fn test_result_limit_stops_search() {
    let mut budget = SearchBudget::new(Duration::from_secs(60), 3, 0);
    assert!(budget.on_result());
    assert!(budget.on_result());
    assert!(!budget.on_result());
    assert!(!budget.on_step());
    assert_eq!(budget.stop_reason(), Some(StopReason::ResultLimit));
}

#[test]
fn test_zero_result_limit_still_admits_one_result() {
    let mut budget = SearchBudget::new(Duration::from_secs(60), 0, 0);
    assert_eq!(budget.result_limit(), 1);
    assert!(!budget.on_result());
}

#[test]
fn test_time_limit_checked_on_mask_boundary() {
    let mut budget = SearchBudget::new(Duration::from_millis(1), 100, 0x3);
    budget.start_time = Instant::now() - Duration::from_millis(50);

    // steps 1..=3 skip the clock
    assert!(budget.on_step());
    assert!(budget.on_step());
    assert!(budget.on_step());
    assert!(!budget.on_step());
    assert_eq!(budget.stop_reason(), Some(StopReason::TimeLimit));
}

#[test]
fn test_continues_within_time_limit() {
    let mut budget = SearchBudget::new(Duration::from_secs(60), 100, 0);
    for _ in 0..1000 {
        assert!(budget.on_step());
    }
    let stats = budget.stats();
    assert_eq!(stats.steps, 1000);
    assert!(stats.is_complete());
}

#[test]
fn test_external_flag_stops_search() {
    let flag = Arc::new(AtomicBool::new(false));
    let mut budget = SearchBudget::new(Duration::from_secs(60), 100, 0)
        .with_terminate_flag(Some(Arc::clone(&flag)));

    assert!(budget.on_step());
    flag.store(true, Ordering::Relaxed);
    assert!(!budget.on_step());
    assert_eq!(budget.stop_reason(), Some(StopReason::External));
}

#[test]
fn test_first_stop_reason_sticks() {
    let mut budget = SearchBudget::new(Duration::from_millis(1), 1, 0);
    budget.start_time = Instant::now() - Duration::from_millis(50);
    assert!(!budget.on_result());
    assert!(!budget.on_step());
    assert_eq!(budget.stop_reason(), Some(StopReason::ResultLimit));
}
