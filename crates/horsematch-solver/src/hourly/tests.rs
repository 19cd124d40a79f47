//! Tests for the hourly search.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use horsematch_config::{EngineConfig, HourlyBudgetConfig};
use horsematch_core::{DayQuery, Horse, Hour, Rider};
use horsematch_test::stable;

use super::*;
use crate::termination::StopReason;

fn context(query: &DayQuery) -> QueryContext {
    QueryContext::build(query, &stable::horses(), &stable::riders(), 3).unwrap()
}

fn names(ctx: &QueryContext, solution: &HourlySolution) -> Vec<String> {
    solution
        .horses
        .iter()
        .map(|&h| ctx.horse_name(h).to_string())
        .collect()
}

#[test]
fn test_single_training_ranks_every_candidate() {
    let ctx = context(&DayQuery::new().with_hour(Hour::new("10:00").with_training("Ola C")));
    let outcome = HourlySolver::new(&ctx, &EngineConfig::default()).solve(0);

    let ranked: Vec<(String, u64)> = outcome
        .solutions
        .iter()
        .map(|s| (names(&ctx, s).remove(0), s.score))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("Bella".to_string(), 1),
            ("Parys".to_string(), 1),
            ("Jadzia".to_string(), 50),
            ("Lady".to_string(), 50),
            ("Dzidzia".to_string(), 99),
            ("Czejen".to_string(), 148),
        ]
    );
    assert!(outcome.stats.is_complete());
}

#[test]
fn test_enumerates_all_distinct_pairs() {
    let query = DayQuery::new().with_hour(
        Hour::new("10:00")
            .with_training("Julka Lonza")
            .with_training("Ola C"),
    );
    let ctx = context(&query);
    let outcome = HourlySolver::new(&ctx, &EngineConfig::default()).solve(0);

    // 4 candidates x 6 candidates, minus the 3 shared horses
    assert_eq!(outcome.solutions.len(), 21);
    for solution in &outcome.solutions {
        assert_ne!(solution.horses[0], solution.horses[1]);
    }
    assert!(outcome
        .solutions
        .windows(2)
        .all(|w| w[0].score <= w[1].score));
}

#[test]
fn test_scores_sum_penalties() {
    let query = DayQuery::new().with_hour(
        Hour::new("10:00")
            .with_training("Maja")
            .with_training("Paula")
            .with_training("Kalina"),
    );
    let ctx = context(&query);
    let outcome = HourlySolver::new(&ctx, &EngineConfig::default()).solve(0);

    assert!(!outcome.solutions.is_empty());
    for solution in &outcome.solutions {
        let expected: u64 = ctx.hours()[0]
            .riders
            .iter()
            .zip(&solution.horses)
            .map(|(&r, &h)| ctx.penalties().get(r, h).unwrap())
            .sum();
        assert_eq!(solution.score, expected);

        let mut horses = solution.horses.to_vec();
        horses.sort_unstable();
        horses.dedup();
        assert_eq!(horses.len(), 3);
    }
}

#[test]
fn test_empty_hour_yields_empty_solution() {
    let ctx = context(&DayQuery::new().with_hour(Hour::new("10:00")));
    let outcome = HourlySolver::new(&ctx, &EngineConfig::default()).solve(0);

    assert_eq!(outcome.solutions, vec![HourlySolution::empty()]);
}

#[test]
fn test_hour_excludes_are_skipped() {
    let query = DayQuery::new().with_hour(
        Hour::new("10:00")
            .with_training("Ola C")
            .with_exclude("Bella"),
    );
    let ctx = context(&query);
    let outcome = HourlySolver::new(&ctx, &EngineConfig::default()).solve(0);

    assert_eq!(outcome.solutions.len(), 5);
    assert_eq!(names(&ctx, &outcome.solutions[0]), vec!["Parys"]);
}

#[test]
fn test_infeasible_hour_yields_nothing() {
    let horses = vec![Horse::new("A"), Horse::new("B")];
    let riders = vec![
        Rider::new("r1", stable::prefs(&["A"], &["B"], &[], &[], &[])),
        Rider::new("r2", stable::prefs(&["A"], &[], &[], &[], &["B"])),
    ];
    let query = DayQuery::new().with_hour(
        Hour::new("10:00")
            .with_training("r1")
            .with_training("r2")
            .with_exclude("B"),
    );
    let ctx = QueryContext::build(&query, &horses, &riders, 3).unwrap();
    let outcome = HourlySolver::new(&ctx, &EngineConfig::default()).solve(0);

    assert!(outcome.solutions.is_empty());
    assert!(outcome.stats.is_complete());
}

#[test]
fn test_solution_limit_truncates() {
    let ctx = context(&DayQuery::new().with_hour(Hour::new("10:00").with_training("Ola C")));
    let config = EngineConfig::default().with_hourly(HourlyBudgetConfig {
        millis_per_training: 1,
        solutions_per_milli: 2,
    });
    let outcome = HourlySolver::new(&ctx, &config).solve(0);

    assert_eq!(outcome.solutions.len(), 2);
    assert_eq!(outcome.solutions[0].score, 1);
    assert_eq!(outcome.stats.stop_reason, Some(StopReason::ResultLimit));
}

#[test]
fn test_terminate_flag_stops_search() {
    let ctx = context(&DayQuery::new().with_hour(Hour::new("10:00").with_training("Ola C")));
    let mut config = EngineConfig::default();
    config.clock_check_interval = 1;
    let flag = Arc::new(AtomicBool::new(true));

    let outcome = HourlySolver::new(&ctx, &config)
        .with_terminate_flag(Some(flag))
        .solve(0);

    assert!(outcome.solutions.is_empty());
    assert_eq!(outcome.stats.stop_reason, Some(StopReason::External));
}
