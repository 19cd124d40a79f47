//! Tests for day plan combination.

use std::collections::HashSet;

use horsematch_config::{CombineBudgetConfig, EngineConfig};
use horsematch_core::{DayQuery, Horse, Hour, Rider};
use horsematch_test::stable;

use super::*;
use crate::hourly::HourlySolver;
use crate::termination::StopReason;

fn search_all(ctx: &QueryContext, config: &EngineConfig) -> Vec<Vec<HourlySolution>> {
    let solver = HourlySolver::new(ctx, config);
    (0..ctx.hours().len())
        .map(|i| solver.solve(i).solutions)
        .collect()
}

/// Two riders in separate hours who both want `A` most; `A` may work once.
fn contested_context() -> QueryContext {
    let horses = vec![Horse::new("A").with_max_daily_workload(1), Horse::new("B")];
    let riders = vec![
        Rider::new("r1", stable::prefs(&["A"], &["B"], &[], &[], &[])),
        Rider::new("r2", stable::prefs(&["A"], &["B"], &[], &[], &[])),
    ];
    let query = DayQuery::new()
        .with_hour(Hour::new("10:00").with_training("r1"))
        .with_hour(Hour::new("11:00").with_training("r2"));
    QueryContext::build(&query, &horses, &riders, 3).unwrap()
}

#[test]
fn test_normalize_keeps_category_part() {
    assert_eq!(normalize(98, 3, 49), 98.0);
    assert_eq!(normalize(60, 1, 49), 60.0);
    assert_eq!(normalize(60, 2, 49), 49.0 + 11.0 / 4.0);
}

#[test]
fn test_workload_cap_excludes_combination() {
    let ctx = contested_context();
    let config = EngineConfig::default();
    let hourly = search_all(&ctx, &config);

    assert_eq!(hourly[0][0].score, 2);
    assert_eq!(hourly[0][1].score, 6);

    let outcome = HourSetCombiner::new(&ctx, &config).combine(&hourly);
    let ranks: Vec<Vec<usize>> = outcome.solutions.iter().map(|s| s.ranks.clone()).collect();
    assert_eq!(ranks, vec![vec![0, 1], vec![1, 0], vec![1, 1]]);
    assert_eq!(outcome.solutions[0].score, 8.0);
    assert!(outcome.stats.is_complete());
}

#[test]
fn test_results_sorted_unique_and_capped() {
    let query = DayQuery::new()
        .with_hour(Hour::new("10:00").with_training("Maja").with_training("Paula"))
        .with_hour(Hour::new("11:00").with_training("Kalina").with_training("Emilka"))
        .with_hour(Hour::new("12:00").with_training("Maja").with_training("Ola C"));
    let ctx = QueryContext::build(&query, &stable::horses(), &stable::riders(), 1).unwrap();
    let config = EngineConfig::default();
    let hourly = search_all(&ctx, &config);

    let outcome = HourSetCombiner::new(&ctx, &config).combine(&hourly);
    assert!(!outcome.solutions.is_empty());
    assert!(outcome
        .solutions
        .windows(2)
        .all(|w| w[0].score <= w[1].score));

    let unique: HashSet<&Vec<usize>> = outcome.solutions.iter().map(|s| &s.ranks).collect();
    assert_eq!(unique.len(), outcome.solutions.len());

    for solution in &outcome.solutions {
        let mut used = HashSet::new();
        for (hour, &rank) in solution.ranks.iter().enumerate() {
            for &horse in &hourly[hour][rank].horses {
                assert!(used.insert(horse), "horse worked twice with a cap of 1");
            }
        }
    }
}

#[test]
fn test_empty_hour_list_yields_nothing() {
    let ctx = contested_context();
    let hourly = vec![vec![HourlySolution::empty()], Vec::new()];

    let outcome = HourSetCombiner::new(&ctx, &EngineConfig::default()).combine(&hourly);
    assert!(outcome.solutions.is_empty());
}

#[test]
fn test_no_hours_yields_one_empty_plan() {
    let ctx = QueryContext::build(&DayQuery::new(), &stable::horses(), &stable::riders(), 3)
        .unwrap();
    let outcome = HourSetCombiner::new(&ctx, &EngineConfig::default()).combine(&[]);

    assert_eq!(
        outcome.solutions,
        vec![DaySolution {
            ranks: Vec::new(),
            score: 0.0,
        }]
    );
}

#[test]
fn test_plan_limit_stops_expansion() {
    let ctx = contested_context();
    let config = EngineConfig::default().with_combine(CombineBudgetConfig {
        millis_per_hour_horse: 1,
        plans_per_milli: 0,
    });
    let hourly = search_all(&ctx, &config);

    let outcome = HourSetCombiner::new(&ctx, &config).combine(&hourly);
    assert_eq!(outcome.solutions.len(), 1);
    assert_eq!(outcome.solutions[0].ranks, vec![0, 1]);
    assert_eq!(outcome.stats.stop_reason, Some(StopReason::ResultLimit));
}
