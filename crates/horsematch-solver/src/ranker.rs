//! Final ordering and formatting of day plans.

use horsematch_core::{Assignment, DayPlan, HourPlan, MatchError, Result};

use crate::combine::DaySolution;
use crate::hourly::HourlySolution;
use crate::index::QueryContext;

/// Sorts day solutions best first and turns them into caller-facing plans.
///
/// Scores are dropped from the output.
///
/// # Errors
///
/// [`MatchError::NoFeasiblePlan`] when `solutions` is empty.
pub fn rank(
    ctx: &QueryContext,
    hourly: &[Vec<HourlySolution>],
    mut solutions: Vec<DaySolution>,
) -> Result<Vec<DayPlan>> {
    if solutions.is_empty() {
        return Err(MatchError::NoFeasiblePlan);
    }
    solutions.sort_by(|a, b| a.score.total_cmp(&b.score));

    Ok(solutions
        .iter()
        .map(|solution| to_plan(ctx, hourly, solution))
        .collect())
}

fn to_plan(ctx: &QueryContext, hourly: &[Vec<HourlySolution>], solution: &DaySolution) -> DayPlan {
    let hours = ctx
        .hours()
        .iter()
        .zip(hourly)
        .zip(&solution.ranks)
        .map(|((hour, solutions), &rank)| HourPlan {
            slot: hour.slot.clone(),
            assignments: hour
                .riders
                .iter()
                .zip(&solutions[rank].horses)
                .map(|(&rider, &horse)| Assignment {
                    rider: ctx.rider_name(rider).to_string(),
                    horse: ctx.horse_name(horse).to_string(),
                })
                .collect(),
        })
        .collect();
    DayPlan { hours }
}

#[cfg(test)]
mod tests {
    use horsematch_core::{DayQuery, Horse, Hour, Rider};
    use horsematch_test::stable;
    use smallvec::smallvec;

    use super::*;

    fn context() -> QueryContext {
        let horses = vec![Horse::new("A"), Horse::new("B")];
        let riders = vec![
            Rider::new("r1", stable::prefs(&["A"], &["B"], &[], &[], &[])),
            Rider::new("r2", stable::prefs(&["B"], &["A"], &[], &[], &[])),
        ];
        let query = DayQuery::new()
            .with_hour(Hour::new("10:00").with_training("r1").with_training("r2"));
        QueryContext::build(&query, &horses, &riders, 3).unwrap()
    }

    #[test]
    fn test_rank_sorts_and_formats() {
        let ctx = context();
        let hourly = vec![vec![
            HourlySolution {
                horses: smallvec![0, 1],
                score: 2,
            },
            HourlySolution {
                horses: smallvec![1, 0],
                score: 10,
            },
        ]];
        let solutions = vec![
            DaySolution {
                ranks: vec![1],
                score: 10.0,
            },
            DaySolution {
                ranks: vec![0],
                score: 2.0,
            },
        ];

        let plans = rank(&ctx, &hourly, solutions).unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].hours[0].slot, "10:00");
        assert_eq!(plans[0].hours[0].horse_for("r1"), Some("A"));
        assert_eq!(plans[0].hours[0].horse_for("r2"), Some("B"));
        assert_eq!(plans[1].hours[0].horse_for("r1"), Some("B"));
    }

    #[test]
    fn test_rank_empty_is_no_feasible_plan() {
        let ctx = context();
        assert_eq!(rank(&ctx, &[], Vec::new()), Err(MatchError::NoFeasiblePlan));
    }
}
