//! Day plan combination.
//!
//! Picks one ranked solution per hour. Combinations are expanded best first,
//! a k-way merge over the hourly lists: starting from every hour's best
//! solution, each popped combination queues its successors that advance
//! exactly one hour to its next solution. Combinations working a horse more
//! often than its daily cap are dropped, but their successors are still
//! explored.

mod frontier;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use horsematch_config::{CombineBudgetConfig, EngineConfig};
use tracing::{debug, trace};

use crate::hourly::HourlySolution;
use crate::index::QueryContext;
use crate::termination::{SearchBudget, SearchStats};

use frontier::{Frontier, FrontierNode};

/// A whole-day choice of hourly solutions.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySolution {
    /// Index into each hour's ranked solution list.
    pub ranks: Vec<usize>,
    /// Sum of the normalized scores of the chosen solutions.
    pub score: f64,
}

/// Accepted day solutions in non-decreasing score order.
#[derive(Debug, Clone)]
pub struct CombineOutcome {
    pub solutions: Vec<DaySolution>,
    pub stats: SearchStats,
}

/// Rescales the frequency part of an hourly score by training density.
///
/// With `stride = n²`, the category part `s - s mod n²` is kept and the
/// remainder is divided by `trainings²`, so hours with many trainings compare
/// fairly against hours with few.
///
/// # Example
///
/// ```
/// use horsematch_solver::combine::normalize;
///
/// assert_eq!(normalize(107, 2, 49), 98.0 + 9.0 / 4.0);
/// assert_eq!(normalize(0, 0, 49), 0.0);
/// ```
pub fn normalize(score: u64, trainings: usize, stride: u64) -> f64 {
    if trainings == 0 {
        return score as f64;
    }
    let fine = score % stride;
    let density = (trainings as f64).powi(2);
    (score - fine) as f64 + fine as f64 / density
}

/// Merges hourly solution lists into ranked day solutions.
#[derive(Debug, Clone)]
pub struct HourSetCombiner<'a> {
    ctx: &'a QueryContext,
    budget: CombineBudgetConfig,
    clock_check_mask: u64,
    terminate_flag: Option<Arc<AtomicBool>>,
}

impl<'a> HourSetCombiner<'a> {
    pub fn new(ctx: &'a QueryContext, config: &EngineConfig) -> Self {
        Self {
            ctx,
            budget: config.combine,
            clock_check_mask: config.clock_check_mask(),
            terminate_flag: None,
        }
    }

    pub fn with_terminate_flag(mut self, flag: Option<Arc<AtomicBool>>) -> Self {
        self.terminate_flag = flag;
        self
    }

    /// Combines `hourly`, one ranked list per query hour, into day solutions.
    ///
    /// Returns nothing when any hour has no solution.
    pub fn combine(&self, hourly: &[Vec<HourlySolution>]) -> CombineOutcome {
        let hour_count = hourly.len();
        let horse_count = self.ctx.horse_count();
        let mut budget = SearchBudget::new(
            self.budget.time_limit(hour_count, horse_count),
            self.budget.plan_limit(hour_count, horse_count),
            self.clock_check_mask,
        )
        .with_terminate_flag(self.terminate_flag.clone());

        if let Some(hour) = hourly.iter().position(Vec::is_empty) {
            debug!(
                event = "combine_skipped",
                slot = %self.ctx.hours()[hour].slot,
                "hour has no complete assignment"
            );
            return CombineOutcome {
                solutions: Vec::new(),
                stats: budget.stats(),
            };
        }

        let normalized = self.normalized_scores(hourly);
        let start = vec![0; hour_count];
        let mut frontier = Frontier::default();
        frontier.push(FrontierNode {
            score: total_score(&normalized, &start),
            ranks: start,
        });

        let mut usage = vec![0u32; horse_count];
        let mut solutions = Vec::new();
        let mut rejected = 0u64;

        while budget.on_step() {
            let Some(node) = frontier.pop() else {
                break;
            };

            for hour in 0..hour_count {
                let next = node.ranks[hour] + 1;
                if next < hourly[hour].len() {
                    let mut ranks = node.ranks.clone();
                    ranks[hour] = next;
                    frontier.push(FrontierNode {
                        score: total_score(&normalized, &ranks),
                        ranks,
                    });
                }
            }

            if !self.within_workload(hourly, &node.ranks, &mut usage) {
                rejected += 1;
                continue;
            }

            trace!(event = "plan_accepted", score = node.score, ranks = ?node.ranks);
            solutions.push(DaySolution {
                ranks: node.ranks,
                score: node.score,
            });
            if !budget.on_result() {
                break;
            }
        }

        let stats = budget.stats();
        debug!(
            event = "hours_combined",
            hours = hour_count,
            plans = solutions.len(),
            rejected,
            pending = frontier.len(),
            steps = stats.steps,
            duration_ms = stats.elapsed.as_millis() as u64,
            stopped = ?stats.stop_reason,
        );

        CombineOutcome { solutions, stats }
    }

    fn normalized_scores(&self, hourly: &[Vec<HourlySolution>]) -> Vec<Vec<f64>> {
        let stride = self.ctx.penalties().stride();
        hourly
            .iter()
            .zip(self.ctx.hours())
            .map(|(solutions, hour)| {
                solutions
                    .iter()
                    .map(|s| normalize(s.score, hour.training_count(), stride))
                    .collect()
            })
            .collect()
    }

    /// True when no horse works more hours than its cap. `usage` is scratch space.
    fn within_workload(
        &self,
        hourly: &[Vec<HourlySolution>],
        ranks: &[usize],
        usage: &mut [u32],
    ) -> bool {
        usage.fill(0);
        for (solutions, &rank) in hourly.iter().zip(ranks) {
            for &horse in &solutions[rank].horses {
                usage[horse] += 1;
                if usage[horse] > self.ctx.workload_cap(horse) {
                    return false;
                }
            }
        }
        true
    }
}

/// Sum of the chosen normalized scores, always added in hour order so equal
/// rank vectors get bit-identical totals.
fn total_score(normalized: &[Vec<f64>], ranks: &[usize]) -> f64 {
    normalized
        .iter()
        .zip(ranks)
        .map(|(scores, &rank)| scores[rank])
        .sum()
}

#[cfg(test)]
mod tests;
