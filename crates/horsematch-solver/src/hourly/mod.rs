//! Hourly search.
//!
//! Depth-first backtracking over the trainings of one hour. Each training
//! tries its rider's horses in search order, skipping horses already taken in
//! the partial assignment and horses excluded for the hour. Every complete
//! assignment is recorded and the search continues until the space or the
//! budget runs out.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use horsematch_config::{EngineConfig, HourlyBudgetConfig};
use smallvec::SmallVec;
use tracing::debug;

use crate::index::{HorseId, IndexedHour, QueryContext};
use crate::termination::{SearchBudget, SearchStats};

/// A complete assignment for one hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlySolution {
    /// Horse of each training, in the hour's training order.
    pub horses: SmallVec<[HorseId; 8]>,
    /// Sum of the penalties of every assignment.
    pub score: u64,
}

impl HourlySolution {
    /// The solution of an hour without trainings.
    pub fn empty() -> Self {
        Self {
            horses: SmallVec::new(),
            score: 0,
        }
    }
}

/// Ranked solutions of one hour, best first.
#[derive(Debug, Clone)]
pub struct HourlyOutcome {
    pub solutions: Vec<HourlySolution>,
    pub stats: SearchStats,
}

/// Runs the bounded search for single hours of a query.
///
/// Holds only shared references, so one solver can serve several hours
/// concurrently.
#[derive(Debug, Clone)]
pub struct HourlySolver<'a> {
    ctx: &'a QueryContext,
    budget: HourlyBudgetConfig,
    clock_check_mask: u64,
    terminate_flag: Option<Arc<AtomicBool>>,
}

impl<'a> HourlySolver<'a> {
    pub fn new(ctx: &'a QueryContext, config: &EngineConfig) -> Self {
        Self {
            ctx,
            budget: config.hourly,
            clock_check_mask: config.clock_check_mask(),
            terminate_flag: None,
        }
    }

    pub fn with_terminate_flag(mut self, flag: Option<Arc<AtomicBool>>) -> Self {
        self.terminate_flag = flag;
        self
    }

    /// Searches hour `index` of the query.
    ///
    /// Returns solutions sorted ascending by score; equal scores keep the
    /// order in which depth-first search reached them. An hour without
    /// trainings yields one empty solution. An hour without any complete
    /// assignment yields none.
    pub fn solve(&self, index: usize) -> HourlyOutcome {
        let hour = &self.ctx.hours()[index];
        let trainings = hour.training_count();
        let budget = SearchBudget::new(
            self.budget.time_limit(trainings),
            self.budget.solution_limit(trainings),
            self.clock_check_mask,
        )
        .with_terminate_flag(self.terminate_flag.clone());

        if trainings == 0 {
            let mut budget = budget;
            budget.on_result();
            return HourlyOutcome {
                solutions: vec![HourlySolution::empty()],
                stats: budget.stats(),
            };
        }

        let mut search = Backtrack {
            ctx: self.ctx,
            hour,
            taken: vec![false; self.ctx.horse_count()],
            partial: SmallVec::new(),
            score: 0,
            found: Vec::new(),
            budget,
        };
        search.descend(0);

        let Backtrack {
            mut found, budget, ..
        } = search;
        found.sort_by_key(|s| s.score);
        let stats = budget.stats();

        debug!(
            event = "hour_searched",
            slot = %hour.slot,
            trainings,
            solutions = found.len(),
            best_score = ?found.first().map(|s| s.score),
            steps = stats.steps,
            duration_ms = stats.elapsed.as_millis() as u64,
            stopped = ?stats.stop_reason,
        );

        HourlyOutcome {
            solutions: found,
            stats,
        }
    }
}

/// Mutable state of one hour's search.
struct Backtrack<'a> {
    ctx: &'a QueryContext,
    hour: &'a IndexedHour,
    taken: Vec<bool>,
    partial: SmallVec<[HorseId; 8]>,
    score: u64,
    found: Vec<HourlySolution>,
    budget: SearchBudget,
}

impl Backtrack<'_> {
    /// Assigns training `depth` and everything after it. Returns false once
    /// the budget is spent.
    fn descend(&mut self, depth: usize) -> bool {
        if !self.budget.on_step() {
            return false;
        }
        if depth == self.hour.training_count() {
            self.found.push(HourlySolution {
                horses: self.partial.clone(),
                score: self.score,
            });
            return self.budget.on_result();
        }

        let ctx = self.ctx;
        let hour = self.hour;
        let rider = hour.riders[depth];
        for &horse in ctx.search_order(rider) {
            if self.taken[horse] || hour.excluded[horse] {
                continue;
            }
            let Some(penalty) = ctx.penalties().get(rider, horse) else {
                continue;
            };

            self.taken[horse] = true;
            self.partial.push(horse);
            self.score += penalty;

            let keep_going = self.descend(depth + 1);

            self.score -= penalty;
            self.partial.pop();
            self.taken[horse] = false;

            if !keep_going {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests;
