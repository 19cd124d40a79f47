//! The matching engine entry point.
//!
//! A query moves through `Validating -> Indexing -> HourlySearching ->
//! Combining -> Done`, or ends in `Failed` when validation rejects it. Hours
//! are searched in parallel and joined before combination starts.
//!
//! Logging levels:
//! - **INFO**: Query start/end, phase summaries
//! - **DEBUG**: Per-hour search results, combiner counters
//! - **TRACE**: Individual accepted day plans

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use horsematch_config::{EngineConfig, ThreadCount};
use horsematch_core::{DayPlan, DayQuery, MatchError, MatchResponse, Result};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::combine::HourSetCombiner;
use crate::hourly::{HourlyOutcome, HourlySolution, HourlySolver};
use crate::index::QueryContext;
use crate::ranker;
use crate::store::StableStore;

/// Lifecycle state of one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    Validating,
    Indexing,
    HourlySearching,
    Combining,
    Done,
    Failed,
}

impl fmt::Display for QueryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryPhase::Validating => "validating",
            QueryPhase::Indexing => "indexing",
            QueryPhase::HourlySearching => "hourly_searching",
            QueryPhase::Combining => "combining",
            QueryPhase::Done => "done",
            QueryPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Computes ranked day plans for day queries.
///
/// The engine keeps no state between queries; concurrent calls share nothing
/// but the store and the configuration.
///
/// # Example
///
/// ```
/// use horsematch_config::EngineConfig;
/// use horsematch_core::{DayQuery, Horse, Hour, Preferences, Rider};
/// use horsematch_solver::{InMemoryStable, MatchingEngine};
///
/// let stable = InMemoryStable::new(
///     vec![Horse::new("Bella"), Horse::new("Lady")],
///     vec![Rider::new("Maja", Preferences::new_rider(["Bella", "Lady"]))],
/// );
/// let engine = MatchingEngine::new(stable, EngineConfig::default());
///
/// let query = DayQuery::new().with_hour(Hour::new("10:00").with_training("Maja"));
/// let response = engine.compute_matches(&query);
///
/// assert!(response.error_msg.is_none());
/// assert_eq!(response.results.len(), 2);
/// ```
#[derive(Debug)]
pub struct MatchingEngine<S> {
    store: S,
    config: EngineConfig,
    terminate_flag: Option<Arc<AtomicBool>>,
}

impl<S: StableStore> MatchingEngine<S> {
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            terminate_flag: None,
        }
    }

    /// Stops running searches once `flag` is set, keeping what was found.
    pub fn with_terminate_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_flag = Some(flag);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Matches `query`, folding any failure into the response message.
    pub fn compute_matches(&self, query: &DayQuery) -> MatchResponse {
        MatchResponse::from(self.try_compute_matches(query))
    }

    /// Matches `query`, returning plans best first.
    ///
    /// # Errors
    ///
    /// Validation errors from [`QueryContext::build`], store failures, and
    /// [`MatchError::NoFeasiblePlan`] when search finds nothing.
    pub fn try_compute_matches(&self, query: &DayQuery) -> Result<Vec<DayPlan>> {
        let started = Instant::now();
        info!(
            event = "query_start",
            hours = query.hours.len(),
            trainings = query.required_slots(),
            daily_excludes = query.daily_excludes.len(),
        );

        let result = self.run(query);
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(plans) => info!(
                event = "query_end",
                phase = %QueryPhase::Done,
                plans = plans.len(),
                duration_ms,
            ),
            Err(MatchError::NoFeasiblePlan) => info!(
                event = "query_end",
                phase = %QueryPhase::Done,
                plans = 0u64,
                duration_ms,
            ),
            Err(err) => warn!(
                event = "query_end",
                phase = %QueryPhase::Failed,
                error = %err,
                duration_ms,
            ),
        }
        result
    }

    fn run(&self, query: &DayQuery) -> Result<Vec<DayPlan>> {
        debug!(event = "phase_start", phase = %QueryPhase::Validating);
        let horses = self.store.find_horses()?;
        let riders = self.store.find_riders()?;

        debug!(event = "phase_start", phase = %QueryPhase::Indexing);
        let ctx = QueryContext::build(
            query,
            &horses,
            &riders,
            self.config.default_max_daily_workload,
        )?;
        info!(
            event = "phase_end",
            phase = %QueryPhase::Indexing,
            available_horses = ctx.horse_count(),
            riders = ctx.riders().len(),
        );

        let hourly = self.search_hours(&ctx)?;

        debug!(event = "phase_start", phase = %QueryPhase::Combining);
        let started = Instant::now();
        let outcome = HourSetCombiner::new(&ctx, &self.config)
            .with_terminate_flag(self.terminate_flag.clone())
            .combine(&hourly);
        info!(
            event = "phase_end",
            phase = %QueryPhase::Combining,
            plans = outcome.solutions.len(),
            best_score = ?outcome.solutions.first().map(|s| s.score),
            complete = outcome.stats.is_complete(),
            duration_ms = started.elapsed().as_millis() as u64,
        );

        ranker::rank(&ctx, &hourly, outcome.solutions)
    }

    /// Searches every hour, one task per hour, and waits for all of them.
    fn search_hours(&self, ctx: &QueryContext) -> Result<Vec<Vec<HourlySolution>>> {
        debug!(event = "phase_start", phase = %QueryPhase::HourlySearching);
        let started = Instant::now();
        let solver =
            HourlySolver::new(ctx, &self.config).with_terminate_flag(self.terminate_flag.clone());
        let hours = 0..ctx.hours().len();

        let outcomes: Vec<HourlyOutcome> = match self.config.thread_count {
            ThreadCount::None => hours.map(|i| solver.solve(i)).collect(),
            ThreadCount::Auto => hours.into_par_iter().map(|i| solver.solve(i)).collect(),
            ThreadCount::Count(workers) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .build()
                    .map_err(|e| MatchError::Config(e.to_string()))?;
                pool.install(|| hours.into_par_iter().map(|i| solver.solve(i)).collect())
            }
        };

        info!(
            event = "phase_end",
            phase = %QueryPhase::HourlySearching,
            hours = outcomes.len(),
            solutions = outcomes.iter().map(|o| o.solutions.len()).sum::<usize>(),
            truncated_hours = outcomes.iter().filter(|o| !o.stats.is_complete()).count(),
            duration_ms = started.elapsed().as_millis() as u64,
        );

        Ok(outcomes.into_iter().map(|o| o.solutions).collect())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
