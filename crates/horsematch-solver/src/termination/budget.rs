use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a search stopped before exhausting its search space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TimeLimit,
    ResultLimit,
    External,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::TimeLimit => write!(f, "time limit reached"),
            StopReason::ResultLimit => write!(f, "result limit reached"),
            StopReason::External => write!(f, "terminated externally"),
        }
    }
}

/// Cooperative time and result budget for one search run.
///
/// The clock is read only when `steps & clock_check_mask == 0`, so a search
/// may overrun its time limit by at most `clock_check_mask` steps.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use horsematch_solver::termination::{SearchBudget, StopReason};
///
/// let mut budget = SearchBudget::new(Duration::from_secs(5), 2, 0xFF);
/// assert!(budget.on_result());
/// assert!(!budget.on_result());
/// assert_eq!(budget.stop_reason(), Some(StopReason::ResultLimit));
/// ```
#[derive(Debug, Clone)]
pub struct SearchBudget {
    time_limit: Duration,
    result_limit: usize,
    clock_check_mask: u64,
    pub(super) start_time: Instant,
    steps: u64,
    results: usize,
    stopped: Option<StopReason>,
    terminate_flag: Option<Arc<AtomicBool>>,
}

impl SearchBudget {
    pub fn new(time_limit: Duration, result_limit: usize, clock_check_mask: u64) -> Self {
        Self {
            time_limit,
            result_limit: result_limit.max(1),
            clock_check_mask,
            start_time: Instant::now(),
            steps: 0,
            results: 0,
            stopped: None,
            terminate_flag: None,
        }
    }

    /// Also stops once `flag` is set by another thread.
    pub fn with_terminate_flag(mut self, flag: Option<Arc<AtomicBool>>) -> Self {
        self.terminate_flag = flag;
        self
    }

    /// Records one expansion step. Returns false once the search must stop.
    #[inline]
    pub fn on_step(&mut self) -> bool {
        if self.stopped.is_some() {
            return false;
        }
        self.steps = self.steps.wrapping_add(1);
        if self.steps & self.clock_check_mask == 0 {
            if self
                .terminate_flag
                .as_ref()
                .is_some_and(|f| f.load(Ordering::Relaxed))
            {
                self.stopped = Some(StopReason::External);
            } else if self.start_time.elapsed() >= self.time_limit {
                self.stopped = Some(StopReason::TimeLimit);
            }
        }
        self.stopped.is_none()
    }

    /// Records one accepted result. Returns false once the result limit is reached.
    #[inline]
    pub fn on_result(&mut self) -> bool {
        self.results += 1;
        if self.results >= self.result_limit && self.stopped.is_none() {
            self.stopped = Some(StopReason::ResultLimit);
        }
        self.stopped.is_none()
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stopped
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.is_some()
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    pub fn result_limit(&self) -> usize {
        self.result_limit
    }

    /// Snapshot of the counters for logging.
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            steps: self.steps,
            results: self.results,
            elapsed: self.start_time.elapsed(),
            stop_reason: self.stopped,
        }
    }
}

/// Counters of a finished search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Expansion steps taken.
    pub steps: u64,
    /// Results accepted.
    pub results: usize,
    pub elapsed: Duration,
    /// `None` when the search space was exhausted within budget.
    pub stop_reason: Option<StopReason>,
}

impl SearchStats {
    pub fn is_complete(&self) -> bool {
        self.stop_reason.is_none()
    }
}
