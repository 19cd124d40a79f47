//! horsematch solver - the daily horse/rider matching engine
//!
//! A query flows through four components, each using only the output of the
//! one before it:
//! - [`index`]: validation, penalty scores and per-rider search orders
//! - [`hourly`]: bounded backtracking search, one run per hour
//! - [`combine`]: best-first combination of hours into day plans under the
//!   daily workload cap
//! - [`ranker`]: best-first ordering and formatting of the result
//!
//! [`MatchingEngine`] wires them together behind `compute_matches`.

pub mod combine;
pub mod engine;
pub mod hourly;
pub mod index;
pub mod ranker;
pub mod store;
pub mod termination;

pub use combine::{normalize, CombineOutcome, DaySolution, HourSetCombiner};
pub use engine::{MatchingEngine, QueryPhase};
pub use hourly::{HourlyOutcome, HourlySolution, HourlySolver};
pub use index::{HorseId, IndexedHour, PenaltyTable, QueryContext, RiderId};
pub use store::{InMemoryStable, StableStore};
pub use termination::{SearchBudget, SearchStats, StopReason};
