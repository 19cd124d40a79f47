//! horsematch - daily horse/rider matching engine
//!
//! Re-exports the public API of the workspace crates.
//!
//! # Example
//!
//! ```
//! use horsematch::{DayQuery, EngineConfig, Horse, Hour, InMemoryStable, MatchingEngine};
//! use horsematch::{Preferences, Rider};
//!
//! let stable = InMemoryStable::new(
//!     vec![Horse::new("Bella"), Horse::new("Lady")],
//!     vec![
//!         Rider::new("Maja", Preferences {
//!             best: vec!["Lady".into()],
//!             nice: vec!["Bella".into()],
//!             ..Preferences::default()
//!         }),
//!     ],
//! );
//! let engine = MatchingEngine::new(stable, EngineConfig::default());
//! let query = DayQuery::new().with_hour(Hour::new("10:00").with_training("Maja"));
//!
//! let plans = engine.try_compute_matches(&query).unwrap();
//! assert_eq!(plans[0].hours[0].horse_for("Maja"), Some("Lady"));
//! ```

pub use horsematch_config::{
    CombineBudgetConfig, ConfigError, EngineConfig, HourlyBudgetConfig, ThreadCount,
};
pub use horsematch_core::{
    Assignment, DayPlan, DayQuery, Horse, HorseScope, Hour, HourPlan, MatchError, MatchResponse,
    PrefCategory, Preferences, Rider, Training,
};
pub use horsematch_solver::{InMemoryStable, MatchingEngine, QueryPhase, StableStore};

pub mod solver {
    //! Engine internals for callers that drive the components directly.
    pub use horsematch_solver::{combine, hourly, index, ranker, termination};
}
