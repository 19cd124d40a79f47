//! Error types for the matching engine

use std::fmt;

use thiserror::Error;

/// Which horse count fell short of the number of requested trainings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorseScope {
    /// Every horse in the stable, before daily excludes.
    Stable,
    /// Horses left after removing the daily excludes.
    Available,
}

impl fmt::Display for HorseScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HorseScope::Stable => write!(f, "all horses in stable"),
            HorseScope::Available => write!(f, "horses available"),
        }
    }
}

/// Main error type for matching operations.
///
/// Every variant except [`MatchError::NoFeasiblePlan`] is raised before any
/// search work begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Fewer horses than trainings requested for the day.
    #[error("{scope}: {available} is less than required: {required}")]
    InsufficientHorses {
        scope: HorseScope,
        available: usize,
        required: usize,
    },

    /// Riders whose preference categories do not cover the available horses exactly.
    #[error("preferences for: {} is/are incomplete or incorrect", .0.join(", "))]
    IncompletePreferences(Vec<String>),

    /// Riders named by a training but missing from the stable roster.
    #[error("unknown riders in query: {}", .0.join(", "))]
    UnknownRiders(Vec<String>),

    /// The same rider was requested twice within one hour.
    #[error("rider {rider} is booked more than once at {slot}")]
    DuplicateTraining { slot: String, rider: String },

    /// Search finished without a single plan honoring the daily constraints.
    #[error("could not find any feasible day plan")]
    NoFeasiblePlan,

    /// The stable store failed to deliver horses or riders.
    #[error("store error: {0}")]
    Store(String),

    /// The engine configuration cannot be used.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MatchError {
    /// Returns true for failures detected before searching.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MatchError::InsufficientHorses { .. }
                | MatchError::IncompletePreferences(_)
                | MatchError::UnknownRiders(_)
                | MatchError::DuplicateTraining { .. }
        )
    }
}

/// Result type alias for matching operations
pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_horses_message() {
        let err = MatchError::InsufficientHorses {
            scope: HorseScope::Available,
            available: 4,
            required: 6,
        };
        assert_eq!(err.to_string(), "horses available: 4 is less than required: 6");
        assert!(err.is_validation());
    }

    #[test]
    fn test_incomplete_preferences_lists_riders() {
        let err = MatchError::IncompletePreferences(vec!["Maja".into(), "Paula".into()]);
        assert_eq!(
            err.to_string(),
            "preferences for: Maja, Paula is/are incomplete or incorrect"
        );
    }

    #[test]
    fn test_no_feasible_plan_is_not_validation() {
        assert!(!MatchError::NoFeasiblePlan.is_validation());
    }
}
