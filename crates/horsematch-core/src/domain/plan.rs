use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// A rider paired with a horse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub rider: String,
    pub horse: String,
}

/// Assignments for every training of one hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourPlan {
    pub slot: String,
    pub assignments: Vec<Assignment>,
}

impl HourPlan {
    /// Horse assigned to `rider` in this hour.
    pub fn horse_for(&self, rider: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.rider == rider)
            .map(|a| a.horse.as_str())
    }
}

/// A complete day plan, one [`HourPlan`] per queried hour in query order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub hours: Vec<HourPlan>,
}

impl DayPlan {
    /// Number of hours `horse` works in this plan.
    pub fn workload(&self, horse: &str) -> usize {
        self.hours
            .iter()
            .flat_map(|h| &h.assignments)
            .filter(|a| a.horse == horse)
            .count()
    }
}

/// Caller-facing outcome of a matching query.
///
/// `error_msg` is set, and `results` empty, exactly when the query failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub results: Vec<DayPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
}

impl From<crate::error::Result<Vec<DayPlan>>> for MatchResponse {
    fn from(result: crate::error::Result<Vec<DayPlan>>) -> Self {
        match result {
            Ok(results) => Self {
                results,
                error_msg: None,
            },
            Err(err) => Self::from(err),
        }
    }
}

impl From<MatchError> for MatchResponse {
    fn from(err: MatchError) -> Self {
        Self {
            results: Vec::new(),
            error_msg: Some(err.to_string()),
        }
    }
}
