use serde::{Deserialize, Serialize};

/// A stable horse that can be assigned to trainings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Horse {
    /// Unique name within the stable.
    pub name: String,
    /// Maximum number of hours this horse may work in one day.
    ///
    /// `None` falls back to the engine default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_daily_workload: Option<u32>,
}

impl Horse {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_daily_workload: None,
        }
    }

    pub fn with_max_daily_workload(mut self, workload: u32) -> Self {
        self.max_daily_workload = Some(workload);
        self
    }
}
