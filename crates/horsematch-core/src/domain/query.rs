use serde::{Deserialize, Serialize};

/// One rider needing one horse in a given hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    #[serde(rename = "kidName")]
    pub rider: String,
}

impl Training {
    pub fn new(rider: impl Into<String>) -> Self {
        Self {
            rider: rider.into(),
        }
    }
}

/// Trainings sharing one time slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hour {
    /// Label of the slot, e.g. `"10:00"`.
    pub slot: String,
    #[serde(default, rename = "trainingsDetails")]
    pub trainings: Vec<Training>,
    /// Horses unavailable for this hour only.
    #[serde(default)]
    pub excludes: Vec<String>,
}

impl Hour {
    pub fn new(slot: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            ..Self::default()
        }
    }

    pub fn with_training(mut self, rider: impl Into<String>) -> Self {
        self.trainings.push(Training::new(rider));
        self
    }

    pub fn with_exclude(mut self, horse: impl Into<String>) -> Self {
        self.excludes.push(horse.into());
        self
    }
}

/// A whole day of trainings to match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayQuery {
    #[serde(default)]
    pub hours: Vec<Hour>,
    /// Horses unavailable for the whole day (e.g. injured).
    #[serde(default)]
    pub daily_excludes: Vec<String>,
}

impl DayQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hour(mut self, hour: Hour) -> Self {
        self.hours.push(hour);
        self
    }

    pub fn with_daily_exclude(mut self, horse: impl Into<String>) -> Self {
        self.daily_excludes.push(horse.into());
        self
    }

    /// Number of trainings across all hours.
    pub fn required_slots(&self) -> usize {
        self.hours.iter().map(|h| h.trainings.len()).sum()
    }

    /// Distinct riders in first-appearance order.
    pub fn distinct_riders(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for training in self.hours.iter().flat_map(|h| &h.trainings) {
            if !seen.contains(&training.rider.as_str()) {
                seen.push(training.rider.as_str());
            }
        }
        seen
    }
}
