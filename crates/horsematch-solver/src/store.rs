//! Access to the stable roster.
//!
//! The engine reads horses and riders once per query, before any search.

use std::path::Path;

use horsematch_core::{Horse, MatchError, Result, Rider};
use serde::{Deserialize, Serialize};

/// Read-only source of the stable roster.
pub trait StableStore: Send + Sync {
    fn find_horses(&self) -> Result<Vec<Horse>>;

    fn find_riders(&self) -> Result<Vec<Rider>>;
}

impl<T: StableStore + ?Sized> StableStore for &T {
    fn find_horses(&self) -> Result<Vec<Horse>> {
        (**self).find_horses()
    }

    fn find_riders(&self) -> Result<Vec<Rider>> {
        (**self).find_riders()
    }
}

/// A roster held in memory, loadable from a JSON document of the form
/// `{"horses": [...], "riders": [...]}`.
///
/// # Example
///
/// ```
/// use horsematch_solver::store::{InMemoryStable, StableStore};
///
/// let stable = InMemoryStable::from_json_str(r#"{
///     "horses": [{"name": "Bella", "maxDailyWorkload": 2}],
///     "riders": [{"name": "Maja", "prefs": {"best": ["Bella"]}}]
/// }"#).unwrap();
///
/// assert_eq!(stable.find_horses().unwrap()[0].max_daily_workload, Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryStable {
    #[serde(default)]
    pub horses: Vec<Horse>,
    #[serde(default)]
    pub riders: Vec<Rider>,
}

impl InMemoryStable {
    pub fn new(horses: Vec<Horse>, riders: Vec<Rider>) -> Self {
        Self { horses, riders }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| MatchError::Store(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| MatchError::Store(e.to_string()))?;
        Self::from_json_str(&contents)
    }
}

impl StableStore for InMemoryStable {
    fn find_horses(&self) -> Result<Vec<Horse>> {
        Ok(self.horses.clone())
    }

    fn find_riders(&self) -> Result<Vec<Rider>> {
        Ok(self.riders.clone())
    }
}
