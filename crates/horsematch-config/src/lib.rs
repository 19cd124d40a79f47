//! Configuration system for horsematch.
//!
//! Load engine configuration from TOML or YAML files to tune search budgets
//! without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use horsematch_config::EngineConfig;
//! use std::time::Duration;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     default_max_daily_workload = 2
//!
//!     [hourly]
//!     millis_per_training = 80
//!
//!     [combine]
//!     plans_per_milli = 5
//! "#).unwrap();
//!
//! assert_eq!(config.hourly.time_limit(3), Duration::from_millis(240));
//! assert_eq!(config.default_max_daily_workload, 2);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use horsematch_config::EngineConfig;
//!
//! let config = EngineConfig::load("horsematch.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Budget of the per-hour backtracking search.
    #[serde(default)]
    pub hourly: HourlyBudgetConfig,

    /// Budget of the whole-day combination search.
    #[serde(default)]
    pub combine: CombineBudgetConfig,

    /// Workload cap for horses that do not declare their own.
    #[serde(default = "default_max_daily_workload")]
    pub default_max_daily_workload: u32,

    /// Deadlines are checked once every this many expansion steps.
    ///
    /// Must be a power of two.
    #[serde(default = "default_clock_check_interval")]
    pub clock_check_interval: u64,

    /// Number of workers running hourly searches.
    #[serde(default)]
    pub thread_count: ThreadCount,
}

fn default_max_daily_workload() -> u32 {
    3
}

fn default_clock_check_interval() -> u64 {
    256
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hourly: HourlyBudgetConfig::default(),
            combine: CombineBudgetConfig::default(),
            default_max_daily_workload: default_max_daily_workload(),
            clock_check_interval: default_clock_check_interval(),
            thread_count: ThreadCount::default(),
        }
    }
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`EngineConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot drive a search.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.clock_check_interval.is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "clock_check_interval must be a power of two, got {}",
                self.clock_check_interval
            )));
        }
        if self.thread_count == ThreadCount::Count(0) {
            return Err(ConfigError::Invalid(
                "thread_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the hourly search budget.
    pub fn with_hourly(mut self, hourly: HourlyBudgetConfig) -> Self {
        self.hourly = hourly;
        self
    }

    /// Sets the combination search budget.
    pub fn with_combine(mut self, combine: CombineBudgetConfig) -> Self {
        self.combine = combine;
        self
    }

    /// Sets the default daily workload cap.
    pub fn with_default_max_daily_workload(mut self, workload: u32) -> Self {
        self.default_max_daily_workload = workload;
        self
    }

    /// Sets the worker count for hourly searches.
    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.thread_count = thread_count;
        self
    }

    /// Bitmask derived from [`EngineConfig::clock_check_interval`].
    ///
    /// A step counter `s` hits a deadline check when `s & mask == 0`.
    pub fn clock_check_mask(&self) -> u64 {
        self.clock_check_interval.saturating_sub(1)
    }
}

/// Budget of the hourly search, scaled by the number of trainings in the hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HourlyBudgetConfig {
    /// Milliseconds of search per training in the hour.
    #[serde(default = "default_millis_per_training")]
    pub millis_per_training: u64,

    /// Solutions kept per millisecond of budget.
    #[serde(default = "default_solutions_per_milli")]
    pub solutions_per_milli: u64,
}

fn default_millis_per_training() -> u64 {
    50
}

fn default_solutions_per_milli() -> u64 {
    20
}

impl Default for HourlyBudgetConfig {
    fn default() -> Self {
        Self {
            millis_per_training: default_millis_per_training(),
            solutions_per_milli: default_solutions_per_milli(),
        }
    }
}

impl HourlyBudgetConfig {
    /// Wall-clock budget for an hour with `trainings` trainings.
    pub fn time_limit(&self, trainings: usize) -> Duration {
        Duration::from_millis(self.millis_per_training.saturating_mul(trainings as u64))
    }

    /// Maximum number of solutions kept for an hour with `trainings` trainings.
    pub fn solution_limit(&self, trainings: usize) -> usize {
        let millis = self.time_limit(trainings).as_millis() as u64;
        usize::try_from(self.solutions_per_milli.saturating_mul(millis)).unwrap_or(usize::MAX)
    }
}

/// Budget of the combination search, scaled by hours and available horses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CombineBudgetConfig {
    /// Milliseconds of search per hour per available horse.
    #[serde(default = "default_millis_per_hour_horse")]
    pub millis_per_hour_horse: u64,

    /// Day plans kept per millisecond of budget.
    #[serde(default = "default_plans_per_milli")]
    pub plans_per_milli: u64,
}

fn default_millis_per_hour_horse() -> u64 {
    100
}

fn default_plans_per_milli() -> u64 {
    20
}

impl Default for CombineBudgetConfig {
    fn default() -> Self {
        Self {
            millis_per_hour_horse: default_millis_per_hour_horse(),
            plans_per_milli: default_plans_per_milli(),
        }
    }
}

impl CombineBudgetConfig {
    /// Wall-clock budget for combining `hours` hours over `horses` available horses.
    pub fn time_limit(&self, hours: usize, horses: usize) -> Duration {
        let millis = self
            .millis_per_hour_horse
            .saturating_mul(hours as u64)
            .saturating_mul(horses as u64);
        Duration::from_millis(millis)
    }

    /// Maximum number of day plans kept.
    pub fn plan_limit(&self, hours: usize, horses: usize) -> usize {
        let millis = self.time_limit(hours, horses).as_millis() as u64;
        usize::try_from(self.plans_per_milli.saturating_mul(millis)).unwrap_or(usize::MAX)
    }
}

/// Worker count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Use the shared worker pool sized to the machine.
    #[default]
    Auto,

    /// Search hours one after another on the calling thread.
    None,

    /// Specific number of workers.
    Count(usize),
}
