//! horsematch core - domain types and errors for the matching engine
//!
//! This crate provides the vocabulary shared by the engine crates:
//! - Stable entities: [`Horse`], [`Rider`] and their [`Preferences`]
//! - Query types: [`DayQuery`], [`Hour`], [`Training`]
//! - Result types: [`DayPlan`], [`HourPlan`], [`Assignment`] and the
//!   caller-facing [`MatchResponse`]
//! - The error taxonomy in [`error`]

pub mod domain;
pub mod error;

pub use domain::{
    Assignment, DayPlan, DayQuery, Horse, Hour, HourPlan, MatchResponse, PrefCategory,
    Preferences, Rider, Training,
};
pub use error::{HorseScope, MatchError, Result};
