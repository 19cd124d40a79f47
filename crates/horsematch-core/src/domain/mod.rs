//! Domain model for daily horse/rider matching.
//!
//! Stable entities ([`Horse`], [`Rider`]) are read-only inputs fetched from the
//! store. Query types describe one day of trainings, and plan types carry the
//! ranked result back to the caller.

mod horse;
mod plan;
mod query;
mod rider;

pub use horse::Horse;
pub use plan::{Assignment, DayPlan, HourPlan, MatchResponse};
pub use query::{DayQuery, Hour, Training};
pub use rider::{PrefCategory, Preferences, Rider};
