//! Shared test fixtures for horsematch crates.
//!
//! This crate provides data only; it does not depend on the solver.
//!
//! - [`stable`] - the reference stable: seven horses and nine riders
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! horsematch-test = { workspace = true }
//! ```

pub mod stable;

pub use stable::{horses, prefs, rider, riders, HORSE_NAMES};
