//! Search budgets.
//!
//! Both searches are bounded by a wall-clock limit and a result-count limit.
//! Running out of budget is never an error: the search stops and keeps what
//! it has found so far.

mod budget;

pub use budget::{SearchBudget, SearchStats, StopReason};

#[cfg(test)]
mod tests;
