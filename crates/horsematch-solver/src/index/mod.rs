//! Preference indexing.
//!
//! Turns a [`DayQuery`] and the stable roster into an immutable
//! [`QueryContext`]: available horses, per-rider penalties and search orders,
//! and the hours rewritten in terms of dense ids. All validation happens here,
//! before any search work begins.

mod penalty;

use std::collections::{HashMap, HashSet};

use horsematch_core::{DayQuery, Horse, HorseScope, MatchError, PrefCategory, Result, Rider};
use tracing::{debug, warn};

pub use penalty::PenaltyTable;

use penalty::{CategorizedHorses, ACTIVE_CATEGORIES};

/// Dense index into [`QueryContext::horses`].
pub type HorseId = usize;

/// Dense index into [`QueryContext::riders`].
pub type RiderId = usize;

/// One hour of the query in terms of dense ids.
#[derive(Debug, Clone)]
pub struct IndexedHour {
    pub slot: String,
    /// Rider of each training, in query order.
    pub riders: Vec<RiderId>,
    /// `excluded[h]` is true when horse `h` may not work this hour.
    pub excluded: Vec<bool>,
}

impl IndexedHour {
    pub fn training_count(&self) -> usize {
        self.riders.len()
    }
}

/// Everything the searches need for one query. Built once, then shared
/// read-only between hour searches.
#[derive(Debug, Clone)]
pub struct QueryContext {
    horses: Vec<String>,
    workload_caps: Vec<u32>,
    riders: Vec<String>,
    penalties: PenaltyTable,
    search_orders: Vec<Vec<HorseId>>,
    hours: Vec<IndexedHour>,
}

impl QueryContext {
    /// Validates `query` against the roster and builds the indexes.
    ///
    /// # Errors
    ///
    /// - [`MatchError::InsufficientHorses`] when the stable, or the horses left
    ///   after daily excludes, cannot cover every training
    /// - [`MatchError::UnknownRiders`] when a training names a rider missing from the roster
    /// - [`MatchError::DuplicateTraining`] when a rider is booked twice in one hour
    /// - [`MatchError::IncompletePreferences`] when a rider's categories do not
    ///   cover the available horses exactly
    pub fn build(
        query: &DayQuery,
        roster_horses: &[Horse],
        roster_riders: &[Rider],
        default_max_daily_workload: u32,
    ) -> Result<Self> {
        let required = query.required_slots();
        if roster_horses.len() < required {
            return Err(MatchError::InsufficientHorses {
                scope: HorseScope::Stable,
                available: roster_horses.len(),
                required,
            });
        }

        let daily_excludes: HashSet<&str> =
            query.daily_excludes.iter().map(String::as_str).collect();
        let mut names = HashSet::new();
        let available: Vec<&Horse> = roster_horses
            .iter()
            .filter(|h| !daily_excludes.contains(h.name.as_str()) && names.insert(h.name.as_str()))
            .collect();
        if available.len() < required {
            return Err(MatchError::InsufficientHorses {
                scope: HorseScope::Available,
                available: available.len(),
                required,
            });
        }

        let horse_ids: HashMap<&str, HorseId> = available
            .iter()
            .enumerate()
            .map(|(id, h)| (h.name.as_str(), id))
            .collect();

        let roster: HashMap<&str, &Rider> =
            roster_riders.iter().map(|r| (r.name.as_str(), r)).collect();
        let rider_names = query.distinct_riders();
        let unknown: Vec<String> = rider_names
            .iter()
            .filter(|name| !roster.contains_key(*name))
            .map(|name| name.to_string())
            .collect();
        if !unknown.is_empty() {
            warn!(event = "validation_failed", reason = "unknown_riders", riders = ?unknown);
            return Err(MatchError::UnknownRiders(unknown));
        }
        let rider_ids: HashMap<&str, RiderId> = rider_names
            .iter()
            .enumerate()
            .map(|(id, &name)| (name, id))
            .collect();

        let mut hours = Vec::with_capacity(query.hours.len());
        for hour in &query.hours {
            let mut riders = Vec::with_capacity(hour.trainings.len());
            for training in &hour.trainings {
                let id = rider_ids[training.rider.as_str()];
                if riders.contains(&id) {
                    return Err(MatchError::DuplicateTraining {
                        slot: hour.slot.clone(),
                        rider: training.rider.clone(),
                    });
                }
                riders.push(id);
            }
            let mut excluded = vec![false; available.len()];
            for name in &hour.excludes {
                match horse_ids.get(name.as_str()) {
                    Some(&id) => excluded[id] = true,
                    None => debug!(slot = %hour.slot, horse = %name, "hour exclude names no available horse"),
                }
            }
            hours.push(IndexedHour {
                slot: hour.slot.clone(),
                riders,
                excluded,
            });
        }

        let mut prefs: Vec<CategorizedHorses> = Vec::with_capacity(rider_names.len());
        let mut incomplete = Vec::new();
        for &name in &rider_names {
            let rider = roster[name];
            let filtered = rider.prefs.retained(|h| !daily_excludes.contains(h));
            match categorize(&filtered, &horse_ids) {
                Some(categorized) => prefs.push(categorized),
                None => {
                    incomplete.push(name.to_string());
                    prefs.push(Default::default());
                }
            }
        }
        if !incomplete.is_empty() {
            warn!(event = "validation_failed", reason = "incomplete_preferences", riders = ?incomplete);
            return Err(MatchError::IncompletePreferences(incomplete));
        }

        let trainings: Vec<RiderId> = hours.iter().flat_map(|h| h.riders.iter().copied()).collect();
        let penalties = PenaltyTable::build(&trainings, &prefs, available.len());
        let horses: Vec<String> = available.iter().map(|h| h.name.clone()).collect();
        let search_orders = prefs
            .iter()
            .enumerate()
            .map(|(rider, categories)| search_order(rider, categories, &penalties, &horses))
            .collect();
        let workload_caps = available
            .iter()
            .map(|h| h.max_daily_workload.unwrap_or(default_max_daily_workload))
            .collect();

        Ok(Self {
            horses,
            workload_caps,
            riders: rider_names.into_iter().map(String::from).collect(),
            penalties,
            search_orders,
            hours,
        })
    }

    /// Available horse names; a [`HorseId`] indexes this slice.
    pub fn horses(&self) -> &[String] {
        &self.horses
    }

    pub fn horse_count(&self) -> usize {
        self.horses.len()
    }

    pub fn horse_name(&self, horse: HorseId) -> &str {
        &self.horses[horse]
    }

    /// Distinct riders of the query; a [`RiderId`] indexes this slice.
    pub fn riders(&self) -> &[String] {
        &self.riders
    }

    pub fn rider_name(&self, rider: RiderId) -> &str {
        &self.riders[rider]
    }

    pub fn hours(&self) -> &[IndexedHour] {
        &self.hours
    }

    pub fn penalties(&self) -> &PenaltyTable {
        &self.penalties
    }

    /// Assignable horses of `rider`, best candidate first.
    pub fn search_order(&self, rider: RiderId) -> &[HorseId] {
        &self.search_orders[rider]
    }

    /// How many hours `horse` may work today.
    pub fn workload_cap(&self, horse: HorseId) -> u32 {
        self.workload_caps[horse]
    }
}

/// Maps filtered preferences onto horse ids.
///
/// Returns `None` unless the five categories name every available horse
/// exactly once and nothing else. Only the four active categories are kept.
fn categorize(
    prefs: &horsematch_core::Preferences,
    horse_ids: &HashMap<&str, HorseId>,
) -> Option<CategorizedHorses> {
    let mut seen = vec![false; horse_ids.len()];
    let mut categorized: CategorizedHorses = Default::default();

    for (category, name) in prefs.iter() {
        let id = *horse_ids.get(name)?;
        if std::mem::replace(&mut seen[id], true) {
            return None;
        }
        if let Some(slot) = PrefCategory::ACTIVE.iter().position(|&c| c == category) {
            categorized[slot].push(id);
        }
    }

    seen.iter().all(|&s| s).then_some(categorized)
}

/// Candidates of one rider ordered by penalty, then category, then name.
fn search_order(
    rider: RiderId,
    categories: &CategorizedHorses,
    penalties: &PenaltyTable,
    horses: &[String],
) -> Vec<HorseId> {
    let mut order: Vec<(u64, usize, HorseId)> = (0..ACTIVE_CATEGORIES)
        .flat_map(|category| {
            categories[category].iter().map(move |&horse| {
                let score = penalties.get(rider, horse).unwrap_or(u64::MAX);
                (score, category, horse)
            })
        })
        .collect();
    order.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then(a.1.cmp(&b.1))
            .then_with(|| horses[a.2].cmp(&horses[b.2]))
    });
    order.into_iter().map(|(_, _, horse)| horse).collect()
}
