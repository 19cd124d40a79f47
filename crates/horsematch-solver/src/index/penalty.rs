//! Penalty scores.
//!
//! A penalty combines the category of a horse for a rider with how contested
//! that horse is across the day. Category always dominates: the frequency part
//! is kept below `stride = n²`, and each category adds `weight * stride`.

use horsematch_core::PrefCategory;

use super::{HorseId, RiderId};

/// Number of assignable preference categories.
pub(crate) const ACTIVE_CATEGORIES: usize = PrefCategory::ACTIVE.len();

/// Active preference categories of one rider, as horse ids per category.
pub(crate) type CategorizedHorses = [Vec<HorseId>; ACTIVE_CATEGORIES];

/// Counts contention per category and horse.
///
/// Categories are processed best first. Every occurrence of a horse in a
/// category adds `1 + carry`, where `carry` accumulates the contention the
/// horse already had at better categories. After a category is done, each
/// touched horse gets its carry added once more, and the carry grows by the
/// count the horse had before that addition.
pub(crate) fn contention(
    trainings: &[RiderId],
    prefs: &[CategorizedHorses],
    horse_count: usize,
) -> Vec<Vec<u64>> {
    let mut carry = vec![0u64; horse_count];
    let mut freq = vec![vec![0u64; horse_count]; ACTIVE_CATEGORIES];

    for (category, row) in freq.iter_mut().enumerate() {
        let mut touched = vec![false; horse_count];
        for &rider in trainings {
            for &horse in &prefs[rider][category] {
                row[horse] = row[horse].saturating_add(1).saturating_add(carry[horse]);
                touched[horse] = true;
            }
        }
        for horse in (0..horse_count).filter(|&h| touched[h]) {
            let stored = row[horse];
            row[horse] = row[horse].saturating_add(carry[horse]);
            carry[horse] = carry[horse].saturating_add(stored);
        }
    }
    freq
}

/// Penalty of every (rider, horse) pair of a query. Lower is better.
#[derive(Debug, Clone)]
pub struct PenaltyTable {
    horse_count: usize,
    stride: u64,
    scores: Vec<Option<u64>>,
}

impl PenaltyTable {
    pub(crate) fn build(
        trainings: &[RiderId],
        prefs: &[CategorizedHorses],
        horse_count: usize,
    ) -> Self {
        let stride = category_stride(horse_count);
        let freq = contention(trainings, prefs, horse_count);
        let mut scores = vec![None; prefs.len() * horse_count];

        for (rider, categories) in prefs.iter().enumerate() {
            for (category, horses) in categories.iter().enumerate() {
                let base = PrefCategory::ACTIVE[category]
                    .weight()
                    .unwrap_or_default()
                    .saturating_mul(stride);
                for &horse in horses {
                    let fine = freq[category][horse].min(stride - 1);
                    scores[rider * horse_count + horse] = Some(base.saturating_add(fine));
                }
            }
        }

        Self {
            horse_count,
            stride,
            scores,
        }
    }

    /// Penalty of `horse` for `rider`; `None` when the horse is excluded.
    #[inline]
    pub fn get(&self, rider: RiderId, horse: HorseId) -> Option<u64> {
        self.scores
            .get(rider * self.horse_count + horse)
            .copied()
            .flatten()
    }

    /// The `n²` factor separating categories.
    pub fn stride(&self) -> u64 {
        self.stride
    }
}

/// `n²`, at least 1.
pub(crate) fn category_stride(horse_count: usize) -> u64 {
    (horse_count as u64).saturating_mul(horse_count as u64).max(1)
}
