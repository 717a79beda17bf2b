//! Weighted selection over the rating store.
//!
//! Selection runs in two stages. First a rating tier is drawn, with each
//! tier's share of the draw proportional to its *mass*: the number of
//! files in the tier times the tier's configured weight. Then a file is
//! drawn uniformly from the chosen tier.
//!
//! With the default weights (1 → 1, 2 → 4, 3 → 16), a single file rated 2
//! is suggested four times as often as a single file rated 1, and a file
//! rated 3 four times as often as one rated 2. The tier draw is exact, not
//! approximate: tier probability equals `mass / total_mass` because the
//! draw covers the closed interval `[1, total_mass]` and the cumulative
//! walk assigns each tier a contiguous block of exactly `mass` values.
//!
//! The two known ways to get this subtly wrong are both avoided here and
//! pinned by tests: an exclusive upper bound on the draw (which starves the
//! top tier's last value) and a non-deterministic tier walk order.

use crate::error::SelectError;
use crate::store::RatingStore;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Weight per rating value, fixed at configuration time.
///
/// Ratings carry no intrinsic meaning to the selector; any set of tiers
/// works, and growing the set is a configuration change, not a code
/// change. The map is ordered so the cumulative walk always visits tiers
/// in ascending rating order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierWeights {
    weights: BTreeMap<u32, u64>,
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            weights: BTreeMap::from([(1, 1), (2, 4), (3, 16)]),
        }
    }
}

impl TierWeights {
    /// Build from explicit `(rating, weight)` pairs. Weights must be
    /// positive; configuration loading enforces that before this point.
    #[must_use]
    pub fn new(weights: BTreeMap<u32, u64>) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weight(&self, rating: u32) -> Option<u64> {
        self.weights.get(&rating).copied()
    }

    #[must_use]
    pub fn contains(&self, rating: u32) -> bool {
        self.weights.contains_key(&rating)
    }

    /// `(rating, weight)` pairs in ascending rating order.
    pub fn tiers(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.weights.iter().map(|(r, w)| (*r, *w))
    }

    /// Ratings the prompt may offer, ascending.
    #[must_use]
    pub fn ratings(&self) -> Vec<u32> {
        self.weights.keys().copied().collect()
    }
}

/// Mass per tier in ascending rating order: `count × weight` for every
/// rating that both appears in the store and has a configured weight.
/// Tiers with zero mass are dropped; they can never be chosen.
#[must_use]
pub fn tier_masses(store: &RatingStore, weights: &TierWeights) -> Vec<(u32, u64)> {
    let counts = store.tier_counts();
    weights
        .tiers()
        .filter_map(|(rating, weight)| {
            counts.get(&rating).map(|count| (rating, count * weight))
        })
        .filter(|(_, mass)| *mass > 0)
        .collect()
}

/// Resolve a drawn value against cumulative tier masses: the first tier
/// whose running total reaches `draw` wins. `None` only if `draw` exceeds
/// the summed mass, which callers rule out by construction.
#[must_use]
pub fn tier_for_draw(masses: &[(u32, u64)], draw: u64) -> Option<u32> {
    let mut cumulative: u64 = 0;
    for (rating, mass) in masses {
        cumulative += mass;
        if cumulative >= draw {
            return Some(*rating);
        }
    }
    None
}

/// Draw a rating tier, weighted by tier mass.
///
/// # Errors
///
/// [`SelectError::NoRatedFiles`] when the total mass is zero: nothing has
/// been rated yet, or no rated file has a configured weight. The defensive
/// [`SelectError::MassMismatch`] signals a bookkeeping bug and should be
/// unreachable.
pub fn choose_tier<R: Rng>(
    store: &RatingStore,
    weights: &TierWeights,
    rng: &mut R,
) -> Result<u32, SelectError> {
    let masses = tier_masses(store, weights);
    let total: u64 = masses.iter().map(|(_, mass)| mass).sum();
    if total == 0 {
        return Err(SelectError::NoRatedFiles);
    }

    // Closed interval: a draw over 1..total would starve the top tier's
    // final value.
    let draw = rng.gen_range(1..=total);
    log::trace!("drew {draw} of {total} across {} tiers", masses.len());

    tier_for_draw(&masses, draw).ok_or(SelectError::MassMismatch { draw, total })
}

/// Draw a file: pick a tier by mass, then a file uniformly within it.
///
/// # Errors
///
/// [`SelectError::NoRatedFiles`] as for [`choose_tier`]. The defensive
/// [`SelectError::EmptyTier`] signals a tier chosen with no files in it,
/// impossible while masses are computed from actual counts.
pub fn choose_file<R: Rng>(
    store: &RatingStore,
    weights: &TierWeights,
    rng: &mut R,
) -> Result<String, SelectError> {
    let tier = choose_tier(store, weights, rng)?;
    let candidates = store.paths_with_rating(tier);
    candidates
        .choose(rng)
        .map(|path| (*path).to_string())
        .ok_or(SelectError::EmptyTier(tier))
}
