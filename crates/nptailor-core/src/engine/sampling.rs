//! Bounded subset and permutation generation for annotators.
//!
//! Small spaces are enumerated exactly in a fixed order. When the number of
//! candidates exceeds the configured ceiling, members are drawn with a seeded
//! generator instead, so the same input always yields the same output.

use super::config::SearchLimits;
use itertools::Itertools;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Number of `k`-subsets of `n` items, saturating.
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result.saturating_mul((n - i) as u128) / (i as u128 + 1);
    }
    result
}

/// Number of ordered `k`-arrangements of `n` items, saturating.
pub fn arrangements(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    (0..k).fold(1u128, |acc, i| acc.saturating_mul((n - i) as u128))
}

/// All subsets of `items` with a size in `min_size..=max_size`, capped at
/// `plans_per_reaction`.
///
/// Each subset keeps the relative order of `items`. Exact enumeration lists
/// subsets by increasing size, then lexicographically.
#[instrument(level = "trace", skip_all, fields(n = items.len()))]
pub fn subsets(
    items: &[usize],
    min_size: usize,
    max_size: usize,
    limits: &SearchLimits,
) -> Vec<Vec<usize>> {
    let min_size = min_size.max(1);
    let max_size = max_size.min(items.len());
    if items.is_empty() || min_size > max_size {
        return Vec::new();
    }
    let total: u128 = (min_size..=max_size)
        .map(|k| binomial(items.len(), k))
        .fold(0, u128::saturating_add);
    let cap = limits.plans_per_reaction;

    if total <= cap as u128 {
        return (min_size..=max_size)
            .flat_map(|k| items.iter().copied().combinations(k))
            .collect();
    }

    debug!(total, cap, "Subset space exceeds ceiling, sampling.");
    let mut rng = StdRng::seed_from_u64(limits.sampling_seed);
    let mut seen = BTreeSet::new();
    for _ in 0..limits.max_sampling_attempts {
        if seen.len() >= cap {
            break;
        }
        let size = rng.gen_range(min_size..=max_size);
        let mut picked: Vec<usize> = rand::seq::index::sample(&mut rng, items.len(), size)
            .into_iter()
            .collect();
        picked.sort_unstable();
        seen.insert(picked);
    }
    seen.into_iter()
        .map(|indices| indices.into_iter().map(|i| items[i]).collect())
        .collect()
}

/// All ordered selections of `k` items, capped at `plans_per_reaction`.
#[instrument(level = "trace", skip_all, fields(n = items.len()))]
pub fn permutations(items: &[usize], k: usize, limits: &SearchLimits) -> Vec<Vec<usize>> {
    if k == 0 || k > items.len() {
        return Vec::new();
    }
    let total = arrangements(items.len(), k);
    let cap = limits.plans_per_reaction;

    if total <= cap as u128 {
        return items.iter().copied().permutations(k).collect();
    }

    debug!(total, cap, "Permutation space exceeds ceiling, sampling.");
    let mut rng = StdRng::seed_from_u64(limits.sampling_seed);
    let mut seen = BTreeSet::new();
    let mut ordered = Vec::new();
    for _ in 0..limits.max_sampling_attempts {
        if ordered.len() >= cap {
            break;
        }
        let picked: Vec<usize> = items.choose_multiple(&mut rng, k).copied().collect();
        if seen.insert(picked.clone()) {
            ordered.push(picked);
        }
    }
    ordered
}
