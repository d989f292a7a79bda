use anyhow::{Result, bail};
use std::collections::HashSet;

pub const DEFAULT_SEED: u64 = 1337;

/// Resolve CLI seed tokens into batch seeds.
///
/// Negative integers fold to their absolute value; duplicates keep their
/// first position. An empty list falls back to [`DEFAULT_SEED`].
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seen = HashSet::new();
    let mut seeds = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        let seed = if let Ok(value) = token.parse::<u64>() {
            value
        } else if let Ok(value) = token.parse::<i64>() {
            value.unsigned_abs()
        } else {
            bail!("Unrecognized seed token: {token}");
        };

        if seen.insert(seed) {
            seeds.push(seed);
        }
    }

    if seeds.is_empty() {
        seeds.push(DEFAULT_SEED);
    }

    Ok(seeds)
}

/// Seed for match `index` of a batch started from `batch_seed`.
#[must_use]
pub fn match_seed(batch_seed: u64, index: usize) -> u64 {
    batch_seed.wrapping_add(u64::try_from(index).unwrap_or(u64::MAX))
}
