//! Sampling helpers used by the random sources.
//!
//! These are thin wrappers over `rand` that report failures through the
//! crate's error type instead of panicking.

use crate::{Result, TrialHistError};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Draw an index uniformly from `0..n`.
///
/// # Panics
///
/// Panics if `n == 0`.
///
/// # Examples
///
/// ```
/// use trialhist::utils::uniform_index;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let idx = uniform_index(3, &mut rng);
/// assert!(idx < 3);
/// ```
#[inline]
pub fn uniform_index<R: Rng + ?Sized>(n: usize, rng: &mut R) -> usize {
    assert!(n > 0, "cannot draw from an empty set");
    rng.gen_range(0..n)
}

/// Draw an index with probability proportional to `weights[i]`.
///
/// Zero weights are valid and exclude their index. The weights are used
/// exactly as given; they are not required to sum to 1.
///
/// # Errors
///
/// Returns `InvalidWeights` if the vector is empty, holds a negative or
/// non-finite entry, or sums to zero.
///
/// # Examples
///
/// ```
/// use trialhist::utils::weighted_index;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let idx = weighted_index(&[0.0, 1.0, 0.0], &mut rng).unwrap();
/// assert_eq!(idx, 1);
/// ```
pub fn weighted_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Result<usize> {
    let dist =
        WeightedIndex::new(weights).map_err(|e| TrialHistError::InvalidWeights(e.to_string()))?;
    Ok(dist.sample(rng))
}

/// Sum of a probability row.
#[inline]
pub fn row_sum(row: &[f64]) -> f64 {
    row.iter().sum()
}
