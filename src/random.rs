//! Random-source capability shared between a trial source and the process.
//!
//! The trial source owns the generator; the trial-history process borrows it
//! through [`TrialSource::rng`](crate::TrialSource::rng) for every draw, so a
//! single seed reproduces the whole sequence.

use crate::utils::{uniform_index, weighted_index};
use crate::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sampling operations the trial-history process needs.
///
/// The trait is object safe so that sources can hand out
/// `&mut dyn RandomSource`.
pub trait RandomSource {
    /// Draw an index uniformly from `0..n`.
    fn choose_index(&mut self, n: usize) -> usize;

    /// Draw a float uniformly from `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Draw an index with probability proportional to `weights`.
    fn weighted_index(&mut self, weights: &[f64]) -> Result<usize>;

    /// Reseed the generator. `None` seeds from OS entropy.
    fn reseed(&mut self, seed: Option<u64>);
}

/// Seeded generator with the seed retained for inspection.
///
/// # Examples
///
/// ```
/// use trialhist::{RandomSource, SeededRng};
///
/// let mut a = SeededRng::new(42);
/// let mut b = SeededRng::new(42);
/// assert_eq!(a.uniform(), b.uniform());
/// assert_eq!(a.seed(), Some(42));
/// ```
#[derive(Clone, Debug)]
pub struct SeededRng {
    rng: StdRng,
    seed: Option<u64>,
}

impl SeededRng {
    /// Create a generator from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Seed used for the current stream, if it was seeded explicitly.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Underlying generator, for sources that render trials with `rand`.
    #[inline]
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for SeededRng {
    fn choose_index(&mut self, n: usize) -> usize {
        uniform_index(n, &mut self.rng)
    }

    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn weighted_index(&mut self, weights: &[f64]) -> Result<usize> {
        weighted_index(weights, &mut self.rng)
    }

    fn reseed(&mut self, seed: Option<u64>) {
        *self = match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        };
    }
}
