//! Deterministic simulation-level RNG.
//!
//! One `SimRng` per run, seeded from `KitchenConfig::seed`.  It drives every
//! stochastic decision the kitchen makes:
//!
//! - the per-tick agent activation permutation,
//! - order inter-arrival times,
//! - recipe selection,
//! - initial agent placement.
//!
//! Agents themselves are deterministic given their inputs, so the same seed
//! always reproduces the same run.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Run-global RNG.  Used only from the single-threaded tick loop.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// A uniformly random permutation of `0..n`.
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        self.shuffle(&mut order);
        order
    }

    /// Choose a random element from a slice.  `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
