//! Seeded random sources.
//!
//! The search only needs two capabilities from its random source: a uniform
//! real in `[0, 1)` and a uniform index in `[0, n)`. Both come from
//! [`rand::Rng`], so any generator can be injected; these helpers build the
//! reproducible default.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Derives `count` seeds for independent runs from a base seed.
///
/// The seeds are the first `count` outputs of `create_rng(base)`, so a
/// given base always yields the same sequence.
pub fn derive_seeds(base: u64, count: usize) -> Vec<u64> {
    let mut rng = create_rng(base);
    (0..count).map(|_| rng.random::<u64>()).collect()
}
