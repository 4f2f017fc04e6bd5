//! Deterministic random number generators.
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro64StarStar;

/// A small and fast generator, reproducible for a given `seed`.
pub fn seeded_rng(seed: u64) -> Xoroshiro64StarStar {
    Xoroshiro64StarStar::seed_from_u64(seed)
}

/// The generator used throughout the tests, always seeded the same way.
pub fn consistent_rng() -> impl Rng {
    seeded_rng(0)
}
