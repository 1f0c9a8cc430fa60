//! Random number source for the stepping engines.
//!
//! Engines take their generator at construction so runs can be replayed from a seed.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Generator used by every stepping engine.
pub type SimRng = Xoshiro256PlusPlus;

/// Builds the simulation RNG from an optional seed.
///
/// Without a seed the generator is seeded from the thread RNG.
pub fn seeded(seed: Option<u64>) -> SimRng {
    match seed {
        Some(seed) => SimRng::seed_from_u64(seed),
        None => SimRng::from_rng(&mut rand::rng()),
    }
}
