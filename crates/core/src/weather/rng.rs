//! Seeded random source for the scheduler
//!
//! ChaCha8 keeps the stream identical across library releases, and its word
//! position lets a checkpoint jump straight back to where it left off.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Each unit draw consumes one `u64`, two 32-bit stream words
const WORDS_PER_DRAW: u128 = 2;

#[derive(Debug, Clone)]
pub(crate) struct SeededRng {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRng {
    pub(crate) fn new(seed: u64) -> Self {
        SeededRng {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Rebuild a stream positioned after `draws` values
    pub(crate) fn resume(seed: u64, draws: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_word_pos(u128::from(draws) * WORDS_PER_DRAW);
        SeededRng { seed, rng }
    }

    /// Uniform value in [0, 1)
    pub(crate) fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    pub(crate) fn seed(&self) -> u64 {
        self.seed
    }

    pub(crate) fn draws(&self) -> u64 {
        (self.rng.get_word_pos() / WORDS_PER_DRAW) as u64
    }
}
