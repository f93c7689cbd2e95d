//! Tetrahedral dice
//!
//! Ur is played with four two-faced throwing sticks, so a roll is the number
//! of marked faces showing: Bin(4, 0.5) over [0, 4].

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::Steps;

/// Throw four sticks using the given generator
pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Steps {
    (rng.gen::<u8>() & 0x0F).count_ones() as Steps
}

/// A roll source owning its own generator
///
/// Not meant to be shared: every concurrently running game gets its own.
#[derive(Clone, Debug)]
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    /// Reproducible dice
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, otherwise from OS entropy
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }

    pub fn roll(&mut self) -> Steps {
        roll(&mut self.rng)
    }
}
