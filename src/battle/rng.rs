//! Random sources for battle simulation
//!
//! The engine draws every random number (speed tie-break, Jester dodge,
//! damage variance) through [`RandomSource`], so a battle can be replayed
//! exactly from a seed or a fixed roll sequence.

use rand::prelude::*;
use rand::rngs::StdRng;

/// Uniform random numbers in `[0.0, 1.0)`
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform sample in `[min, max)`
    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// True with the given probability
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Seeded random number generator for deterministic battles.
///
/// When a seed is provided the same seed always produces the same battle log.
/// Without a seed, uses system entropy.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Seeded when `seed` is given, entropy otherwise
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for GameRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen()
    }
}

/// Replays a fixed sequence of rolls, wrapping around at the end
#[derive(Debug, Clone)]
pub struct FixedRolls {
    rolls: Vec<f64>,
    cursor: usize,
}

impl FixedRolls {
    /// Rolls are clamped into `[0.0, 1.0)`; an empty sequence always rolls 0.0
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        let rolls = rolls
            .into_iter()
            .map(|r| r.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { rolls, cursor: 0 }
    }

    /// Every roll returns the same value
    pub fn constant(roll: f64) -> Self {
        Self::new([roll])
    }

    /// Number of rolls drawn so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for FixedRolls {
    fn next_f64(&mut self) -> f64 {
        if self.rolls.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }
}
