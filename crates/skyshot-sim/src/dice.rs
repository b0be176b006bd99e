//! Ternary random sources.
//!
//! Everything random in the simulation is a draw from {-1, 0, 1}: spawn
//! velocity jitter, muzzle jitter and airplane turn bias. The source is
//! passed in explicitly so runs can be seeded or fully scripted.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skyshot_core::enums::TurnBias;

/// A source of uniformly distributed values in {-1, 0, 1}.
pub trait TernaryDice {
    fn roll(&mut self) -> TurnBias;

    /// Roll and return the signed value as a float.
    fn roll_f32(&mut self) -> f32 {
        self.roll().as_f32()
    }
}

/// ChaCha-backed dice. Same seed = same sequence.
#[derive(Debug, Clone)]
pub struct ChaChaDice {
    rng: ChaCha8Rng,
}

impl ChaChaDice {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed from system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl TernaryDice for ChaChaDice {
    fn roll(&mut self) -> TurnBias {
        TurnBias::from_sign(self.rng.gen_range(-1i8..=1))
    }
}

/// Dice that replays a fixed script, then repeats a fallback value.
///
/// Counts every roll, which makes it useful for checking how often the
/// simulation draws.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    script: VecDeque<TurnBias>,
    fallback: TurnBias,
    rolls: usize,
}

impl ScriptedDice {
    pub fn new(script: impl IntoIterator<Item = TurnBias>, fallback: TurnBias) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback,
            rolls: 0,
        }
    }

    /// Dice that always rolls `value`.
    pub fn constant(value: TurnBias) -> Self {
        Self::new([], value)
    }

    /// Number of rolls taken so far.
    pub fn rolls(&self) -> usize {
        self.rolls
    }
}

impl TernaryDice for ScriptedDice {
    fn roll(&mut self) -> TurnBias {
        self.rolls += 1;
        self.script.pop_front().unwrap_or(self.fallback)
    }
}
