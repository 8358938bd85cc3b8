//! RandomSource - Uniform draws for proc, hit and crit evaluation

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Supplies uniform draws in `[0, 100)`
///
/// The engine never picks a seed itself. Callers hand in a source per
/// trial so that every trial is reproducible.
pub trait RandomSource {
    /// Draw a value in `[0, 100)`
    fn roll(&mut self) -> f64;

    /// Evaluate a percent chance with exactly one draw
    fn chance(&mut self, percent: f64) -> bool {
        self.roll() < percent
    }
}

/// Seeded ChaCha stream, one per trial
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn roll(&mut self) -> f64 {
        self.rng.gen_range(0.0..100.0)
    }
}

/// Replays a fixed list of draws, then repeats the fallback value
///
/// Useful for forcing specific proc/crit outcomes.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: Vec<f64>,
    next: usize,
    fallback: f64,
}

impl ScriptedRolls {
    pub fn new(rolls: Vec<f64>, fallback: f64) -> Self {
        ScriptedRolls {
            rolls,
            next: 0,
            fallback,
        }
    }

    /// Every draw returns the same value
    pub fn constant(value: f64) -> Self {
        Self::new(Vec::new(), value)
    }

    /// Number of draws consumed so far
    pub fn draws(&self) -> usize {
        self.next
    }
}

impl RandomSource for ScriptedRolls {
    fn roll(&mut self) -> f64 {
        let value = self.rolls.get(self.next).copied().unwrap_or(self.fallback);
        self.next += 1;
        value
    }
}
