//! StatAccumulator - Collects baseline contributions before building a StatBlock

use crate::stat_block::StatBlock;
use crate::types::Stat;
use std::collections::HashMap;

/// Accumulates baseline stat contributions from the configured sources
///
/// Flat contributions are summed and then scaled by the summed increased
/// percentage for the stat (Blessing of Kings, Demonic Embrace).
#[derive(Debug, Clone, Default)]
pub struct StatAccumulator {
    flat: HashMap<Stat, f64>,
    increased: HashMap<Stat, f64>,
}

impl StatAccumulator {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flat contribution
    pub fn add_flat(&mut self, stat: Stat, value: f64) {
        *self.flat.entry(stat).or_insert(0.0) += value;
    }

    /// Add an increased% contribution (as decimal, e.g. 0.10 = 10%)
    pub fn add_increased(&mut self, stat: Stat, value: f64) {
        *self.increased.entry(stat).or_insert(0.0) += value;
    }

    /// Value of a stat given everything accumulated so far
    pub fn value(&self, stat: Stat) -> f64 {
        let flat = self.flat.get(&stat).copied().unwrap_or(0.0);
        let increased = self.increased.get(&stat).copied().unwrap_or(0.0);
        flat * (1.0 + increased)
    }

    /// Write the accumulated values into a StatBlock as its baseline
    pub fn apply_to(&self, block: &mut StatBlock) {
        for &stat in Stat::all() {
            block.set_base(stat, self.value(stat));
        }
    }
}
