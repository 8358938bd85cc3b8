//! DoT definitions

use crate::spell::SpellId;
use crate::types::School;
use serde::{Deserialize, Serialize};

/// Periodic damage component of a spell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotDef {
    pub spell: SpellId,
    pub school: School,
    /// Total seconds the DoT runs
    pub duration: f64,
    /// Seconds between ticks
    pub tick_rate: f64,
    /// Damage over the full duration before spell power
    pub base_damage: f64,
    /// Spell power coefficient over the full duration
    pub coefficient: f64,
}

impl DotDef {
    pub fn ticks(&self) -> u32 {
        (self.duration / self.tick_rate).round() as u32
    }

    /// Per-tick damage snapshotted from spell power and a damage multiplier
    pub fn damage_per_tick(&self, spell_power: f64, modifier: f64) -> f64 {
        (self.base_damage + spell_power * self.coefficient) * modifier / self.ticks().max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_per_tick() {
        let corruption = DotDef {
            spell: SpellId::Corruption,
            school: School::Shadow,
            duration: 18.0,
            tick_rate: 3.0,
            base_damage: 900.0,
            coefficient: 0.936,
        };
        assert_eq!(corruption.ticks(), 6);
        // (900 + 1000 * 0.936) / 6 = 306
        assert!((corruption.damage_per_tick(1000.0, 1.0) - 306.0).abs() < 0.01);
    }
}
