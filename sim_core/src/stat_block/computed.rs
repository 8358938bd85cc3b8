//! Computed/derived stat calculations for StatBlock

use crate::config::GameConstants;
use crate::stat_block::StatBlock;
use crate::types::{School, Stat};

impl StatBlock {
    /// Spell power that applies to a school (generic plus school-specific)
    pub fn spell_power(&self, school: School) -> f64 {
        let generic = self.get(Stat::SpellPower);
        match school {
            School::Shadow => generic + self.get(Stat::ShadowPower),
            School::Fire => generic + self.get(Stat::FirePower),
            School::None => generic,
        }
    }

    /// Haste in percent from haste rating
    pub fn haste_percent(&self, constants: &GameConstants) -> f64 {
        self.get(Stat::HasteRating) / constants.haste_rating_per_percent
    }

    /// Divisor applied to cast times and the global cooldown
    pub fn haste_factor(&self, constants: &GameConstants) -> f64 {
        1.0 + self.haste_percent(constants) / 100.0
    }

    /// Spell crit chance in percent before spell-specific bonuses
    pub fn spell_crit_chance(&self, constants: &GameConstants) -> f64 {
        self.get(Stat::CritChance)
            + self.get(Stat::CritRating) / constants.crit_rating_per_percent
            + self.get(Stat::Intellect) / constants.intellect_per_crit_percent
    }

    /// Spell hit chance in percent before spell-specific bonuses, capped
    pub fn spell_hit_chance(&self, constants: &GameConstants) -> f64 {
        (constants.base_hit_chance + self.get(Stat::HitRating) / constants.hit_rating_per_percent)
            .min(constants.max_hit_chance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spell_power_by_school() {
        let mut block = StatBlock::new("test");
        block.set_base(Stat::SpellPower, 1000.0);
        block.set_base(Stat::ShadowPower, 100.0);
        block.set_base(Stat::FirePower, 50.0);
        assert!((block.spell_power(School::Shadow) - 1100.0).abs() < 0.01);
        assert!((block.spell_power(School::Fire) - 1050.0).abs() < 0.01);
        assert!((block.spell_power(School::None) - 1000.0).abs() < 0.01);
    }

    #[test]
    fn test_haste_factor() {
        let constants = GameConstants::default();
        let mut block = StatBlock::new("test");
        block.set_base(Stat::HasteRating, constants.haste_rating_per_percent * 20.0);
        assert!((block.haste_factor(&constants) - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_hit_chance_capped() {
        let constants = GameConstants::default();
        let mut block = StatBlock::new("test");
        block.set_base(Stat::HitRating, 1000.0);
        assert!((block.spell_hit_chance(&constants) - constants.max_hit_chance).abs() < 1e-9);
    }
}
