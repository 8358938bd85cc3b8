//! Spell calculation - turning a spell + the caster's current state into numbers

use super::{SpellDef, SpellId, INCINERATE_IMMOLATE_BONUS};
use crate::aura::{AuraId, AuraRegistry};
use crate::config::GameConstants;
use crate::dot::DotTracker;
use crate::stat_block::StatBlock;
use crate::types::{School, Stat};

/// Read-only view of everything a cast depends on
#[derive(Clone, Copy)]
pub struct CastContext<'a> {
    pub stats: &'a StatBlock,
    pub auras: &'a AuraRegistry,
    pub dots: &'a DotTracker,
    pub constants: &'a GameConstants,
}

impl<'a> CastContext<'a> {
    /// Hasted cast time
    pub fn cast_time(&self, spell: &SpellDef) -> f64 {
        spell.cast_time / self.stats.haste_factor(self.constants)
    }

    /// Hasted global cooldown, floored at the minimum
    pub fn global_cooldown(&self) -> f64 {
        (self.constants.global_cooldown / self.stats.haste_factor(self.constants))
            .max(self.constants.min_global_cooldown)
    }

    pub fn mana_cost(&self, spell: &SpellDef) -> f64 {
        spell.mana_cost * self.stats.get(Stat::ManaCostModifier)
    }

    pub fn hit_chance(&self, spell: &SpellDef) -> f64 {
        (self.stats.spell_hit_chance(self.constants) + spell.bonus_hit).min(self.constants.max_hit_chance)
    }

    pub fn crit_chance(&self, spell: &SpellDef) -> f64 {
        self.stats.spell_crit_chance(self.constants) + spell.bonus_crit
    }

    /// Combined damage multiplier; `direct` selects hit versus periodic damage
    pub fn damage_modifier(&self, spell: &SpellDef, direct: bool) -> f64 {
        let mut modifier = spell.damage_modifier;
        if matches!(spell.school, School::Shadow | School::Fire)
            && self.auras.is_active(AuraId::CurseOfTheElements)
        {
            modifier *= self.constants.curse_of_the_elements_modifier;
        }
        if direct && spell.school == School::Shadow {
            modifier *= self.auras.damage_modifier(AuraId::ImprovedShadowBolt);
        }
        modifier
    }

    /// Non-crit direct damage
    pub fn direct_damage(&self, spell: &SpellDef) -> f64 {
        let mut damage = spell.base_damage + self.stats.spell_power(spell.school) * spell.coefficient;
        if spell.id == SpellId::Incinerate && self.dots.is_active(SpellId::Immolate) {
            damage += INCINERATE_IMMOLATE_BONUS;
        }
        damage * self.damage_modifier(spell, true)
    }

    /// Per-tick damage snapshot for the spell's DoT component
    pub fn dot_damage_per_tick(&self, spell: &SpellDef) -> Option<f64> {
        let dot = spell.dot.as_ref()?;
        Some(dot.damage_per_tick(
            self.stats.spell_power(dot.school),
            self.damage_modifier(spell, false),
        ))
    }

    /// Mana returned by Life Tap
    pub fn mana_gain(&self, spell: &SpellDef) -> f64 {
        spell.mana_gain + self.stats.spell_power(School::Shadow) * spell.coefficient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aura::{AuraDef, AuraEffect, AuraHost};
    use crate::combat_log::CombatLog;
    use crate::config::Talents;
    use crate::spell::Spellbook;

    fn stats() -> StatBlock {
        let mut stats = StatBlock::new("player");
        stats.set_base(Stat::SpellPower, 1000.0);
        stats.set_base(Stat::ManaCostModifier, 1.0);
        stats.set_base(Stat::MaxMana, 10000.0);
        stats
    }

    #[test]
    fn test_shadow_bolt_damage_with_isb_and_coe() {
        let constants = GameConstants::default();
        let book = Spellbook::new(&Talents::default(), constants.crit_damage_multiplier);
        let sb = book.get(SpellId::ShadowBolt).unwrap();
        let mut stats = stats();
        let dots = DotTracker::new();
        let mut auras = AuraRegistry::with_defs([
            AuraDef::new(AuraId::CurseOfTheElements, 300.0),
            AuraDef::new(AuraId::ImprovedShadowBolt, 12.0).with_effect(AuraEffect::Stacking {
                max_stacks: 4,
                damage_modifier: 1.2,
            }),
        ]);

        let base = {
            let ctx = CastContext { stats: &stats, auras: &auras, dots: &dots, constants: &constants };
            ctx.direct_damage(sb)
        };
        assert!((base - (575.5 + 1000.0 * 3.0 / 3.5)).abs() < 1e-6);

        let (mut mana, mut important, mut log) = (0.0, 0, CombatLog::new(false));
        let mut host = AuraHost {
            stats: &mut stats,
            mana: &mut mana,
            log: &mut log,
            important_auras: &mut important,
        };
        auras.apply(AuraId::CurseOfTheElements, &mut host).unwrap();
        auras.apply(AuraId::ImprovedShadowBolt, &mut host).unwrap();

        let ctx = CastContext { stats: &stats, auras: &auras, dots: &dots, constants: &constants };
        assert!((ctx.direct_damage(sb) - base * 1.1 * 1.2).abs() < 1e-6);
        // Corruption ticks do not benefit from Improved Shadow Bolt
        let corruption = book.get(SpellId::Corruption).unwrap();
        assert!((ctx.damage_modifier(corruption, false) - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_incinerate_bonus_with_immolate() {
        let constants = GameConstants::default();
        let book = Spellbook::new(&Talents::default(), constants.crit_damage_multiplier);
        let incinerate = book.get(SpellId::Incinerate).unwrap();
        let immolate = book.get(SpellId::Immolate).unwrap();
        let stats = stats();
        let auras = AuraRegistry::new();
        let mut dots = DotTracker::new();

        let without = CastContext { stats: &stats, auras: &auras, dots: &dots, constants: &constants }
            .direct_damage(incinerate);
        dots.apply(immolate.dot.as_ref().unwrap(), 100.0);
        let with = CastContext { stats: &stats, auras: &auras, dots: &dots, constants: &constants }
            .direct_damage(incinerate);
        assert!((with - without - INCINERATE_IMMOLATE_BONUS).abs() < 1e-6);
    }

    #[test]
    fn test_haste_shortens_cast_and_gcd() {
        let constants = GameConstants::default();
        let book = Spellbook::new(&Talents::default(), constants.crit_damage_multiplier);
        let mut stats = stats();
        stats.set_base(Stat::HasteRating, 100.0 * constants.haste_rating_per_percent);
        let auras = AuraRegistry::new();
        let dots = DotTracker::new();
        let ctx = CastContext { stats: &stats, auras: &auras, dots: &dots, constants: &constants };

        let sb = book.get(SpellId::ShadowBolt).unwrap();
        assert!((ctx.cast_time(sb) - 1.5).abs() < 1e-9);
        assert!((ctx.global_cooldown() - constants.min_global_cooldown).abs() < 1e-9);
    }

    #[test]
    fn test_life_tap_scales_with_shadow_power() {
        let constants = GameConstants::default();
        let talents = Talents {
            improved_life_tap: 2,
            ..Talents::default()
        };
        let book = Spellbook::new(&talents, constants.crit_damage_multiplier);
        let stats = stats();
        let auras = AuraRegistry::new();
        let dots = DotTracker::new();
        let ctx = CastContext { stats: &stats, auras: &auras, dots: &dots, constants: &constants };
        let gain = ctx.mana_gain(book.get(SpellId::LifeTap).unwrap());
        assert!((gain - (582.0 + 800.0) * 1.2).abs() < 1e-6);
    }
}
