//! Spells - Definitions of the castable spells for a talent build

mod calculation;

pub use calculation::CastContext;

use crate::aura::AuraId;
use crate::config::Talents;
use crate::dot::DotDef;
use crate::error::SimError;
use crate::types::School;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every spell the player can cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellId {
    ShadowBolt,
    Incinerate,
    SearingPain,
    LifeTap,
    Corruption,
    Immolate,
    CurseOfTheElements,
    CurseOfRecklessness,
}

impl SpellId {
    pub fn all() -> &'static [SpellId] {
        &[
            SpellId::ShadowBolt,
            SpellId::Incinerate,
            SpellId::SearingPain,
            SpellId::LifeTap,
            SpellId::Corruption,
            SpellId::Immolate,
            SpellId::CurseOfTheElements,
            SpellId::CurseOfRecklessness,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            SpellId::ShadowBolt => "Shadow Bolt",
            SpellId::Incinerate => "Incinerate",
            SpellId::SearingPain => "Searing Pain",
            SpellId::LifeTap => "Life Tap",
            SpellId::Corruption => "Corruption",
            SpellId::Immolate => "Immolate",
            SpellId::CurseOfTheElements => "Curse of the Elements",
            SpellId::CurseOfRecklessness => "Curse of Recklessness",
        }
    }

    pub fn is_filler(self) -> bool {
        matches!(self, SpellId::ShadowBolt | SpellId::Incinerate | SpellId::SearingPain)
    }

    pub fn is_curse(self) -> bool {
        matches!(self, SpellId::CurseOfTheElements | SpellId::CurseOfRecklessness)
    }

    pub fn is_dot(self) -> bool {
        matches!(self, SpellId::Corruption | SpellId::Immolate)
    }
}

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpellId {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpellId::all()
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(s) || id.name().replace(' ', "_").eq_ignore_ascii_case(s))
            .ok_or_else(|| SimError::UnknownSpell(s.to_string()))
    }
}

/// Talent tree a spell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellTree {
    Affliction,
    Destruction,
}

/// Static definition of a spell with talents already folded in
#[derive(Debug, Clone, PartialEq)]
pub struct SpellDef {
    pub id: SpellId,
    pub school: School,
    pub tree: SpellTree,
    /// Unhasted cast time in seconds (0 = instant)
    pub cast_time: f64,
    pub mana_cost: f64,
    /// Average direct damage before spell power (0 = no direct damage)
    pub base_damage: f64,
    pub coefficient: f64,
    /// Extra crit chance in percent
    pub bonus_crit: f64,
    /// Extra hit chance in percent
    pub bonus_hit: f64,
    pub crit_multiplier: f64,
    pub can_miss: bool,
    /// Talent damage multiplier for this spell
    pub damage_modifier: f64,
    pub dot: Option<DotDef>,
    /// Aura applied to the caster's registry on a successful cast
    pub aura: Option<AuraId>,
    /// Mana returned by the cast (Life Tap)
    pub mana_gain: f64,
}

impl SpellDef {
    fn new(id: SpellId, school: School, tree: SpellTree) -> Self {
        SpellDef {
            id,
            school,
            tree,
            cast_time: 0.0,
            mana_cost: 0.0,
            base_damage: 0.0,
            coefficient: 0.0,
            bonus_crit: 0.0,
            bonus_hit: 0.0,
            crit_multiplier: 1.5,
            can_miss: true,
            damage_modifier: 1.0,
            dot: None,
            aura: None,
            mana_gain: 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn does_direct_damage(&self) -> bool {
        self.base_damage > 0.0
    }
}

/// Average bonus Incinerate deals while Immolate is on the target
pub const INCINERATE_IMMOLATE_BONUS: f64 = (111.0 + 128.0) / 2.0;

/// All spells for one talent build
#[derive(Debug, Clone)]
pub struct Spellbook {
    spells: Vec<SpellDef>,
}

impl Spellbook {
    pub fn new(talents: &Talents, crit_damage_multiplier: f64) -> Self {
        let t = |rank: u8| rank as f64;
        let cataclysm = 1.0 - 0.01 * t(talents.cataclysm);
        let shadow = 1.0 + 0.02 * t(talents.shadow_mastery);
        let fire = 1.0 + 0.02 * t(talents.emberstorm);
        let destruction_crit = if talents.ruin > 0 {
            1.0 + (crit_damage_multiplier - 1.0) * 2.0
        } else {
            crit_damage_multiplier
        };
        let affliction_hit = 2.0 * t(talents.suppression);

        let mut shadow_bolt = SpellDef::new(SpellId::ShadowBolt, School::Shadow, SpellTree::Destruction);
        shadow_bolt.cast_time = 3.0 - 0.1 * t(talents.bane);
        shadow_bolt.mana_cost = 420.0 * cataclysm;
        shadow_bolt.base_damage = (544.0 + 607.0) / 2.0;
        shadow_bolt.coefficient = 3.0 / 3.5 + 0.04 * t(talents.shadow_and_flame);
        shadow_bolt.bonus_crit = t(talents.devastation);
        shadow_bolt.crit_multiplier = destruction_crit;
        shadow_bolt.damage_modifier = shadow;

        let mut incinerate = SpellDef::new(SpellId::Incinerate, School::Fire, SpellTree::Destruction);
        incinerate.cast_time = (2.5 * (1.0 - 0.02 * t(talents.emberstorm)) * 100.0).round() / 100.0;
        incinerate.mana_cost = 355.0 * cataclysm;
        incinerate.base_damage = (444.0 + 514.0) / 2.0;
        incinerate.coefficient = 2.5 / 3.5 + 0.04 * t(talents.shadow_and_flame);
        incinerate.bonus_crit = t(talents.devastation);
        incinerate.crit_multiplier = destruction_crit;
        incinerate.damage_modifier = fire;

        let mut searing_pain = SpellDef::new(SpellId::SearingPain, School::Fire, SpellTree::Destruction);
        searing_pain.cast_time = 1.5;
        searing_pain.mana_cost = 205.0 * cataclysm;
        searing_pain.base_damage = (270.0 + 320.0) / 2.0;
        searing_pain.coefficient = 1.5 / 3.5;
        searing_pain.bonus_crit = t(talents.devastation) + 4.0 * t(talents.improved_searing_pain);
        searing_pain.crit_multiplier = destruction_crit;
        searing_pain.damage_modifier = fire;

        let mut life_tap = SpellDef::new(SpellId::LifeTap, School::None, SpellTree::Affliction);
        life_tap.can_miss = false;
        life_tap.mana_gain = 582.0 * (1.0 + 0.1 * t(talents.improved_life_tap));
        life_tap.coefficient = 0.8 * (1.0 + 0.1 * t(talents.improved_life_tap));

        let mut corruption = SpellDef::new(SpellId::Corruption, School::Shadow, SpellTree::Affliction);
        corruption.cast_time = ((2.0 - 0.4 * t(talents.improved_corruption)) * 100.0).round() / 100.0;
        corruption.mana_cost = 370.0;
        corruption.bonus_hit = affliction_hit;
        corruption.damage_modifier = shadow;
        corruption.dot = Some(DotDef {
            spell: SpellId::Corruption,
            school: School::Shadow,
            duration: 18.0,
            tick_rate: 3.0,
            base_damage: 900.0,
            coefficient: 0.936,
        });

        let mut immolate = SpellDef::new(SpellId::Immolate, School::Fire, SpellTree::Destruction);
        immolate.cast_time = 2.0 - 0.1 * t(talents.bane);
        immolate.mana_cost = 445.0 * cataclysm;
        immolate.base_damage = 331.0;
        immolate.coefficient = 0.2;
        immolate.bonus_crit = t(talents.devastation);
        immolate.crit_multiplier = destruction_crit;
        immolate.damage_modifier = fire;
        immolate.dot = Some(DotDef {
            spell: SpellId::Immolate,
            school: School::Fire,
            duration: 15.0,
            tick_rate: 3.0,
            base_damage: 615.0,
            coefficient: 0.65,
        });

        let mut elements = SpellDef::new(SpellId::CurseOfTheElements, School::Shadow, SpellTree::Affliction);
        elements.mana_cost = 260.0;
        elements.bonus_hit = affliction_hit;
        elements.aura = Some(AuraId::CurseOfTheElements);

        let mut recklessness =
            SpellDef::new(SpellId::CurseOfRecklessness, School::Shadow, SpellTree::Affliction);
        recklessness.mana_cost = 160.0;
        recklessness.bonus_hit = affliction_hit;
        recklessness.aura = Some(AuraId::CurseOfRecklessness);

        Spellbook {
            spells: vec![
                shadow_bolt,
                incinerate,
                searing_pain,
                life_tap,
                corruption,
                immolate,
                elements,
                recklessness,
            ],
        }
    }

    pub fn get(&self, id: SpellId) -> Option<&SpellDef> {
        self.spells.iter().find(|s| s.id == id)
    }

    /// Like [`get`](Self::get) but an unknown spell is an error
    pub fn spell(&self, id: SpellId) -> Result<&SpellDef, SimError> {
        self.get(id)
            .ok_or_else(|| SimError::UnknownSpell(id.name().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_talents_fold_into_spells() {
        let talents = Talents {
            bane: 5,
            cataclysm: 5,
            ruin: 1,
            shadow_and_flame: 5,
            improved_corruption: 5,
            ..Talents::default()
        };
        let book = Spellbook::new(&talents, 1.5);

        let sb = book.get(SpellId::ShadowBolt).unwrap();
        assert!((sb.cast_time - 2.5).abs() < 1e-9);
        assert!((sb.mana_cost - 399.0).abs() < 1e-9);
        assert!((sb.coefficient - (3.0 / 3.5 + 0.2)).abs() < 1e-9);
        assert!((sb.crit_multiplier - 2.0).abs() < 1e-9);

        let corruption = book.get(SpellId::Corruption).unwrap();
        assert_eq!(corruption.cast_time, 0.0);
        assert!(corruption.dot.is_some());
    }

    #[test]
    fn test_every_spell_defined() {
        let book = Spellbook::new(&Talents::default(), 1.5);
        for id in SpellId::all() {
            assert!(book.spell(*id).is_ok());
        }
    }

    #[test]
    fn test_spell_id_from_name() {
        assert_eq!("shadow_bolt".parse::<SpellId>().unwrap(), SpellId::ShadowBolt);
        assert_eq!("Curse of the Elements".parse::<SpellId>().unwrap(), SpellId::CurseOfTheElements);
        assert!(matches!("Chaos Bolt".parse::<SpellId>(), Err(SimError::UnknownSpell(_))));
    }

    #[test]
    fn test_spell_categories() {
        assert!(SpellId::Incinerate.is_filler());
        assert!(!SpellId::LifeTap.is_filler());
        assert!(SpellId::CurseOfTheElements.is_curse());
        assert!(SpellId::Immolate.is_dot());
    }
}
