//! Core types shared across the simulator

use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric character attribute tracked by a [`StatBlock`](crate::StatBlock)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Stamina,
    Intellect,
    Spirit,
    SpellPower,
    ShadowPower,
    FirePower,
    HasteRating,
    CritRating,
    HitRating,
    /// Flat spell crit chance in percent
    CritChance,
    MaxMana,
    Mp5,
    /// Multiplier applied to every mana cost (1.0 = unmodified)
    ManaCostModifier,
    AttackPower,
}

impl Stat {
    /// Get all stats
    pub fn all() -> &'static [Stat] {
        &[
            Stat::Stamina,
            Stat::Intellect,
            Stat::Spirit,
            Stat::SpellPower,
            Stat::ShadowPower,
            Stat::FirePower,
            Stat::HasteRating,
            Stat::CritRating,
            Stat::HitRating,
            Stat::CritChance,
            Stat::MaxMana,
            Stat::Mp5,
            Stat::ManaCostModifier,
            Stat::AttackPower,
        ]
    }

    /// Display name used in the combat log
    pub fn name(self) -> &'static str {
        match self {
            Stat::Stamina => "Stamina",
            Stat::Intellect => "Intellect",
            Stat::Spirit => "Spirit",
            Stat::SpellPower => "Spell Power",
            Stat::ShadowPower => "Shadow Power",
            Stat::FirePower => "Fire Power",
            Stat::HasteRating => "Haste Rating",
            Stat::CritRating => "Crit Rating",
            Stat::HitRating => "Hit Rating",
            Stat::CritChance => "Crit Chance",
            Stat::MaxMana => "Max Mana",
            Stat::Mp5 => "Mp5",
            Stat::ManaCostModifier => "Mana Cost Modifier",
            Stat::AttackPower => "Attack Power",
        }
    }

    /// Whether a pet's derived stats read this stat from its owner
    pub fn is_pet_linked(self) -> bool {
        matches!(
            self,
            Stat::Stamina | Stat::Intellect | Stat::SpellPower | Stat::ShadowPower | Stat::FirePower
        )
    }

    /// Format a value of this stat for display. Rounding is display-only.
    pub fn display_value(self, value: f64) -> String {
        match self {
            Stat::CritChance => format!("{:.2}%", value),
            Stat::ManaCostModifier => format!("{:.2}", value),
            _ => format!("{:.0}", value),
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Magic school of a spell or damage event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum School {
    Shadow,
    Fire,
    /// Utility spells and physical attacks
    None,
}

/// Playable race, which determines base attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Race {
    Human,
    Gnome,
    Orc,
    Undead,
    BloodElf,
}

/// Summoned demon accompanying the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetKind {
    Imp,
    Voidwalker,
    Succubus,
    Felhunter,
    Felguard,
}

impl PetKind {
    pub fn name(self) -> &'static str {
        match self {
            PetKind::Imp => "Imp",
            PetKind::Voidwalker => "Voidwalker",
            PetKind::Succubus => "Succubus",
            PetKind::Felhunter => "Felhunter",
            PetKind::Felguard => "Felguard",
        }
    }

    /// Ranged pets cast Firebolt instead of meleeing
    pub fn is_ranged(self) -> bool {
        matches!(self, PetKind::Imp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_serde_names() {
        let json = serde_json::to_string(&Stat::SpellPower).unwrap();
        assert_eq!(json, "\"spell_power\"");
        let stat: Stat = serde_json::from_str("\"mana_cost_modifier\"").unwrap();
        assert_eq!(stat, Stat::ManaCostModifier);
    }

    #[test]
    fn test_pet_linked_stats() {
        assert!(Stat::SpellPower.is_pet_linked());
        assert!(Stat::FirePower.is_pet_linked());
        assert!(!Stat::HasteRating.is_pet_linked());
        assert!(!Stat::ManaCostModifier.is_pet_linked());
    }

    #[test]
    fn test_display_value_rounding() {
        assert_eq!(Stat::SpellPower.display_value(1119.6), "1120");
        assert_eq!(Stat::CritChance.display_value(12.3456), "12.35%");
    }
}
