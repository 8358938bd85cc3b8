//! SimConfig - The full description of one simulated build

use super::{ConfigError, GameConstants};
use crate::aura::{catalog, AuraId};
use crate::spell::SpellId;
use crate::types::{PetKind, Race, Stat};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Everything a simulation run reads from configuration
///
/// `player`, `rotation` and `settings` are required. The remaining
/// sections default to "nothing selected".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub player: PlayerConfig,
    #[serde(default)]
    pub talents: Talents,
    #[serde(default)]
    pub gear: Vec<GearPiece>,
    #[serde(default)]
    pub sets: SetBonuses,
    #[serde(default)]
    pub trinkets: Vec<AuraId>,
    #[serde(default)]
    pub auras: SelectedAuras,
    #[serde(default)]
    pub consumables: Consumables,
    pub rotation: RotationConfig,
    pub settings: Settings,
    #[serde(default)]
    pub constants: GameConstants,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub race: Race,
    #[serde(default)]
    pub pet: Option<PetKind>,
}

/// Talent ranks (0 = not taken)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Talents {
    pub improved_shadow_bolt: u8,
    pub bane: u8,
    pub devastation: u8,
    pub ruin: u8,
    pub shadow_and_flame: u8,
    pub emberstorm: u8,
    pub cataclysm: u8,
    pub improved_searing_pain: u8,
    pub shadow_mastery: u8,
    pub improved_corruption: u8,
    pub improved_life_tap: u8,
    pub nightfall: u8,
    pub suppression: u8,
    pub demonic_embrace: u8,
}

impl Talents {
    /// (name, taken rank, max rank) for every talent
    pub fn ranks(&self) -> [(&'static str, u8, u8); 14] {
        [
            ("improved_shadow_bolt", self.improved_shadow_bolt, 5),
            ("bane", self.bane, 5),
            ("devastation", self.devastation, 5),
            ("ruin", self.ruin, 1),
            ("shadow_and_flame", self.shadow_and_flame, 5),
            ("emberstorm", self.emberstorm, 5),
            ("cataclysm", self.cataclysm, 5),
            ("improved_searing_pain", self.improved_searing_pain, 3),
            ("shadow_mastery", self.shadow_mastery, 5),
            ("improved_corruption", self.improved_corruption, 5),
            ("improved_life_tap", self.improved_life_tap, 2),
            ("nightfall", self.nightfall, 2),
            ("suppression", self.suppression, 5),
            ("demonic_embrace", self.demonic_embrace, 5),
        ]
    }
}

/// An item, enchant or gem and the stats it grants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearPiece {
    pub name: String,
    #[serde(default)]
    pub stats: BTreeMap<Stat, f64>,
}

/// Equipped pieces per item set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetBonuses {
    pub t4: u8,
    pub spellstrike: u8,
    pub mana_etched: u8,
}

/// Raid buffs and external cooldowns present for the encounter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectedAuras {
    pub arcane_intellect: bool,
    pub mark_of_the_wild: bool,
    pub blessing_of_kings: bool,
    pub fel_armor: bool,
    pub wrath_of_air_totem: bool,
    pub totem_of_wrath: bool,
    pub power_infusion: bool,
    pub bloodlust: bool,
    /// Which drums the party uses, if any
    pub drums: Option<AuraId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Consumables {
    pub destruction_potion: bool,
    pub flame_cap: bool,
    pub black_book: bool,
}

/// Inputs for the built-in priority rotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationConfig {
    pub filler: SpellId,
    #[serde(default)]
    pub curse: Option<SpellId>,
    #[serde(default)]
    pub dots: Vec<SpellId>,
    /// Abilities used as soon as they are ready
    #[serde(default)]
    pub cooldowns: Vec<AuraId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub min_fight_length: f64,
    pub max_fight_length: f64,
    pub iterations: u32,
    #[serde(default)]
    pub seed: u64,
    /// Record the combat log of the first trial
    #[serde(default)]
    pub combat_log: bool,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

impl SimConfig {
    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_settings()?;
        self.validate_talents()?;
        self.validate_gear()?;
        self.validate_items()?;
        self.validate_rotation()
    }

    fn validate_settings(&self) -> Result<(), ConfigError> {
        let s = &self.settings;
        if !(s.min_fight_length.is_finite() && s.min_fight_length > 0.0) {
            return Err(invalid(format!(
                "min_fight_length must be positive, got {}",
                s.min_fight_length
            )));
        }
        if !s.max_fight_length.is_finite() || s.max_fight_length < s.min_fight_length {
            return Err(invalid(format!(
                "max_fight_length ({}) must be at least min_fight_length ({})",
                s.max_fight_length, s.min_fight_length
            )));
        }
        if s.iterations == 0 {
            return Err(invalid("iterations must be at least 1".to_string()));
        }
        Ok(())
    }

    fn validate_talents(&self) -> Result<(), ConfigError> {
        for (name, rank, max) in self.talents.ranks() {
            if rank > max {
                return Err(invalid(format!(
                    "talent {} has rank {} but max rank is {}",
                    name, rank, max
                )));
            }
        }
        Ok(())
    }

    fn validate_gear(&self) -> Result<(), ConfigError> {
        for piece in &self.gear {
            for (stat, value) in &piece.stats {
                if !value.is_finite() || *value < 0.0 {
                    return Err(invalid(format!(
                        "{} has invalid {} value {}",
                        piece.name,
                        stat.name(),
                        value
                    )));
                }
            }
        }
        Ok(())
    }

    fn validate_items(&self) -> Result<(), ConfigError> {
        if self.trinkets.len() > 2 {
            return Err(invalid(format!(
                "at most 2 trinkets can be equipped, got {}",
                self.trinkets.len()
            )));
        }
        let mut seen = HashSet::new();
        for trinket in &self.trinkets {
            if !trinket.is_trinket() {
                return Err(invalid(format!("{} is not a trinket", trinket.name())));
            }
            if !seen.insert(*trinket) {
                return Err(invalid(format!("{} equipped twice", trinket.name())));
            }
        }
        if let Some(drums) = self.auras.drums {
            if !drums.is_drums() {
                return Err(invalid(format!("{} is not a drum", drums.name())));
            }
        }
        if self.sets.t4 > 5 || self.sets.spellstrike > 2 || self.sets.mana_etched > 5 {
            return Err(invalid("set piece count exceeds set size".to_string()));
        }
        if self.consumables.black_book && self.player.pet.is_none() {
            return Err(invalid("black_book requires a pet".to_string()));
        }
        Ok(())
    }

    fn validate_rotation(&self) -> Result<(), ConfigError> {
        let r = &self.rotation;
        if !r.filler.is_filler() {
            return Err(invalid(format!("{} cannot be used as filler", r.filler.name())));
        }
        if let Some(curse) = r.curse {
            if !curse.is_curse() {
                return Err(invalid(format!("{} is not a curse", curse.name())));
            }
        }
        for dot in &r.dots {
            if !dot.is_dot() {
                return Err(invalid(format!("{} is not a damage over time spell", dot.name())));
            }
        }

        let player_auras: HashSet<AuraId> = catalog::player_auras(self).iter().map(|d| d.id).collect();
        let pet_auras: HashSet<AuraId> = catalog::pet_auras(self).iter().map(|d| d.id).collect();
        for id in &r.cooldowns {
            if !id.is_usable() {
                return Err(invalid(format!("{} is not a usable ability", id.name())));
            }
            if !player_auras.contains(id) && !pet_auras.contains(id) {
                return Err(invalid(format!(
                    "{} is in the rotation but not enabled for this build",
                    id.name()
                )));
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_config, parse_toml};

    #[test]
    fn test_default_config_is_valid() {
        assert!(default_config().is_ok());
    }

    #[test]
    fn test_talent_rank_over_max_rejected() {
        let mut config = default_config().unwrap();
        config.talents.ruin = 2;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_non_positive_fight_length_rejected() {
        let mut config = default_config().unwrap();
        config.settings.min_fight_length = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let mut config = default_config().unwrap();
        config.settings.iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_aura_name_rejected_by_parser() {
        let result: Result<SelectedAuras, _> = parse_toml("drums = \"drums_of_doom\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_disabled_cooldown_rejected() {
        let mut config = default_config().unwrap();
        config.auras.power_infusion = false;
        config.rotation.cooldowns = vec![AuraId::PowerInfusion];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_trinket_rejected() {
        let mut config = default_config().unwrap();
        config.trinkets = vec![AuraId::Bloodlust];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gear_stats_parse_from_table() {
        let piece: GearPiece = parse_toml(
            "name = \"Spellfire Robe\"\n[stats]\nintellect = 17\nfire_power = 72\n",
        )
        .unwrap();
        assert_eq!(piece.stats.get(&Stat::FirePower), Some(&72.0));
    }
}
