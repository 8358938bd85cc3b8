//! Game constants configuration

use serde::{Deserialize, Serialize};

/// Tunable combat constants for a level 70 caster against a level 73 boss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default = "default_haste_rating_per_percent")]
    pub haste_rating_per_percent: f64,
    #[serde(default = "default_crit_rating_per_percent")]
    pub crit_rating_per_percent: f64,
    #[serde(default = "default_hit_rating_per_percent")]
    pub hit_rating_per_percent: f64,
    /// Intellect needed for 1% spell crit
    #[serde(default = "default_intellect_per_crit_percent")]
    pub intellect_per_crit_percent: f64,
    #[serde(default = "default_mana_per_intellect")]
    pub mana_per_intellect: f64,
    /// Spell hit chance with no hit rating
    #[serde(default = "default_base_hit_chance")]
    pub base_hit_chance: f64,
    #[serde(default = "default_max_hit_chance")]
    pub max_hit_chance: f64,
    #[serde(default = "default_crit_damage_multiplier")]
    pub crit_damage_multiplier: f64,
    #[serde(default = "default_global_cooldown")]
    pub global_cooldown: f64,
    #[serde(default = "default_min_global_cooldown")]
    pub min_global_cooldown: f64,
    /// Damage multiplier while Curse of the Elements is on the target
    #[serde(default = "default_curse_of_the_elements_modifier")]
    pub curse_of_the_elements_modifier: f64,
    #[serde(default = "default_pet_hit_chance")]
    pub pet_hit_chance: f64,
    #[serde(default = "default_pet_crit_chance")]
    pub pet_crit_chance: f64,
}

impl Default for GameConstants {
    fn default() -> Self {
        GameConstants {
            haste_rating_per_percent: default_haste_rating_per_percent(),
            crit_rating_per_percent: default_crit_rating_per_percent(),
            hit_rating_per_percent: default_hit_rating_per_percent(),
            intellect_per_crit_percent: default_intellect_per_crit_percent(),
            mana_per_intellect: default_mana_per_intellect(),
            base_hit_chance: default_base_hit_chance(),
            max_hit_chance: default_max_hit_chance(),
            crit_damage_multiplier: default_crit_damage_multiplier(),
            global_cooldown: default_global_cooldown(),
            min_global_cooldown: default_min_global_cooldown(),
            curse_of_the_elements_modifier: default_curse_of_the_elements_modifier(),
            pet_hit_chance: default_pet_hit_chance(),
            pet_crit_chance: default_pet_crit_chance(),
        }
    }
}

fn default_haste_rating_per_percent() -> f64 {
    15.77
}
fn default_crit_rating_per_percent() -> f64 {
    22.08
}
fn default_hit_rating_per_percent() -> f64 {
    12.62
}
fn default_intellect_per_crit_percent() -> f64 {
    81.95
}
fn default_mana_per_intellect() -> f64 {
    15.0
}
fn default_base_hit_chance() -> f64 {
    83.0
}
fn default_max_hit_chance() -> f64 {
    99.0
}
fn default_crit_damage_multiplier() -> f64 {
    1.5
}
fn default_global_cooldown() -> f64 {
    1.5
}
fn default_min_global_cooldown() -> f64 {
    1.0
}
fn default_curse_of_the_elements_modifier() -> f64 {
    1.10
}
fn default_pet_hit_chance() -> f64 {
    94.0
}
fn default_pet_crit_chance() -> f64 {
    5.0
}
