//! Rotation - Decides what the player does whenever it is free to act

use crate::actor::{Actor, Pet, Player};
use crate::aura::AuraId;
use crate::config::{GameConstants, RotationConfig};
use crate::dot::DotTracker;
use crate::spell::{CastContext, SpellId, Spellbook};

/// What the player does next
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Start casting a spell (ends the decision)
    Cast(SpellId),
    /// Activate an off-GCD ability, then decide again
    UseAura(AuraId),
    /// Do nothing until the next event
    Wait,
}

/// Read-only snapshot of the trial handed to a rotation
pub struct RotationView<'a> {
    pub time: f64,
    pub fight_remaining: f64,
    pub player: &'a Player,
    pub pet: Option<&'a Pet>,
    pub dots: &'a DotTracker,
    pub spellbook: &'a Spellbook,
    pub constants: &'a GameConstants,
}

impl<'a> RotationView<'a> {
    fn owner_auras(&self, id: AuraId) -> Option<&'a crate::aura::AuraRegistry> {
        if id.is_pet_aura() {
            self.pet.map(|p| p.auras())
        } else {
            Some(self.player.auras())
        }
    }

    /// The aura is configured on the actor that would carry it
    pub fn has_aura(&self, id: AuraId) -> bool {
        self.owner_auras(id).is_some_and(|a| a.contains(id))
    }

    pub fn aura_active(&self, id: AuraId) -> bool {
        self.owner_auras(id).is_some_and(|a| a.is_active(id))
    }

    pub fn aura_ready(&self, id: AuraId) -> bool {
        self.owner_auras(id).is_some_and(|a| a.is_ready(id))
    }

    pub fn aura_remaining(&self, id: AuraId) -> f64 {
        self.owner_auras(id).map_or(0.0, |a| a.duration_remaining(id))
    }

    pub fn dot_remaining(&self, spell: SpellId) -> f64 {
        self.dots.duration_remaining(spell)
    }

    pub fn mana(&self) -> f64 {
        self.player.mana
    }

    fn context(&self) -> CastContext<'a> {
        CastContext {
            stats: &self.player.stats,
            auras: &self.player.auras,
            dots: self.dots,
            constants: self.constants,
        }
    }

    pub fn mana_cost(&self, spell: SpellId) -> Option<f64> {
        self.spellbook.get(spell).map(|def| self.context().mana_cost(def))
    }

    pub fn cast_time(&self, spell: SpellId) -> Option<f64> {
        self.spellbook.get(spell).map(|def| self.context().cast_time(def))
    }

    pub fn can_afford(&self, spell: SpellId) -> bool {
        self.mana_cost(spell).is_some_and(|cost| cost <= self.player.mana)
    }
}

/// Pluggable decision hook
pub trait RotationPolicy {
    /// Called whenever the player is idle
    fn next_action(&mut self, view: &RotationView<'_>) -> Action;
}

/// Fixed priority list: cooldowns, curse, DoTs, filler, Life Tap
#[derive(Debug, Clone)]
pub struct PriorityRotation {
    filler: SpellId,
    curse: Option<SpellId>,
    dots: Vec<SpellId>,
    cooldowns: Vec<AuraId>,
}

impl PriorityRotation {
    pub fn new(config: &RotationConfig) -> Self {
        PriorityRotation {
            filler: config.filler,
            curse: config.curse,
            dots: config.dots.clone(),
            cooldowns: config.cooldowns.clone(),
        }
    }
}

impl RotationPolicy for PriorityRotation {
    fn next_action(&mut self, view: &RotationView<'_>) -> Action {
        for &id in &self.cooldowns {
            if view.has_aura(id) && view.aura_ready(id) && !view.aura_active(id) {
                return Action::UseAura(id);
            }
        }

        if let Some(curse) = self.curse {
            let curse_aura = view.spellbook.get(curse).and_then(|def| def.aura);
            if curse_aura.is_some_and(|id| !view.aura_active(id)) && view.can_afford(curse) {
                return Action::Cast(curse);
            }
        }

        for &dot in &self.dots {
            let worth_casting = view.fight_remaining > view.cast_time(dot).unwrap_or(0.0) + 6.0;
            if worth_casting && view.dot_remaining(dot) <= 0.0 && view.can_afford(dot) {
                return Action::Cast(dot);
            }
        }

        if view.can_afford(self.filler) {
            Action::Cast(self.filler)
        } else {
            Action::Cast(SpellId::LifeTap)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;

    fn view_parts() -> (crate::config::SimConfig, Player, DotTracker, Spellbook) {
        let mut config = default_config().unwrap();
        config.player.pet = None;
        config.consumables.black_book = false;
        config.rotation.cooldowns.retain(|id| !id.is_pet_aura());
        let player = Player::new(&config);
        let book = Spellbook::new(&config.talents, config.constants.crit_damage_multiplier);
        (config, player, DotTracker::new(), book)
    }

    #[test]
    fn test_cooldowns_then_curse_first() {
        let (config, mut player, dots, book) = view_parts();
        let mut rotation = PriorityRotation::new(&RotationConfig {
            filler: SpellId::ShadowBolt,
            curse: Some(SpellId::CurseOfTheElements),
            dots: vec![SpellId::Corruption],
            cooldowns: Vec::new(),
        });
        let view = RotationView {
            time: 0.0,
            fight_remaining: 180.0,
            player: &player,
            pet: None,
            dots: &dots,
            spellbook: &book,
            constants: &config.constants,
        };
        assert_eq!(rotation.next_action(&view), Action::Cast(SpellId::CurseOfTheElements));

        player.apply_aura(AuraId::CurseOfTheElements).unwrap();
        let view = RotationView {
            time: 1.5,
            fight_remaining: 178.5,
            player: &player,
            pet: None,
            dots: &dots,
            spellbook: &book,
            constants: &config.constants,
        };
        assert_eq!(rotation.next_action(&view), Action::Cast(SpellId::Corruption));
    }

    #[test]
    fn test_life_tap_when_out_of_mana() {
        let (config, mut player, dots, book) = view_parts();
        player.mana = 10.0;
        let mut rotation = PriorityRotation::new(&RotationConfig {
            filler: SpellId::ShadowBolt,
            curse: None,
            dots: Vec::new(),
            cooldowns: Vec::new(),
        });
        let view = RotationView {
            time: 0.0,
            fight_remaining: 60.0,
            player: &player,
            pet: None,
            dots: &dots,
            spellbook: &book,
            constants: &config.constants,
        };
        assert_eq!(rotation.next_action(&view), Action::Cast(SpellId::LifeTap));
    }

    #[test]
    fn test_missing_pet_aura_is_not_ready() {
        let (config, player, dots, book) = view_parts();
        let view = RotationView {
            time: 0.0,
            fight_remaining: 60.0,
            player: &player,
            pet: None,
            dots: &dots,
            spellbook: &book,
            constants: &config.constants,
        };
        assert!(!view.has_aura(AuraId::BlackBook));
        assert!(!view.aura_ready(AuraId::BlackBook));
    }
}
