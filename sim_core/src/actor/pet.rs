//! Pet - The summoned demon, whose stats derive from its owner

use super::Actor;
use crate::aura::{AuraDef, AuraHost, AuraRegistry};
use crate::combat_log::CombatLog;
use crate::stat_block::StatBlock;
use crate::types::{PetKind, School, Stat};

/// Share of the owner's spell damage granted as pet spell power
const SPELL_POWER_SCALING: f64 = 0.15;
/// Share of the owner's spell damage granted as pet attack power
const ATTACK_POWER_SCALING: f64 = 0.57;
/// Share of the owner's stamina and intellect inherited by the pet
const ATTRIBUTE_SCALING: f64 = 0.30;

#[derive(Debug, Clone)]
pub struct Pet {
    pub kind: PetKind,
    pub stats: StatBlock,
    pub auras: AuraRegistry,
    pub log: CombatLog,
    pub mana: f64,
    pub important_auras: u32,
    /// Seconds until the next attack
    pub attack_timer: f64,
}

/// Per-kind base values: (stamina, intellect, attack power, melee base damage)
fn base_stats(kind: PetKind) -> (f64, f64, f64, f64) {
    match kind {
        PetKind::Imp => (118.0, 369.0, 0.0, 0.0),
        PetKind::Voidwalker => (280.0, 133.0, 286.0, 85.0),
        PetKind::Succubus => (280.0, 133.0, 286.0, 110.0),
        PetKind::Felhunter => (280.0, 133.0, 286.0, 96.0),
        PetKind::Felguard => (280.0, 133.0, 286.0, 120.0),
    }
}

impl Pet {
    pub fn new(kind: PetKind, owner: &StatBlock, defs: Vec<AuraDef>) -> Self {
        let mut pet = Pet {
            kind,
            stats: StatBlock::new(kind.name()),
            auras: AuraRegistry::with_defs(defs),
            log: CombatLog::new(false),
            mana: 0.0,
            important_auras: 0,
            attack_timer: 0.0,
        };
        pet.sync_from_owner(owner);
        pet
    }

    /// Re-derive the baseline from the owner's current stats
    ///
    /// Only base values change, so modifiers from the pet's own auras
    /// stay in place.
    pub fn sync_from_owner(&mut self, owner: &StatBlock) {
        let (stamina, intellect, attack_power, _) = base_stats(self.kind);
        let spell_damage = owner.get(Stat::SpellPower)
            + owner.get(Stat::ShadowPower).max(owner.get(Stat::FirePower));

        self.stats
            .set_base(Stat::Stamina, stamina + ATTRIBUTE_SCALING * owner.get(Stat::Stamina));
        self.stats
            .set_base(Stat::Intellect, intellect + ATTRIBUTE_SCALING * owner.get(Stat::Intellect));
        self.stats
            .set_base(Stat::SpellPower, SPELL_POWER_SCALING * spell_damage);
        self.stats
            .set_base(Stat::AttackPower, attack_power + ATTACK_POWER_SCALING * spell_damage);
    }

    /// Seconds between attacks (Firebolt casts for the Imp)
    pub fn attack_interval(&self) -> f64 {
        if self.kind.is_ranged() {
            2.5
        } else {
            2.0
        }
    }

    pub fn attack_school(&self) -> School {
        if self.kind.is_ranged() {
            School::Fire
        } else {
            School::None
        }
    }

    pub fn attack_name(&self) -> &'static str {
        if self.kind.is_ranged() {
            "Firebolt"
        } else {
            "Melee"
        }
    }

    /// Non-crit damage of one attack
    pub fn attack_damage(&self) -> f64 {
        if self.kind.is_ranged() {
            (112.0 + 127.0) / 2.0 + self.stats.get(Stat::SpellPower) * 0.571
        } else {
            let (_, _, _, melee) = base_stats(self.kind);
            melee + self.stats.get(Stat::AttackPower) / 14.0 * self.attack_interval()
        }
    }

    pub fn crit_multiplier(&self) -> f64 {
        if self.kind.is_ranged() {
            1.5
        } else {
            2.0
        }
    }

    /// Return to the start-of-trial state
    pub fn reset(&mut self, owner: &StatBlock, record_log: bool) {
        self.stats.clear_modifiers();
        self.auras.reset_all();
        self.important_auras = 0;
        self.attack_timer = 0.0;
        self.sync_from_owner(owner);
        self.log.clear();
        self.log.set_enabled(record_log);
    }
}

impl Actor for Pet {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn auras(&self) -> &AuraRegistry {
        &self.auras
    }

    fn parts(&mut self) -> (&mut AuraRegistry, AuraHost<'_>) {
        (
            &mut self.auras,
            AuraHost {
                stats: &mut self.stats,
                mana: &mut self.mana,
                log: &mut self.log,
                important_auras: &mut self.important_auras,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aura::{AuraId, StatDelta};
    use crate::stat_block::Modifier;

    fn owner() -> StatBlock {
        let mut owner = StatBlock::new("player");
        owner.set_base(Stat::SpellPower, 1000.0);
        owner.set_base(Stat::ShadowPower, 100.0);
        owner.set_base(Stat::FirePower, 40.0);
        owner.set_base(Stat::Stamina, 400.0);
        owner
    }

    #[test]
    fn test_pet_tracks_owner_spell_damage() {
        let mut owner = owner();
        let mut pet = Pet::new(PetKind::Imp, &owner, Vec::new());
        assert!((pet.stats.get(Stat::SpellPower) - 165.0).abs() < 1e-9);
        assert!((pet.stats.get(Stat::Stamina) - 238.0).abs() < 1e-9);

        owner
            .add_modifier(Stat::SpellPower, AuraId::DestructionPotion, Modifier::Flat(120.0))
            .unwrap();
        pet.sync_from_owner(&owner);
        assert!((pet.stats.get(Stat::SpellPower) - 183.0).abs() < 1e-9);

        owner
            .remove_modifier(Stat::SpellPower, AuraId::DestructionPotion)
            .unwrap();
        pet.sync_from_owner(&owner);
        assert!((pet.stats.get(Stat::SpellPower) - 165.0).abs() < 1e-9);
    }

    #[test]
    fn test_pet_aura_survives_resync() {
        let owner = owner();
        let defs = vec![AuraDef::new(AuraId::BlackBook, 30.0)
            .with_stats(vec![StatDelta::flat(Stat::SpellPower, 200.0)])
            .with_cooldown(300.0)];
        let mut pet = Pet::new(PetKind::Felguard, &owner, defs);
        pet.use_aura(AuraId::BlackBook).unwrap();
        pet.sync_from_owner(&owner);
        assert!((pet.stats.get(Stat::SpellPower) - 365.0).abs() < 1e-9);
        pet.end_iteration().unwrap();
        assert!((pet.stats.get(Stat::SpellPower) - 165.0).abs() < 1e-9);
    }

    #[test]
    fn test_melee_damage_uses_attack_power() {
        let owner = owner();
        let pet = Pet::new(PetKind::Felguard, &owner, Vec::new());
        // AP = 286 + 0.57 * 1100 = 913
        let expected = 120.0 + 913.0 / 14.0 * 2.0;
        assert!((pet.attack_damage() - expected).abs() < 1e-6);
        assert_eq!(pet.attack_school(), School::None);
    }
}
