//! Aura catalog - Definitions of every aura and which ones a build enables

use super::types::{AuraDef, AuraEffect, AuraId, ProcEvent, ProcTrigger, StatDelta};
use crate::config::SimConfig;
use crate::spell::SpellId;
use crate::types::{Race, School, Stat};

/// Definition of an aura for the given build
pub fn definition(id: AuraId, config: &SimConfig) -> AuraDef {
    let haste_per_percent = config.constants.haste_rating_per_percent;
    match id {
        AuraId::ImprovedShadowBolt => AuraDef::new(id, 12.0)
            .with_effect(AuraEffect::Stacking {
                max_stacks: 4,
                damage_modifier: 1.0 + 0.04 * config.talents.improved_shadow_bolt as f64,
            })
            .with_trigger(ProcTrigger::on(ProcEvent::Crit, 100.0).for_spell(SpellId::ShadowBolt)),
        AuraId::CurseOfTheElements => AuraDef::new(id, 300.0),
        AuraId::CurseOfRecklessness => AuraDef::new(id, 120.0),
        AuraId::ShadowTrance => AuraDef::new(id, 10.0).important().with_trigger(
            ProcTrigger::on(ProcEvent::DotTick, 2.0 * config.talents.nightfall as f64)
                .for_spell(SpellId::Corruption),
        ),
        AuraId::Flameshadow => AuraDef::new(id, 15.0)
            .important()
            .with_stats(vec![StatDelta::flat(Stat::ShadowPower, 135.0)])
            .with_trigger(ProcTrigger::on(ProcEvent::Hit, 5.0).for_school(School::Shadow)),
        AuraId::Shadowflame => AuraDef::new(id, 15.0)
            .important()
            .with_stats(vec![StatDelta::flat(Stat::FirePower, 135.0)])
            .with_trigger(ProcTrigger::on(ProcEvent::Hit, 5.0).for_school(School::Fire)),
        AuraId::Spellstrike => AuraDef::new(id, 10.0)
            .important()
            .with_stats(vec![StatDelta::flat(Stat::SpellPower, 92.0)])
            .with_trigger(ProcTrigger::on(ProcEvent::Hit, 5.0)),
        AuraId::PowerInfusion => AuraDef::new(id, 15.0)
            .important()
            .with_stats(vec![
                StatDelta::flat(Stat::HasteRating, 20.0 * haste_per_percent),
                StatDelta::factor(Stat::ManaCostModifier, 0.8),
            ])
            .with_cooldown(180.0),
        AuraId::EyeOfMagtheridon => AuraDef::new(id, 10.0)
            .important()
            .with_stats(vec![StatDelta::flat(Stat::SpellPower, 170.0)])
            .with_trigger(ProcTrigger::on(ProcEvent::Resist, 100.0)),
        AuraId::SextantOfUnstableCurrents => AuraDef::new(id, 15.0)
            .important()
            .with_stats(vec![StatDelta::flat(Stat::SpellPower, 190.0)])
            .with_hidden_cooldown(45.0)
            .with_trigger(ProcTrigger::on(ProcEvent::Crit, 20.0)),
        AuraId::QuagmirransEye => AuraDef::new(id, 6.0)
            .important()
            .with_stats(vec![StatDelta::flat(Stat::HasteRating, 320.0)])
            .with_hidden_cooldown(45.0)
            .with_trigger(ProcTrigger::on(ProcEvent::Hit, 10.0)),
        AuraId::ShiffarsNexusHorn => AuraDef::new(id, 10.0)
            .important()
            .with_stats(vec![StatDelta::flat(Stat::SpellPower, 225.0)])
            .with_hidden_cooldown(45.0)
            .with_trigger(ProcTrigger::on(ProcEvent::Crit, 20.0)),
        AuraId::ManaEtched4Set => AuraDef::new(id, 15.0)
            .important()
            .with_stats(vec![StatDelta::flat(Stat::SpellPower, 110.0)])
            .with_trigger(ProcTrigger::on(ProcEvent::Hit, 2.0)),
        AuraId::DestructionPotion => AuraDef::new(id, 15.0)
            .important()
            .with_stats(vec![
                StatDelta::flat(Stat::SpellPower, 120.0),
                StatDelta::flat(Stat::CritChance, 2.0),
            ])
            .with_cooldown(120.0),
        AuraId::FlameCap => AuraDef::new(id, 60.0)
            .important()
            .with_stats(vec![StatDelta::flat(Stat::FirePower, 80.0)])
            .with_cooldown(180.0),
        AuraId::BloodFury => AuraDef::new(id, 15.0)
            .important()
            .with_stats(vec![StatDelta::flat(Stat::SpellPower, 140.0)])
            .with_cooldown(120.0),
        AuraId::Bloodlust => AuraDef::new(id, 40.0)
            .important()
            .with_stats(vec![StatDelta::flat(Stat::HasteRating, 30.0 * haste_per_percent)])
            .with_cooldown(600.0),
        AuraId::DrumsOfBattle => AuraDef::new(id, 30.0)
            .with_stats(vec![StatDelta::flat(Stat::HasteRating, 80.0)])
            .with_cooldown(120.0),
        AuraId::DrumsOfWar => AuraDef::new(id, 30.0)
            .with_stats(vec![StatDelta::flat(Stat::SpellPower, 30.0)])
            .with_cooldown(120.0),
        AuraId::DrumsOfRestoration => AuraDef::new(id, 15.0)
            .with_effect(AuraEffect::periodic_mana(15.0, 3.0, 600.0))
            .with_cooldown(120.0),
        AuraId::BlackBook => AuraDef::new(id, 30.0)
            .with_stats(vec![
                StatDelta::flat(Stat::SpellPower, 200.0),
                StatDelta::flat(Stat::AttackPower, 325.0),
            ])
            .with_cooldown(300.0),
    }
}

/// Auras the player carries for this build
pub fn player_auras(config: &SimConfig) -> Vec<AuraDef> {
    let mut ids = vec![AuraId::CurseOfTheElements, AuraId::CurseOfRecklessness];

    if config.talents.improved_shadow_bolt > 0 {
        ids.push(AuraId::ImprovedShadowBolt);
    }
    if config.talents.nightfall > 0 {
        ids.push(AuraId::ShadowTrance);
    }
    if config.sets.t4 >= 2 {
        ids.extend([AuraId::Flameshadow, AuraId::Shadowflame]);
    }
    if config.sets.spellstrike >= 2 {
        ids.push(AuraId::Spellstrike);
    }
    if config.sets.mana_etched >= 4 {
        ids.push(AuraId::ManaEtched4Set);
    }
    ids.extend(config.trinkets.iter().copied().filter(|id| id.is_trinket()));
    if config.auras.power_infusion {
        ids.push(AuraId::PowerInfusion);
    }
    if config.auras.bloodlust {
        ids.push(AuraId::Bloodlust);
    }
    if let Some(drums) = config.auras.drums.filter(|d| d.is_drums()) {
        ids.push(drums);
    }
    if config.consumables.destruction_potion {
        ids.push(AuraId::DestructionPotion);
    }
    if config.consumables.flame_cap {
        ids.push(AuraId::FlameCap);
    }
    if config.player.race == Race::Orc {
        ids.push(AuraId::BloodFury);
    }

    ids.into_iter().map(|id| definition(id, config)).collect()
}

/// Auras the pet carries for this build
pub fn pet_auras(config: &SimConfig) -> Vec<AuraDef> {
    if config.player.pet.is_some() && config.consumables.black_book {
        vec![definition(AuraId::BlackBook, config)]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aura::types::GateKind;
    use crate::config::default_config;

    #[test]
    fn test_isb_modifier_scales_with_rank() {
        let mut config = default_config().unwrap();
        config.talents.improved_shadow_bolt = 5;
        let def = definition(AuraId::ImprovedShadowBolt, &config);
        match def.effect {
            AuraEffect::Stacking {
                max_stacks,
                damage_modifier,
            } => {
                assert_eq!(max_stacks, 4);
                assert!((damage_modifier - 1.2).abs() < 1e-12);
            }
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn test_trinkets_use_hidden_cooldowns() {
        let config = default_config().unwrap();
        for id in [
            AuraId::SextantOfUnstableCurrents,
            AuraId::QuagmirransEye,
            AuraId::ShiffarsNexusHorn,
        ] {
            let def = definition(id, &config);
            assert_eq!(def.gate.map(|g| g.kind), Some(GateKind::Hidden));
        }
        assert_eq!(
            definition(AuraId::PowerInfusion, &config).gate.map(|g| g.kind),
            Some(GateKind::Cooldown)
        );
    }

    #[test]
    fn test_power_infusion_haste_is_twenty_percent() {
        let config = default_config().unwrap();
        let def = definition(AuraId::PowerInfusion, &config);
        let haste = def.effect.stat_deltas()[0];
        assert_eq!(haste.stat, Stat::HasteRating);
        assert_eq!(
            haste.modifier,
            crate::stat_block::Modifier::Flat(20.0 * config.constants.haste_rating_per_percent)
        );
    }

    #[test]
    fn test_enabled_auras_follow_build() {
        let mut config = default_config().unwrap();
        config.player.race = Race::Gnome;
        config.rotation.cooldowns.retain(|id| *id != AuraId::BloodFury);
        config.sets.t4 = 0;
        let ids: Vec<_> = player_auras(&config).iter().map(|d| d.id).collect();
        assert!(!ids.contains(&AuraId::BloodFury));
        assert!(!ids.contains(&AuraId::Flameshadow));
        assert!(ids.contains(&AuraId::CurseOfTheElements));
    }

    #[test]
    fn test_black_book_needs_pet() {
        let mut config = default_config().unwrap();
        config.consumables.black_book = true;
        config.player.pet = None;
        assert!(pet_auras(&config).is_empty());
    }
}
