//! Aura identifiers and static definitions

use crate::error::SimError;
use crate::spell::SpellId;
use crate::stat_block::Modifier;
use crate::types::{School, Stat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every aura the simulator knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuraId {
    ImprovedShadowBolt,
    CurseOfTheElements,
    CurseOfRecklessness,
    ShadowTrance,
    Flameshadow,
    Shadowflame,
    Spellstrike,
    PowerInfusion,
    EyeOfMagtheridon,
    SextantOfUnstableCurrents,
    QuagmirransEye,
    ShiffarsNexusHorn,
    #[serde(rename = "mana_etched_4_set")]
    ManaEtched4Set,
    DestructionPotion,
    FlameCap,
    BloodFury,
    Bloodlust,
    DrumsOfBattle,
    DrumsOfWar,
    DrumsOfRestoration,
    BlackBook,
}

impl AuraId {
    pub fn all() -> &'static [AuraId] {
        &[
            AuraId::ImprovedShadowBolt,
            AuraId::CurseOfTheElements,
            AuraId::CurseOfRecklessness,
            AuraId::ShadowTrance,
            AuraId::Flameshadow,
            AuraId::Shadowflame,
            AuraId::Spellstrike,
            AuraId::PowerInfusion,
            AuraId::EyeOfMagtheridon,
            AuraId::SextantOfUnstableCurrents,
            AuraId::QuagmirransEye,
            AuraId::ShiffarsNexusHorn,
            AuraId::ManaEtched4Set,
            AuraId::DestructionPotion,
            AuraId::FlameCap,
            AuraId::BloodFury,
            AuraId::Bloodlust,
            AuraId::DrumsOfBattle,
            AuraId::DrumsOfWar,
            AuraId::DrumsOfRestoration,
            AuraId::BlackBook,
        ]
    }

    /// Display name used in the combat log and in results
    pub fn name(self) -> &'static str {
        match self {
            AuraId::ImprovedShadowBolt => "Improved Shadow Bolt",
            AuraId::CurseOfTheElements => "Curse of the Elements",
            AuraId::CurseOfRecklessness => "Curse of Recklessness",
            AuraId::ShadowTrance => "Shadow Trance",
            AuraId::Flameshadow => "Flameshadow",
            AuraId::Shadowflame => "Shadowflame",
            AuraId::Spellstrike => "Spellstrike",
            AuraId::PowerInfusion => "Power Infusion",
            AuraId::EyeOfMagtheridon => "Eye of Magtheridon",
            AuraId::SextantOfUnstableCurrents => "Sextant of Unstable Currents",
            AuraId::QuagmirransEye => "Quagmirran's Eye",
            AuraId::ShiffarsNexusHorn => "Shiffar's Nexus-Horn",
            AuraId::ManaEtched4Set => "Mana-Etched 4-Set Bonus",
            AuraId::DestructionPotion => "Destruction Potion",
            AuraId::FlameCap => "Flame Cap",
            AuraId::BloodFury => "Blood Fury",
            AuraId::Bloodlust => "Bloodlust",
            AuraId::DrumsOfBattle => "Drums of Battle",
            AuraId::DrumsOfWar => "Drums of War",
            AuraId::DrumsOfRestoration => "Drums of Restoration",
            AuraId::BlackBook => "Black Book",
        }
    }

    /// Configuration key, matching the serde name
    pub fn key(self) -> &'static str {
        match self {
            AuraId::ImprovedShadowBolt => "improved_shadow_bolt",
            AuraId::CurseOfTheElements => "curse_of_the_elements",
            AuraId::CurseOfRecklessness => "curse_of_recklessness",
            AuraId::ShadowTrance => "shadow_trance",
            AuraId::Flameshadow => "flameshadow",
            AuraId::Shadowflame => "shadowflame",
            AuraId::Spellstrike => "spellstrike",
            AuraId::PowerInfusion => "power_infusion",
            AuraId::EyeOfMagtheridon => "eye_of_magtheridon",
            AuraId::SextantOfUnstableCurrents => "sextant_of_unstable_currents",
            AuraId::QuagmirransEye => "quagmirrans_eye",
            AuraId::ShiffarsNexusHorn => "shiffars_nexus_horn",
            AuraId::ManaEtched4Set => "mana_etched_4_set",
            AuraId::DestructionPotion => "destruction_potion",
            AuraId::FlameCap => "flame_cap",
            AuraId::BloodFury => "blood_fury",
            AuraId::Bloodlust => "bloodlust",
            AuraId::DrumsOfBattle => "drums_of_battle",
            AuraId::DrumsOfWar => "drums_of_war",
            AuraId::DrumsOfRestoration => "drums_of_restoration",
            AuraId::BlackBook => "black_book",
        }
    }

    pub fn is_trinket(self) -> bool {
        matches!(
            self,
            AuraId::EyeOfMagtheridon
                | AuraId::SextantOfUnstableCurrents
                | AuraId::QuagmirransEye
                | AuraId::ShiffarsNexusHorn
        )
    }

    pub fn is_drums(self) -> bool {
        matches!(
            self,
            AuraId::DrumsOfBattle | AuraId::DrumsOfWar | AuraId::DrumsOfRestoration
        )
    }

    /// Abilities a rotation can activate on demand
    pub fn is_usable(self) -> bool {
        matches!(
            self,
            AuraId::PowerInfusion
                | AuraId::DestructionPotion
                | AuraId::FlameCap
                | AuraId::BloodFury
                | AuraId::Bloodlust
                | AuraId::DrumsOfBattle
                | AuraId::DrumsOfWar
                | AuraId::DrumsOfRestoration
                | AuraId::BlackBook
        )
    }

    /// Auras that live on the pet rather than the player
    pub fn is_pet_aura(self) -> bool {
        matches!(self, AuraId::BlackBook)
    }
}

impl fmt::Display for AuraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AuraId {
    type Err = SimError;

    /// Accepts either the configuration key or the display name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuraId::all()
            .iter()
            .copied()
            .find(|id| id.key() == s || id.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SimError::UnknownAura(s.to_string()))
    }
}

/// A stat change an aura makes while active
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatDelta {
    pub stat: Stat,
    pub modifier: Modifier,
}

impl StatDelta {
    pub fn flat(stat: Stat, value: f64) -> Self {
        StatDelta {
            stat,
            modifier: Modifier::Flat(value),
        }
    }

    pub fn factor(stat: Stat, value: f64) -> Self {
        StatDelta {
            stat,
            modifier: Modifier::Factor(value),
        }
    }
}

/// What an aura does while active
#[derive(Debug, Clone, PartialEq)]
pub enum AuraEffect {
    /// Only the active flag matters (curses, Shadow Trance)
    Marker,
    /// Modifiers applied on activation and removed on fade
    Stats(Vec<StatDelta>),
    /// Charges consumed by qualifying hits, each boosting damage
    Stacking { max_stacks: u32, damage_modifier: f64 },
    /// Grants mana at a fixed interval until its ticks run out
    Periodic {
        interval: f64,
        ticks: u32,
        gain_per_tick: f64,
    },
}

impl AuraEffect {
    /// Spread a total mana gain evenly over the ticks of `duration`
    pub fn periodic_mana(duration: f64, interval: f64, total: f64) -> Self {
        let ticks = (duration / interval).round() as u32;
        AuraEffect::Periodic {
            interval,
            ticks,
            gain_per_tick: total / ticks.max(1) as f64,
        }
    }

    pub fn stat_deltas(&self) -> &[StatDelta] {
        match self {
            AuraEffect::Stats(deltas) => deltas,
            _ => &[],
        }
    }

    pub fn is_periodic(&self) -> bool {
        matches!(self, AuraEffect::Periodic { .. })
    }
}

/// How an aura's reuse is restricted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateKind {
    /// Visible cooldown. Using the ability early is an error.
    Cooldown,
    /// Internal proc cooldown. Activation is silently refused.
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gate {
    pub kind: GateKind,
    pub duration: f64,
}

/// Combat events that can trigger a proc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcEvent {
    Hit,
    Crit,
    Resist,
    DotTick,
}

/// The event a proc check is evaluated against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcContext {
    pub event: ProcEvent,
    pub school: School,
    pub spell: Option<SpellId>,
}

/// When an aura procs, and how likely it is to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcTrigger {
    pub event: ProcEvent,
    /// Chance in percent
    pub chance: f64,
    pub school: Option<School>,
    pub spell: Option<SpellId>,
}

impl ProcTrigger {
    pub fn on(event: ProcEvent, chance: f64) -> Self {
        ProcTrigger {
            event,
            chance,
            school: None,
            spell: None,
        }
    }

    pub fn for_school(mut self, school: School) -> Self {
        self.school = Some(school);
        self
    }

    pub fn for_spell(mut self, spell: SpellId) -> Self {
        self.spell = Some(spell);
        self
    }

    /// Whether an event qualifies for a roll
    pub fn matches(&self, ctx: &ProcContext) -> bool {
        self.event == ctx.event
            && self.school.map_or(true, |s| s == ctx.school)
            && self.spell.map_or(true, |s| ctx.spell == Some(s))
    }
}

/// Static definition of an aura
#[derive(Debug, Clone, PartialEq)]
pub struct AuraDef {
    pub id: AuraId,
    /// Seconds the aura lasts once applied
    pub duration: f64,
    /// Counted in the actor's important-aura total
    pub important: bool,
    pub effect: AuraEffect,
    pub gate: Option<Gate>,
    pub trigger: Option<ProcTrigger>,
}

impl AuraDef {
    pub fn new(id: AuraId, duration: f64) -> Self {
        AuraDef {
            id,
            duration,
            important: false,
            effect: AuraEffect::Marker,
            gate: None,
            trigger: None,
        }
    }

    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }

    pub fn with_effect(mut self, effect: AuraEffect) -> Self {
        self.effect = effect;
        self
    }

    pub fn with_stats(self, deltas: Vec<StatDelta>) -> Self {
        self.with_effect(AuraEffect::Stats(deltas))
    }

    pub fn with_cooldown(mut self, duration: f64) -> Self {
        self.gate = Some(Gate {
            kind: GateKind::Cooldown,
            duration,
        });
        self
    }

    pub fn with_hidden_cooldown(mut self, duration: f64) -> Self {
        self.gate = Some(Gate {
            kind: GateKind::Hidden,
            duration,
        });
        self
    }

    pub fn with_trigger(mut self, trigger: ProcTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aura_id_from_key_and_name() {
        assert_eq!(AuraId::from_str("power_infusion").unwrap(), AuraId::PowerInfusion);
        assert_eq!(AuraId::from_str("Shiffar's Nexus-Horn").unwrap(), AuraId::ShiffarsNexusHorn);
        assert!(matches!(AuraId::from_str("nope"), Err(SimError::UnknownAura(_))));
    }

    #[test]
    fn test_key_matches_serde_name() {
        for id in AuraId::all() {
            let json = serde_json::to_string(id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.key()));
        }
    }

    #[test]
    fn test_periodic_mana_split() {
        let effect = AuraEffect::periodic_mana(15.0, 3.0, 600.0);
        assert_eq!(
            effect,
            AuraEffect::Periodic {
                interval: 3.0,
                ticks: 5,
                gain_per_tick: 120.0
            }
        );
    }

    #[test]
    fn test_trigger_filters() {
        let trigger = ProcTrigger::on(ProcEvent::Hit, 5.0).for_school(School::Shadow);
        let shadow_hit = ProcContext {
            event: ProcEvent::Hit,
            school: School::Shadow,
            spell: Some(SpellId::ShadowBolt),
        };
        let fire_hit = ProcContext {
            school: School::Fire,
            ..shadow_hit
        };
        assert!(trigger.matches(&shadow_hit));
        assert!(!trigger.matches(&fire_hit));

        let isb = ProcTrigger::on(ProcEvent::Crit, 100.0).for_spell(SpellId::ShadowBolt);
        let corruption_tick = ProcContext {
            event: ProcEvent::Crit,
            school: School::Shadow,
            spell: Some(SpellId::Corruption),
        };
        assert!(!isb.matches(&corruption_tick));
    }
}
