//! Aura engine - Timed buffs, debuffs and procs attached to an actor
//!
//! Each actor owns an [`AuraRegistry`] created once per run. Auras are
//! reset between trials rather than rebuilt.

mod active;
pub mod catalog;
mod types;

pub use active::{Aura, AuraHost, AuraOutcome, AuraState, FadeReason, Transition};
pub use types::{
    AuraDef, AuraEffect, AuraId, Gate, GateKind, ProcContext, ProcEvent, ProcTrigger, StatDelta,
};

use crate::error::SimError;
use crate::random::RandomSource;
use std::collections::{BTreeMap, HashMap};

/// What a batch of aura operations did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuraReport {
    pub applied: Vec<AuraId>,
    pub faded: Vec<AuraId>,
    pub pet_sync: bool,
    pub mana_gained: f64,
}

impl AuraReport {
    /// Fold one aura's outcome into the report
    pub fn record(&mut self, id: AuraId, outcome: AuraOutcome) {
        match outcome.transition {
            Transition::Applied => self.applied.push(id),
            Transition::Faded => self.faded.push(id),
            _ => {}
        }
        self.pet_sync |= outcome.pet_sync;
        self.mana_gained += outcome.mana_gained;
    }
}

/// All auras an actor can carry, in registration order
#[derive(Debug, Clone, Default)]
pub struct AuraRegistry {
    auras: Vec<Aura>,
    index: HashMap<AuraId, usize>,
}

impl AuraRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from definitions
    pub fn with_defs(defs: impl IntoIterator<Item = AuraDef>) -> Self {
        let mut registry = Self::new();
        for def in defs {
            registry.register(def);
        }
        registry
    }

    /// Register an aura, replacing any previous definition with the same id
    pub fn register(&mut self, def: AuraDef) {
        match self.index.get(&def.id) {
            Some(&i) => self.auras[i] = Aura::new(def),
            None => {
                self.index.insert(def.id, self.auras.len());
                self.auras.push(Aura::new(def));
            }
        }
    }

    pub fn contains(&self, id: AuraId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: AuraId) -> Option<&Aura> {
        self.index.get(&id).map(|&i| &self.auras[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aura> {
        self.auras.iter()
    }

    pub fn len(&self) -> usize {
        self.auras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.auras.is_empty()
    }

    fn get_mut(&mut self, id: AuraId) -> Result<&mut Aura, SimError> {
        match self.index.get(&id) {
            Some(&i) => Ok(&mut self.auras[i]),
            None => Err(SimError::AuraNotConfigured(id)),
        }
    }

    pub fn is_active(&self, id: AuraId) -> bool {
        self.get(id).is_some_and(Aura::is_active)
    }

    /// Ready to be used; false for auras this actor does not carry
    pub fn is_ready(&self, id: AuraId) -> bool {
        self.get(id).is_some_and(Aura::is_ready)
    }

    pub fn stacks(&self, id: AuraId) -> u32 {
        self.get(id).map_or(0, Aura::stacks)
    }

    pub fn duration_remaining(&self, id: AuraId) -> f64 {
        self.get(id).map_or(0.0, Aura::duration_remaining)
    }

    /// Damage multiplier from a stacking aura, 1.0 when absent or inactive
    pub fn damage_modifier(&self, id: AuraId) -> f64 {
        self.get(id).map_or(1.0, Aura::damage_modifier)
    }

    /// Number of active auras flagged important
    pub fn important_active_count(&self) -> u32 {
        self.auras
            .iter()
            .filter(|a| a.counts_as_important() && a.is_active())
            .count() as u32
    }

    /// Activate an aura unconditionally (hidden cooldowns still apply)
    pub fn apply(&mut self, id: AuraId, host: &mut AuraHost<'_>) -> Result<AuraOutcome, SimError> {
        self.get_mut(id)?.apply(host)
    }

    /// Activate an ability on request of the rotation
    ///
    /// Abilities on a visible cooldown refuse with [`SimError::OnCooldown`].
    pub fn use_ability(&mut self, id: AuraId, host: &mut AuraHost<'_>) -> Result<AuraOutcome, SimError> {
        let aura = self.get_mut(id)?;
        if aura.gate_kind() == Some(GateKind::Cooldown) && !aura.is_ready() {
            return Err(SimError::OnCooldown {
                name: aura.name(),
                remaining: aura.gate_remaining(),
            });
        }
        aura.apply(host)
    }

    /// Look up an ability by key or display name and use it
    pub fn apply_by_name(&mut self, name: &str, host: &mut AuraHost<'_>) -> Result<AuraOutcome, SimError> {
        let id: AuraId = name.parse()?;
        self.use_ability(id, host)
    }

    pub fn fade(
        &mut self,
        id: AuraId,
        reason: FadeReason,
        host: &mut AuraHost<'_>,
    ) -> Result<AuraOutcome, SimError> {
        self.get_mut(id)?.fade(reason, host)
    }

    /// Consume one charge of a stacking aura if it is active
    pub fn decrement_stacks(&mut self, id: AuraId, host: &mut AuraHost<'_>) -> Result<AuraOutcome, SimError> {
        self.get_mut(id)?.decrement_stacks(host)
    }

    /// Roll a single proc aura once, applying it on success
    ///
    /// An aura that is not ready consumes no draw and reports `Unchanged`.
    pub fn try_proc(
        &mut self,
        id: AuraId,
        rng: &mut dyn RandomSource,
        host: &mut AuraHost<'_>,
    ) -> Result<AuraOutcome, SimError> {
        let aura = self.get_mut(id)?;
        let chance = aura.def().trigger.map_or(100.0, |t| t.chance);
        if aura.is_ready() && rng.chance(chance) {
            aura.apply(host)
        } else {
            Ok(AuraOutcome::new(Transition::Unchanged))
        }
    }

    /// Roll every proc whose trigger matches the event
    ///
    /// Auras on a cooldown are skipped without consuming a draw.
    pub fn fire_procs(
        &mut self,
        ctx: &ProcContext,
        rng: &mut dyn RandomSource,
        host: &mut AuraHost<'_>,
    ) -> Result<AuraReport, SimError> {
        let mut report = AuraReport::default();
        for aura in &mut self.auras {
            let Some(trigger) = aura.def().trigger else {
                continue;
            };
            if !trigger.matches(ctx) || !aura.is_ready() {
                continue;
            }
            if rng.chance(trigger.chance) {
                let outcome = aura.apply(host)?;
                report.record(aura.id(), outcome);
            }
        }
        Ok(report)
    }

    /// Age every aura by `dt` seconds, in registration order
    pub fn tick_all(&mut self, dt: f64, host: &mut AuraHost<'_>) -> Result<AuraReport, SimError> {
        let mut report = AuraReport::default();
        for aura in &mut self.auras {
            let outcome = aura.tick(dt, host)?;
            report.record(aura.id(), outcome);
        }
        Ok(report)
    }

    /// Seconds until the earliest pending aura timer
    pub fn next_event(&self) -> Option<f64> {
        self.auras
            .iter()
            .filter_map(Aura::next_event)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Activation counts for this trial, keyed by aura name
    pub fn activations(&self) -> BTreeMap<String, u32> {
        self.auras
            .iter()
            .filter(|a| a.state().activations > 0)
            .map(|a| (a.name().to_string(), a.state().activations))
            .collect()
    }

    /// Silently remove every active aura, then clear all transient state
    pub fn end_iteration(&mut self, host: &mut AuraHost<'_>) -> Result<(), SimError> {
        for aura in &mut self.auras {
            aura.fade(FadeReason::TrialTeardown, host)?;
        }
        self.reset_all();
        Ok(())
    }

    pub fn reset_all(&mut self) {
        for aura in &mut self.auras {
            aura.reset();
        }
    }
}
