//! Aura - Runtime state machine for one aura on one actor

use super::types::{AuraDef, AuraEffect, AuraId, GateKind};
use crate::combat_log::CombatLog;
use crate::error::SimError;
use crate::stat_block::StatBlock;
use crate::types::Stat;

/// The parts of an actor an aura is allowed to touch
///
/// Built fresh for every call from disjoint borrows of the owning actor.
pub struct AuraHost<'a> {
    pub stats: &'a mut StatBlock,
    pub mana: &'a mut f64,
    pub log: &'a mut CombatLog,
    pub important_auras: &'a mut u32,
}

/// Why an aura is being removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeReason {
    /// Duration ran out, charges were consumed, or the effect was spent.
    /// Logged, and may ask for a pet re-sync.
    NaturalExpiry,
    /// End-of-trial cleanup. Silent, never re-syncs the pet.
    TrialTeardown,
}

/// What a single operation did to an aura
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Refreshed,
    /// Activation refused by a hidden cooldown
    Rejected,
    Faded,
    Unchanged,
}

/// Result of one aura operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuraOutcome {
    pub transition: Transition,
    /// A pet-linked stat changed and the pet should re-derive its stats
    pub pet_sync: bool,
    pub mana_gained: f64,
}

impl AuraOutcome {
    pub fn new(transition: Transition) -> Self {
        AuraOutcome {
            transition,
            pet_sync: false,
            mana_gained: 0.0,
        }
    }
}

/// Transient per-trial state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuraState {
    pub active: bool,
    pub duration_remaining: f64,
    pub stacks: u32,
    /// Remaining cooldown or hidden cooldown
    pub gate_remaining: f64,
    pub tick_timer_remaining: f64,
    pub ticks_remaining: u32,
    /// Inactive-to-active transitions this trial
    pub activations: u32,
}

/// An aura definition plus its runtime state
#[derive(Debug, Clone)]
pub struct Aura {
    def: AuraDef,
    state: AuraState,
}

impl Aura {
    pub fn new(def: AuraDef) -> Self {
        Aura {
            def,
            state: AuraState::default(),
        }
    }

    pub fn def(&self) -> &AuraDef {
        &self.def
    }

    pub fn state(&self) -> &AuraState {
        &self.state
    }

    pub fn id(&self) -> AuraId {
        self.def.id
    }

    pub fn name(&self) -> &'static str {
        self.def.id.name()
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn stacks(&self) -> u32 {
        self.state.stacks
    }

    pub fn duration_remaining(&self) -> f64 {
        self.state.duration_remaining
    }

    pub fn gate_remaining(&self) -> f64 {
        self.state.gate_remaining
    }

    /// No cooldown of either kind is running
    pub fn is_ready(&self) -> bool {
        self.state.gate_remaining <= 0.0
    }

    pub fn gate_kind(&self) -> Option<GateKind> {
        self.def.gate.map(|g| g.kind)
    }

    /// Damage multiplier while a stacking aura is up, 1.0 otherwise
    pub fn damage_modifier(&self) -> f64 {
        match self.def.effect {
            AuraEffect::Stacking {
                damage_modifier, ..
            } if self.state.active => damage_modifier,
            _ => 1.0,
        }
    }

    /// Activate the aura, or refresh it if already active
    pub fn apply(&mut self, host: &mut AuraHost<'_>) -> Result<AuraOutcome, SimError> {
        if let AuraEffect::Periodic {
            interval, ticks, ..
        } = self.def.effect
        {
            return Ok(self.apply_periodic(interval, ticks));
        }

        if self.gate_kind() == Some(GateKind::Hidden) && !self.is_ready() {
            return Ok(AuraOutcome::new(Transition::Rejected));
        }

        let was_active = self.state.active;
        let mut outcome = AuraOutcome::new(if was_active {
            Transition::Refreshed
        } else {
            Transition::Applied
        });

        if !was_active {
            for delta in self.def.effect.stat_deltas() {
                let change = host.stats.add_modifier(delta.stat, self.def.id, delta.modifier)?;
                host.log.record(|| change.describe_gain());
                outcome.pet_sync |= delta.stat.is_pet_linked();
            }
        }

        let name = self.name();
        host.log.record(|| {
            if was_active {
                format!("{} refreshed", name)
            } else {
                format!("{} applied", name)
            }
        });

        self.state.active = true;
        self.state.duration_remaining = self.def.duration;
        if let AuraEffect::Stacking { max_stacks, .. } = self.def.effect {
            self.state.stacks = max_stacks;
        }
        if let Some(gate) = self.def.gate {
            self.state.gate_remaining = gate.duration;
        }

        if !was_active {
            self.state.activations += 1;
            if self.counts_as_important() {
                *host.important_auras += 1;
                let count = *host.important_auras;
                host.log.record(|| format!("Important auras active: {}", count));
            }
        }

        Ok(outcome)
    }

    fn apply_periodic(&mut self, interval: f64, ticks: u32) -> AuraOutcome {
        let was_active = self.state.active;
        self.state.active = true;
        self.state.duration_remaining = self.def.duration;
        self.state.tick_timer_remaining = interval;
        self.state.ticks_remaining = ticks;
        if let Some(gate) = self.def.gate {
            self.state.gate_remaining = gate.duration;
        }
        if was_active {
            return AuraOutcome::new(Transition::Refreshed);
        }
        self.state.activations += 1;
        AuraOutcome::new(Transition::Applied)
    }

    /// Deactivate the aura, undoing its stat modifiers
    pub fn fade(&mut self, reason: FadeReason, host: &mut AuraHost<'_>) -> Result<AuraOutcome, SimError> {
        if !self.state.active {
            return Ok(AuraOutcome::new(Transition::Unchanged));
        }
        let natural = reason == FadeReason::NaturalExpiry;
        let mut outcome = AuraOutcome::new(Transition::Faded);

        for delta in self.def.effect.stat_deltas() {
            let change = host.stats.remove_modifier(delta.stat, self.def.id)?;
            if natural {
                host.log.record(|| change.describe_loss());
                outcome.pet_sync |= delta.stat.is_pet_linked();
            }
        }

        self.state.active = false;
        self.state.duration_remaining = 0.0;
        self.state.stacks = 0;
        self.state.tick_timer_remaining = 0.0;
        self.state.ticks_remaining = 0;

        if natural {
            let name = self.name();
            host.log.record(|| format!("{} faded", name));
        }

        if self.counts_as_important() {
            *host.important_auras = host.important_auras.checked_sub(1).ok_or_else(|| {
                SimError::Invariant(format!(
                    "important aura count underflow fading {}",
                    self.def.id.name()
                ))
            })?;
            if natural {
                let count = *host.important_auras;
                host.log.record(|| format!("Important auras active: {}", count));
            }
        }

        Ok(outcome)
    }

    /// Whether this aura is tracked by the owner's important-aura counter
    ///
    /// Periodic effects activate silently and are never counted.
    pub fn counts_as_important(&self) -> bool {
        self.def.important && !self.def.effect.is_periodic()
    }

    /// Age the aura by `dt` seconds
    ///
    /// Cooldowns age whether or not the aura is active. Durations only
    /// matter while active; reaching zero fades the aura.
    pub fn tick(&mut self, dt: f64, host: &mut AuraHost<'_>) -> Result<AuraOutcome, SimError> {
        self.state.gate_remaining = (self.state.gate_remaining - dt).max(0.0);

        if !self.state.active {
            return Ok(AuraOutcome::new(Transition::Unchanged));
        }

        self.state.duration_remaining = (self.state.duration_remaining - dt).max(0.0);

        match self.def.effect {
            AuraEffect::Periodic {
                interval,
                gain_per_tick,
                ..
            } => self.tick_periodic(dt, interval, gain_per_tick, host),
            _ => {
                if self.state.duration_remaining <= 0.0 {
                    self.fade(FadeReason::NaturalExpiry, host)
                } else {
                    Ok(AuraOutcome::new(Transition::Unchanged))
                }
            }
        }
    }

    fn tick_periodic(
        &mut self,
        dt: f64,
        interval: f64,
        gain_per_tick: f64,
        host: &mut AuraHost<'_>,
    ) -> Result<AuraOutcome, SimError> {
        self.state.tick_timer_remaining -= dt;
        let expired = self.state.duration_remaining <= 0.0;
        let mut mana_gained = 0.0;

        // Pay every interval that elapsed within dt; at expiry all are due
        while self.state.ticks_remaining > 0 && (self.state.tick_timer_remaining <= 0.0 || expired) {
            let max_mana = host.stats.get(Stat::MaxMana);
            let before = *host.mana;
            let after = (before + gain_per_tick).min(max_mana).max(before);
            *host.mana = after;
            mana_gained += after - before;

            let name = self.name();
            host.log.record(|| {
                format!(
                    "Gained {:.0} mana from {} ({:.0} -> {:.0})",
                    after - before,
                    name,
                    before,
                    after
                )
            });

            self.state.ticks_remaining -= 1;
            self.state.tick_timer_remaining += interval;
        }

        let mut outcome = if self.state.ticks_remaining == 0 {
            self.fade(FadeReason::NaturalExpiry, host)?
        } else {
            AuraOutcome::new(Transition::Unchanged)
        };
        outcome.mana_gained = mana_gained;
        Ok(outcome)
    }

    /// Consume one charge of a stacking aura, fading it at zero
    pub fn decrement_stacks(&mut self, host: &mut AuraHost<'_>) -> Result<AuraOutcome, SimError> {
        if !self.state.active || self.state.stacks == 0 {
            return Ok(AuraOutcome::new(Transition::Unchanged));
        }
        self.state.stacks -= 1;
        if self.state.stacks == 0 {
            return self.fade(FadeReason::NaturalExpiry, host);
        }
        let (name, stacks) = (self.name(), self.state.stacks);
        host.log.record(|| format!("{} ({})", name, stacks));
        Ok(AuraOutcome::new(Transition::Unchanged))
    }

    /// Seconds until this aura next needs attention, if anything is pending
    pub fn next_event(&self) -> Option<f64> {
        let mut next: Option<f64> = None;
        let mut consider = |t: f64| {
            if t > 0.0 {
                next = Some(next.map_or(t, |n: f64| n.min(t)));
            }
        };
        consider(self.state.gate_remaining);
        if self.state.active {
            if self.def.effect.is_periodic() {
                consider(self.state.tick_timer_remaining);
            } else {
                consider(self.state.duration_remaining);
            }
        }
        next
    }

    /// Clear all transient state for the next trial
    pub fn reset(&mut self) {
        self.state = AuraState::default();
    }
}
