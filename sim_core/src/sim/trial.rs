//! Trial loop - One simulated fight from pull to teardown

use super::{Simulation, SimulationClock, TrialResult};
use crate::actor::Actor;
use crate::aura::{AuraId, AuraOutcome, AuraReport, FadeReason, ProcContext, ProcEvent};
use crate::error::SimError;
use crate::random::RandomSource;
use crate::rotation::{Action, RotationPolicy, RotationView};
use crate::spell::{CastContext, SpellDef, SpellId};
use crate::types::School;

/// Off-GCD actions allowed before the rotation must cast or wait
const MAX_ACTIONS_PER_DECISION: usize = 16;

impl Simulation {
    /// Run one trial with the configured priority rotation
    pub fn run_trial(
        &mut self,
        rng: &mut dyn RandomSource,
        record_log: bool,
    ) -> Result<TrialResult, SimError> {
        let mut rotation = self.rotation.clone();
        self.run_trial_with(&mut rotation, rng, record_log)
    }

    /// Run one trial with a caller-supplied rotation
    pub fn run_trial_with(
        &mut self,
        policy: &mut dyn RotationPolicy,
        rng: &mut dyn RandomSource,
        record_log: bool,
    ) -> Result<TrialResult, SimError> {
        self.start_trial(record_log);

        let fight_length = self.roll_fight_length(rng);
        let mut clock = SimulationClock::new(fight_length);
        let mut result = TrialResult::new(fight_length);
        self.player
            .log
            .record(|| format!("Fight length: {:.2} seconds", fight_length));

        while !clock.is_finished() {
            self.set_log_time(clock.now());

            if self.player.casting.is_some() && self.player.cast_remaining <= 0.0 {
                self.finish_cast(rng, &mut result)?;
            }
            if self.player.is_idle() {
                self.decide(policy, rng, &clock, &mut result)?;
            }
            if self.pet.as_ref().is_some_and(|p| p.attack_timer <= 0.0) {
                self.pet_attack(rng, &mut result);
            }

            let dt = self.next_event_delta(&clock);
            self.set_log_time(clock.now() + dt);
            self.advance(dt, rng, &mut result)?;
            clock.advance(dt)?;
        }

        self.finish_trial(&mut result)?;
        Ok(result)
    }

    fn start_trial(&mut self, record_log: bool) {
        self.player.reset(record_log);
        self.dots.clear();
        if let Some(pet) = &mut self.pet {
            pet.reset(&self.player.stats, record_log);
        }
    }

    fn roll_fight_length(&self, rng: &mut dyn RandomSource) -> f64 {
        let settings = &self.config.settings;
        let spread = settings.max_fight_length - settings.min_fight_length;
        if spread > 0.0 {
            settings.min_fight_length + spread * rng.roll() / 100.0
        } else {
            settings.min_fight_length
        }
    }

    fn set_log_time(&mut self, now: f64) {
        self.player.log.set_time(now);
        if let Some(pet) = &mut self.pet {
            pet.log.set_time(now);
        }
    }

    fn cast_context(&self) -> CastContext<'_> {
        CastContext {
            stats: &self.player.stats,
            auras: &self.player.auras,
            dots: &self.dots,
            constants: &self.config.constants,
        }
    }

    fn decide(
        &mut self,
        policy: &mut dyn RotationPolicy,
        rng: &mut dyn RandomSource,
        clock: &SimulationClock,
        result: &mut TrialResult,
    ) -> Result<(), SimError> {
        for _ in 0..MAX_ACTIONS_PER_DECISION {
            let action = {
                let view = RotationView {
                    time: clock.now(),
                    fight_remaining: clock.remaining(),
                    player: &self.player,
                    pet: self.pet.as_ref(),
                    dots: &self.dots,
                    spellbook: &self.spellbook,
                    constants: &self.config.constants,
                };
                policy.next_action(&view)
            };
            match action {
                Action::UseAura(id) => self.use_aura(id)?,
                Action::Cast(spell) => return self.start_cast(spell, rng, result),
                Action::Wait => return Ok(()),
            }
        }
        Err(SimError::Invariant(format!(
            "rotation took more than {} actions without casting or waiting",
            MAX_ACTIONS_PER_DECISION
        )))
    }

    fn use_aura(&mut self, id: AuraId) -> Result<(), SimError> {
        if id.is_pet_aura() {
            let pet = self.pet.as_mut().ok_or(SimError::AuraNotConfigured(id))?;
            pet.log.record(|| format!("Used {}", id.name()));
            pet.use_aura(id)?;
        } else {
            self.player.log.record(|| format!("Used {}", id.name()));
            let outcome = self.player.use_aura(id)?;
            self.after_outcome(&outcome);
        }
        Ok(())
    }

    fn start_cast(
        &mut self,
        spell: SpellId,
        rng: &mut dyn RandomSource,
        result: &mut TrialResult,
    ) -> Result<(), SimError> {
        let def = self.spellbook.spell(spell)?.clone();
        let trance = spell == SpellId::ShadowBolt && self.player.auras.is_active(AuraId::ShadowTrance);
        let (cost, cast_time, gcd) = {
            let ctx = self.cast_context();
            let cast_time = if trance { 0.0 } else { ctx.cast_time(&def) };
            (ctx.mana_cost(&def), cast_time, ctx.global_cooldown())
        };
        if cost > self.player.mana {
            return Err(SimError::NotEnoughMana {
                name: def.name(),
                cost,
                available: self.player.mana,
            });
        }

        self.player.gcd_remaining = gcd;

        if cast_time > 0.0 {
            self.player.casting = Some(spell);
            self.player.cast_remaining = cast_time;
            let mana = self.player.mana;
            self.player.log.record(|| {
                format!(
                    "Started casting {} - Cast time: {:.2} - Mana: {:.0}",
                    def.name(),
                    cast_time,
                    mana
                )
            });
            return Ok(());
        }

        self.player.log.record(|| format!("Cast {}", def.name()));
        self.resolve_cast(&def, rng, result)?;
        if trance {
            self.consume_shadow_trance()?;
        }
        Ok(())
    }

    fn finish_cast(&mut self, rng: &mut dyn RandomSource, result: &mut TrialResult) -> Result<(), SimError> {
        let Some(spell) = self.player.casting.take() else {
            return Ok(());
        };
        let def = self.spellbook.spell(spell)?.clone();
        self.player.log.record(|| format!("Finished casting {}", def.name()));
        self.resolve_cast(&def, rng, result)
    }

    fn resolve_cast(
        &mut self,
        def: &SpellDef,
        rng: &mut dyn RandomSource,
        result: &mut TrialResult,
    ) -> Result<(), SimError> {
        let (cost, hit_chance, crit_chance, direct, dot_tick, mana_gain) = {
            let ctx = self.cast_context();
            (
                ctx.mana_cost(def),
                ctx.hit_chance(def),
                ctx.crit_chance(def),
                ctx.direct_damage(def),
                ctx.dot_damage_per_tick(def),
                ctx.mana_gain(def),
            )
        };

        self.player.mana = (self.player.mana - cost).max(0.0);
        result.mana_spent += cost;
        result.casts += 1;

        if def.mana_gain > 0.0 {
            let before = self.player.mana;
            self.player.mana = (before + mana_gain).min(self.player.max_mana());
            let after = self.player.mana;
            result.mana_gained += after - before;
            self.player.log.record(|| {
                format!("{} gains {:.0} mana ({:.0} -> {:.0})", def.name(), mana_gain, before, after)
            });
            return Ok(());
        }

        if def.can_miss && !rng.chance(hit_chance) {
            result.resists += 1;
            self.player.log.record(|| format!("{} *resist*", def.name()));
            return self.player_procs(ProcEvent::Resist, def.school, Some(def.id), rng);
        }

        if let Some(aura) = def.aura {
            let outcome = self.player.apply_aura(aura)?;
            self.after_outcome(&outcome);
        }

        if def.does_direct_damage() {
            let crit = rng.chance(crit_chance);
            let damage = if crit { direct * def.crit_multiplier } else { direct };
            result.player_damage += damage;
            self.player.log.record(|| {
                format!("{} {}{:.0}", def.name(), if crit { "*" } else { "" }, damage)
            });
            if crit {
                result.crits += 1;
                self.player_procs(ProcEvent::Crit, def.school, Some(def.id), rng)?;
            } else if def.school == School::Shadow
                && self.player.auras.is_active(AuraId::ImprovedShadowBolt)
            {
                self.consume_improved_shadow_bolt()?;
            }
        }

        if let (Some(dot), Some(per_tick)) = (def.dot.as_ref(), dot_tick) {
            self.dots.apply(dot, per_tick);
            self.player
                .log
                .record(|| format!("{} applied ({:.0} per tick)", def.name(), per_tick));
        }

        if def.school != School::None {
            self.player_procs(ProcEvent::Hit, def.school, Some(def.id), rng)?;
        }
        Ok(())
    }

    fn player_procs(
        &mut self,
        event: ProcEvent,
        school: School,
        spell: Option<SpellId>,
        rng: &mut dyn RandomSource,
    ) -> Result<(), SimError> {
        let ctx = ProcContext { event, school, spell };
        let report = self.player.fire_procs(&ctx, rng)?;
        self.after_report(&report);
        Ok(())
    }

    fn consume_shadow_trance(&mut self) -> Result<(), SimError> {
        let outcome = self.player.fade_aura(AuraId::ShadowTrance, FadeReason::NaturalExpiry)?;
        self.after_outcome(&outcome);
        Ok(())
    }

    fn consume_improved_shadow_bolt(&mut self) -> Result<(), SimError> {
        let outcome = self.player.decrement_stacks(AuraId::ImprovedShadowBolt)?;
        self.after_outcome(&outcome);
        Ok(())
    }

    fn after_outcome(&mut self, outcome: &AuraOutcome) {
        if outcome.pet_sync {
            self.sync_pet();
        }
    }

    fn after_report(&mut self, report: &AuraReport) {
        if report.pet_sync {
            self.sync_pet();
        }
    }

    fn sync_pet(&mut self) {
        if let Some(pet) = &mut self.pet {
            pet.sync_from_owner(&self.player.stats);
        }
    }

    fn pet_attack(&mut self, rng: &mut dyn RandomSource, result: &mut TrialResult) {
        let constants = &self.config.constants;
        let coe_active = self.player.auras.is_active(AuraId::CurseOfTheElements);
        let Some(pet) = self.pet.as_mut() else {
            return;
        };
        pet.attack_timer = pet.attack_interval();
        let name = pet.attack_name();

        if !rng.chance(constants.pet_hit_chance) {
            pet.log.record(|| format!("{} *miss*", name));
            return;
        }
        let crit = rng.chance(constants.pet_crit_chance);
        let mut damage = pet.attack_damage();
        if crit {
            damage *= pet.crit_multiplier();
        }
        if coe_active && pet.attack_school() == School::Fire {
            damage *= constants.curse_of_the_elements_modifier;
        }
        result.pet_damage += damage;
        pet.log
            .record(|| format!("{} {}{:.0}", name, if crit { "*" } else { "" }, damage));
    }

    fn next_event_delta(&self, clock: &SimulationClock) -> f64 {
        let player = &self.player;
        let candidates = [
            player.casting.map(|_| player.cast_remaining),
            Some(player.gcd_remaining),
            self.pet.as_ref().map(|p| p.attack_timer),
            player.auras.next_event(),
            self.pet.as_ref().and_then(|p| p.auras.next_event()),
            self.dots.next_event(),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(|t| *t > 0.0)
            .fold(clock.remaining(), f64::min)
    }

    fn advance(&mut self, dt: f64, rng: &mut dyn RandomSource, result: &mut TrialResult) -> Result<(), SimError> {
        if self.player.important_auras > 0 {
            result.important_aura_uptime += dt;
        }
        if self.player.casting.is_some() {
            self.player.cast_remaining = (self.player.cast_remaining - dt).max(0.0);
        }
        self.player.gcd_remaining = (self.player.gcd_remaining - dt).max(0.0);

        let report = self.player.tick_auras(dt)?;
        result.mana_gained += report.mana_gained;
        self.after_report(&report);

        if let Some(pet) = &mut self.pet {
            pet.attack_timer = (pet.attack_timer - dt).max(0.0);
            pet.tick_auras(dt)?;
        }

        for tick in self.dots.tick(dt) {
            result.player_damage += tick.damage;
            result.dot_damage += tick.damage;
            self.player
                .log
                .record(|| format!("{} tick {:.0}", tick.spell.name(), tick.damage));
            self.player_procs(ProcEvent::DotTick, tick.school, Some(tick.spell), rng)?;
        }
        Ok(())
    }

    fn finish_trial(&mut self, result: &mut TrialResult) -> Result<(), SimError> {
        self.set_log_time(result.fight_length);
        self.player.casting = None;

        result.procs = self.player.auras.activations();
        self.player.end_iteration()?;

        let mut log = self.player.log.take_entries();
        if let Some(pet) = &mut self.pet {
            result.procs.extend(pet.auras.activations());
            pet.end_iteration()?;
            log.extend(pet.log.take_entries());
            log.sort_by(|a, b| a.time.total_cmp(&b.time));
        }
        result.combat_log = log;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use crate::random::{ScriptedRolls, SeededRandom};

    fn simulation() -> Simulation {
        let mut config = default_config().unwrap();
        config.settings.min_fight_length = 60.0;
        config.settings.max_fight_length = 60.0;
        Simulation::new(config).unwrap()
    }

    #[test]
    fn test_trial_deals_damage() {
        let mut sim = simulation();
        let result = sim.run_trial(&mut SeededRandom::new(1), false).unwrap();
        assert_eq!(result.fight_length, 60.0);
        assert!(result.player_damage > 0.0);
        assert!(result.casts > 0);
        assert!(result.combat_log.is_empty());
        assert!(!sim.player().stats.has_modifiers());
    }

    #[test]
    fn test_trial_log_recorded_on_request() {
        let mut sim = simulation();
        let result = sim.run_trial(&mut SeededRandom::new(2), true).unwrap();
        assert!(!result.combat_log.is_empty());
        assert!(result
            .combat_log
            .windows(2)
            .all(|w| w[0].time <= w[1].time));
    }

    #[test]
    fn test_all_resisted_deals_no_direct_damage() {
        let mut sim = simulation();
        // Every draw is 99.9: every spell misses, every proc fails
        let result = sim.run_trial(&mut ScriptedRolls::constant(99.9), false).unwrap();
        assert_eq!(result.player_damage, 0.0);
        assert!(result.resists > 0);
    }

    #[test]
    fn test_repeated_trials_identical_with_same_seed() {
        let mut sim = simulation();
        let first = sim.run_trial(&mut SeededRandom::new(9), false).unwrap();
        let second = sim.run_trial(&mut SeededRandom::new(9), false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_consumed_trance_resyncs_pet() {
        use crate::aura::{AuraDef, StatDelta};
        use crate::types::Stat;

        let mut sim = simulation();
        sim.player.auras.register(
            AuraDef::new(AuraId::ShadowTrance, 10.0)
                .with_stats(vec![StatDelta::flat(Stat::SpellPower, 100.0)]),
        );
        let unbuffed = sim.pet().unwrap().stats.get(Stat::SpellPower);

        let outcome = sim.player.apply_aura(AuraId::ShadowTrance).unwrap();
        sim.after_outcome(&outcome);
        let buffed = sim.pet().unwrap().stats.get(Stat::SpellPower);
        assert!((buffed - (unbuffed + 15.0)).abs() < 1e-6);

        sim.consume_shadow_trance().unwrap();
        assert!(!sim.player().auras.is_active(AuraId::ShadowTrance));
        let after = sim.pet().unwrap().stats.get(Stat::SpellPower);
        assert!((after - unbuffed).abs() < 1e-6);
    }

    #[test]
    fn test_consumed_isb_stack_counts_down() {
        let mut sim = simulation();
        sim.player.apply_aura(AuraId::ImprovedShadowBolt).unwrap();
        sim.consume_improved_shadow_bolt().unwrap();
        assert_eq!(sim.player().auras.stacks(AuraId::ImprovedShadowBolt), 3);
    }

    struct WaitOnly;

    impl RotationPolicy for WaitOnly {
        fn next_action(&mut self, _view: &RotationView<'_>) -> Action {
            Action::Wait
        }
    }

    #[test]
    fn test_custom_policy_waiting_deals_no_player_damage() {
        let mut sim = simulation();
        let result = sim
            .run_trial_with(&mut WaitOnly, &mut SeededRandom::new(3), false)
            .unwrap();
        assert_eq!(result.player_damage, 0.0);
        assert_eq!(result.casts, 0);
    }
}
