//! Actors - The player and the pet, each owning stats, auras and a log

mod pet;
mod player;

pub use pet::Pet;
pub use player::Player;

use crate::aura::{AuraHost, AuraId, AuraOutcome, AuraRegistry, AuraReport, FadeReason, ProcContext};
use crate::error::SimError;
use crate::random::RandomSource;

/// Anything that carries auras
///
/// Implementors only hand out disjoint borrows of their registry and the
/// state auras may touch; every aura operation is provided on top.
pub trait Actor {
    fn name(&self) -> &str;

    fn auras(&self) -> &AuraRegistry;

    /// Split into the registry and the host its auras mutate
    fn parts(&mut self) -> (&mut AuraRegistry, AuraHost<'_>);

    fn apply_aura(&mut self, id: AuraId) -> Result<AuraOutcome, SimError> {
        let (auras, mut host) = self.parts();
        auras.apply(id, &mut host)
    }

    /// Activate an ability on behalf of the rotation
    fn use_aura(&mut self, id: AuraId) -> Result<AuraOutcome, SimError> {
        let (auras, mut host) = self.parts();
        auras.use_ability(id, &mut host)
    }

    fn fade_aura(&mut self, id: AuraId, reason: FadeReason) -> Result<AuraOutcome, SimError> {
        let (auras, mut host) = self.parts();
        auras.fade(id, reason, &mut host)
    }

    fn decrement_stacks(&mut self, id: AuraId) -> Result<AuraOutcome, SimError> {
        let (auras, mut host) = self.parts();
        auras.decrement_stacks(id, &mut host)
    }

    fn fire_procs(&mut self, ctx: &ProcContext, rng: &mut dyn RandomSource) -> Result<AuraReport, SimError> {
        let (auras, mut host) = self.parts();
        auras.fire_procs(ctx, rng, &mut host)
    }

    fn tick_auras(&mut self, dt: f64) -> Result<AuraReport, SimError> {
        let (auras, mut host) = self.parts();
        auras.tick_all(dt, &mut host)
    }

    /// Tear down every aura and check the actor is back at its baseline
    fn end_iteration(&mut self) -> Result<(), SimError> {
        let (auras, mut host) = self.parts();
        auras.end_iteration(&mut host)?;
        if *host.important_auras != 0 {
            return Err(SimError::Invariant(format!(
                "{} important auras still counted after teardown",
                host.important_auras
            )));
        }
        if host.stats.has_modifiers() {
            return Err(SimError::Invariant(format!(
                "{} still has aura modifiers after teardown",
                host.stats.id
            )));
        }
        Ok(())
    }
}
