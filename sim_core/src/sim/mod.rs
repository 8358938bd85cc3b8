//! Simulation - Trials, batches and their results

mod batch;
mod clock;
mod stats;
mod trial;

pub use batch::{run_batch, BatchOptions};
pub use clock::{SimulationClock, TIME_EPSILON};
pub use stats::{MetricSummary, SimSummary, TrialResult};

use crate::actor::{Pet, Player};
use crate::aura::catalog;
use crate::config::SimConfig;
use crate::dot::DotTracker;
use crate::error::SimError;
use crate::rotation::PriorityRotation;
use crate::spell::Spellbook;

/// A validated build, ready to run trials
///
/// Actors and their auras are created once here. Each trial resets them
/// instead of rebuilding, so a `Simulation` is cloned per worker thread
/// rather than per trial.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    spellbook: Spellbook,
    rotation: PriorityRotation,
    player: Player,
    pet: Option<Pet>,
    dots: DotTracker,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let player = Player::new(&config);
        let pet = config
            .player
            .pet
            .map(|kind| Pet::new(kind, &player.stats, catalog::pet_auras(&config)));
        tracing::debug!(
            player_auras = player.auras.len(),
            pet = ?config.player.pet,
            "Simulation built"
        );
        Ok(Simulation {
            spellbook: Spellbook::new(&config.talents, config.constants.crit_damage_multiplier),
            rotation: PriorityRotation::new(&config.rotation),
            player,
            pet,
            dots: DotTracker::new(),
            config,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn pet(&self) -> Option<&Pet> {
        self.pet.as_ref()
    }

    pub fn spellbook(&self) -> &Spellbook {
        &self.spellbook
    }
}
