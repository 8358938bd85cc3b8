//! sim_core - Aura engine and combat trial simulator for a warlock and pet
//!
//! This library provides:
//! - StatBlock: Baseline stats built from sources, plus an aura modifier ledger
//! - AuraRegistry: Timed buffs, procs, hidden cooldowns and periodic effects
//! - Player / Pet: Actors that own stats, mana and auras
//! - Simulation: Tick-driven trials and batch aggregation

pub mod actor;
pub mod aura;
pub mod combat_log;
pub mod config;
pub mod dot;
pub mod error;
pub mod prelude;
pub mod random;
pub mod rotation;
pub mod sim;
pub mod source;
pub mod spell;
pub mod stat_block;
pub mod types;

// Re-export core types for convenience
pub use actor::{Actor, Pet, Player};
pub use aura::{AuraDef, AuraId, AuraRegistry, AuraReport, FadeReason, ProcContext, ProcEvent};
pub use combat_log::{CombatLog, LogEntry};
pub use config::{default_config, load_sim_config, parse_sim_config, ConfigError, SimConfig};
pub use error::SimError;
pub use random::{RandomSource, ScriptedRolls, SeededRandom};
pub use rotation::{Action, PriorityRotation, RotationPolicy, RotationView};
pub use sim::{run_batch, BatchOptions, SimSummary, Simulation, TrialResult};
pub use source::StatSource;
pub use spell::{SpellId, Spellbook};
pub use stat_block::{Modifier, StatBlock, StatValue};
pub use types::{PetKind, Race, School, Stat};
