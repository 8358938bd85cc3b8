//! Prelude module for convenient imports
//!
//! ```rust
//! use sim_core::prelude::*;
//! ```

// Stats
pub use crate::stat_block::{Modifier, StatBlock};
pub use crate::types::{PetKind, Race, School, Stat};

// Auras
pub use crate::actor::{Actor, Pet, Player};
pub use crate::aura::{AuraId, AuraRegistry, FadeReason, ProcContext, ProcEvent};

// Running trials
pub use crate::random::{RandomSource, SeededRandom};
pub use crate::rotation::{Action, RotationPolicy, RotationView};
pub use crate::sim::{run_batch, BatchOptions, SimSummary, Simulation, TrialResult};

// Config
pub use crate::config::{default_config, load_sim_config, SimConfig};
pub use crate::error::SimError;
