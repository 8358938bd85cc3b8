//! Simulation error taxonomy

use crate::aura::AuraId;
use crate::config::ConfigError;
use thiserror::Error;

/// Errors surfaced by the simulation core
///
/// Configuration problems are detected before a trial starts. Everything
/// else is a broken contract between the rotation hooks and the engine and
/// aborts the trial it happened in.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Unknown aura: {0}")]
    UnknownAura(String),
    #[error("Aura {0} is not configured for this actor")]
    AuraNotConfigured(AuraId),
    #[error("Unknown spell: {0}")]
    UnknownSpell(String),
    #[error("{name} used while on cooldown ({remaining:.2}s remaining)")]
    OnCooldown { name: &'static str, remaining: f64 },
    #[error("Not enough mana to cast {name} ({cost:.0} needed, {available:.0} available)")]
    NotEnoughMana {
        name: &'static str,
        cost: f64,
        available: f64,
    },
    #[error("Invariant violated: {0}")]
    Invariant(String),
}
