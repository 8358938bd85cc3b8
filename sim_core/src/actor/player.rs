//! Player - The simulated warlock

use super::Actor;
use crate::aura::{catalog, AuraHost, AuraRegistry};
use crate::combat_log::CombatLog;
use crate::config::SimConfig;
use crate::source::player_sources;
use crate::spell::SpellId;
use crate::stat_block::StatBlock;
use crate::types::Stat;

#[derive(Debug, Clone)]
pub struct Player {
    pub stats: StatBlock,
    pub auras: AuraRegistry,
    pub log: CombatLog,
    pub mana: f64,
    pub important_auras: u32,
    /// Spell currently being cast
    pub casting: Option<SpellId>,
    pub cast_remaining: f64,
    pub gcd_remaining: f64,
}

impl Player {
    pub fn new(config: &SimConfig) -> Self {
        let stats = StatBlock::from_sources("player", &player_sources(config));
        let mana = stats.get(Stat::MaxMana);
        Player {
            stats,
            auras: AuraRegistry::with_defs(catalog::player_auras(config)),
            log: CombatLog::new(false),
            mana,
            important_auras: 0,
            casting: None,
            cast_remaining: 0.0,
            gcd_remaining: 0.0,
        }
    }

    pub fn max_mana(&self) -> f64 {
        self.stats.get(Stat::MaxMana)
    }

    /// Neither casting nor on the global cooldown
    pub fn is_idle(&self) -> bool {
        self.casting.is_none() && self.gcd_remaining <= 0.0
    }

    /// Return to the start-of-trial state
    pub fn reset(&mut self, record_log: bool) {
        self.stats.clear_modifiers();
        self.auras.reset_all();
        self.important_auras = 0;
        self.mana = self.max_mana();
        self.casting = None;
        self.cast_remaining = 0.0;
        self.gcd_remaining = 0.0;
        self.log.clear();
        self.log.set_enabled(record_log);
    }
}

impl Actor for Player {
    fn name(&self) -> &str {
        "Player"
    }

    fn auras(&self) -> &AuraRegistry {
        &self.auras
    }

    fn parts(&mut self) -> (&mut AuraRegistry, AuraHost<'_>) {
        (
            &mut self.auras,
            AuraHost {
                stats: &mut self.stats,
                mana: &mut self.mana,
                log: &mut self.log,
                important_auras: &mut self.important_auras,
            },
        )
    }
}
