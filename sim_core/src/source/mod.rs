//! StatSource - Trait and implementations for baseline stat providers

mod base_stats;
mod gear;
mod raid_buffs;
mod talents;

pub use base_stats::{BaseStatsSource, DerivedStatsSource};
pub use gear::GearSource;
pub use raid_buffs::RaidBuffSource;
pub use talents::TalentSource;

use crate::config::SimConfig;
use crate::stat_block::StatAccumulator;

/// Trait for anything that contributes to an actor's baseline stats
pub trait StatSource: Send + Sync {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Suggested priorities:
    /// - Base stats: -100
    /// - Gear: 0
    /// - Talents: 100
    /// - Raid buffs: 200
    /// - Derived stats: 1000
    fn priority(&self) -> i32 {
        0
    }

    /// Apply this source's stats to the accumulator
    fn apply(&self, stats: &mut StatAccumulator);
}

/// Every baseline source for a configured player
pub fn player_sources(config: &SimConfig) -> Vec<Box<dyn StatSource>> {
    vec![
        Box::new(BaseStatsSource::new(config.player.race)),
        Box::new(GearSource::new(config.gear.clone())),
        Box::new(TalentSource::new(config.talents.clone())),
        Box::new(RaidBuffSource::new(
            config.auras.clone(),
            config.constants.hit_rating_per_percent,
        )),
        Box::new(DerivedStatsSource::new(config.constants.mana_per_intellect)),
    ]
}
