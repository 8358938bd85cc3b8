//! BaseStatsSource - Racial base attributes of a level 70 warlock

use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::{Race, Stat};

/// Base mana of a level 70 warlock before intellect
const BASE_MANA: f64 = 2335.0;
/// Base spell crit chance in percent
const BASE_CRIT_CHANCE: f64 = 1.701;

/// Stats from race
pub struct BaseStatsSource {
    pub race: Race,
}

impl BaseStatsSource {
    pub fn new(race: Race) -> Self {
        BaseStatsSource { race }
    }

    /// (stamina, intellect, spirit)
    fn attributes(&self) -> (f64, f64, f64) {
        match self.race {
            Race::Human => (76.0, 129.0, 142.0),
            Race::Gnome => (75.0, 136.0, 139.0),
            Race::Orc => (78.0, 126.0, 144.0),
            Race::Undead => (77.0, 127.0, 144.0),
            Race::BloodElf => (74.0, 133.0, 139.0),
        }
    }
}

impl StatSource for BaseStatsSource {
    fn id(&self) -> &str {
        "base_stats"
    }

    fn priority(&self) -> i32 {
        -100
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        let (stamina, intellect, spirit) = self.attributes();
        stats.add_flat(Stat::Stamina, stamina);
        stats.add_flat(Stat::Intellect, intellect);
        stats.add_flat(Stat::Spirit, spirit);
        stats.add_flat(Stat::MaxMana, BASE_MANA);
        stats.add_flat(Stat::CritChance, BASE_CRIT_CHANCE);
        stats.add_flat(Stat::ManaCostModifier, 1.0);

        match self.race {
            Race::Gnome => stats.add_increased(Stat::Intellect, 0.05),
            Race::Human => stats.add_increased(Stat::Spirit, 0.10),
            _ => {}
        }
    }
}

/// Stats computed from other stats (max mana from intellect)
pub struct DerivedStatsSource {
    pub mana_per_intellect: f64,
}

impl DerivedStatsSource {
    pub fn new(mana_per_intellect: f64) -> Self {
        DerivedStatsSource { mana_per_intellect }
    }
}

impl StatSource for DerivedStatsSource {
    fn id(&self) -> &str {
        "derived_stats"
    }

    fn priority(&self) -> i32 {
        1000
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        let intellect = stats.value(Stat::Intellect);
        stats.add_flat(Stat::MaxMana, intellect * self.mana_per_intellect);
    }
}
