//! RaidBuffSource - Static raid buffs present for the whole encounter

use crate::config::SelectedAuras;
use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::Stat;

pub struct RaidBuffSource {
    auras: SelectedAuras,
    hit_rating_per_percent: f64,
}

impl RaidBuffSource {
    pub fn new(auras: SelectedAuras, hit_rating_per_percent: f64) -> Self {
        RaidBuffSource {
            auras,
            hit_rating_per_percent,
        }
    }
}

impl StatSource for RaidBuffSource {
    fn id(&self) -> &str {
        "raid_buffs"
    }

    fn priority(&self) -> i32 {
        200
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        let a = &self.auras;
        if a.arcane_intellect {
            stats.add_flat(Stat::Intellect, 40.0);
        }
        if a.mark_of_the_wild {
            for stat in [Stat::Stamina, Stat::Intellect, Stat::Spirit] {
                stats.add_flat(stat, 18.0);
            }
        }
        if a.blessing_of_kings {
            for stat in [Stat::Stamina, Stat::Intellect, Stat::Spirit] {
                stats.add_increased(stat, 0.10);
            }
        }
        if a.fel_armor {
            stats.add_flat(Stat::SpellPower, 100.0);
        }
        if a.wrath_of_air_totem {
            stats.add_flat(Stat::SpellPower, 101.0);
        }
        if a.totem_of_wrath {
            stats.add_flat(Stat::CritChance, 3.0);
            stats.add_flat(Stat::HitRating, 3.0 * self.hit_rating_per_percent);
        }
    }
}
