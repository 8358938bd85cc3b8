//! TalentSource - Passive stat talents

use crate::config::Talents;
use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::Stat;

/// Stat-only talents. Talents that change spells live in the spellbook.
pub struct TalentSource {
    talents: Talents,
}

impl TalentSource {
    pub fn new(talents: Talents) -> Self {
        TalentSource { talents }
    }
}

impl StatSource for TalentSource {
    fn id(&self) -> &str {
        "talents"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        if self.talents.demonic_embrace > 0 {
            stats.add_increased(Stat::Stamina, 0.03 * self.talents.demonic_embrace as f64);
            stats.add_increased(Stat::Spirit, -0.01 * self.talents.demonic_embrace as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demonic_embrace() {
        let talents = Talents {
            demonic_embrace: 5,
            ..Talents::default()
        };
        let mut acc = StatAccumulator::new();
        acc.add_flat(Stat::Stamina, 100.0);
        acc.add_flat(Stat::Spirit, 100.0);
        TalentSource::new(talents).apply(&mut acc);
        assert!((acc.value(Stat::Stamina) - 115.0).abs() < 0.01);
        assert!((acc.value(Stat::Spirit) - 95.0).abs() < 0.01);
    }
}
