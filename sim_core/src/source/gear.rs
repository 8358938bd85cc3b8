//! GearSource - Stats from items, enchants and gems

use crate::config::GearPiece;
use crate::source::StatSource;
use crate::stat_block::StatAccumulator;

/// Stats from equipped gear
pub struct GearSource {
    pieces: Vec<GearPiece>,
}

impl GearSource {
    pub fn new(pieces: Vec<GearPiece>) -> Self {
        GearSource { pieces }
    }
}

impl StatSource for GearSource {
    fn id(&self) -> &str {
        "gear"
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for piece in &self.pieces {
            for (&stat, &value) in &piece.stats {
                stats.add_flat(stat, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stat;
    use std::collections::BTreeMap;

    #[test]
    fn test_gear_stats_sum() {
        let piece = |name: &str, sp: f64| GearPiece {
            name: name.to_string(),
            stats: BTreeMap::from([(Stat::SpellPower, sp), (Stat::Stamina, 10.0)]),
        };
        let source = GearSource::new(vec![piece("Hood", 40.0), piece("Robe", 60.0)]);
        let mut acc = StatAccumulator::new();
        source.apply(&mut acc);
        assert!((acc.value(Stat::SpellPower) - 100.0).abs() < 0.01);
        assert!((acc.value(Stat::Stamina) - 20.0).abs() < 0.01);
    }
}
