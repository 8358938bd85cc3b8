//! StatBlock - Baseline stats plus live aura modifiers for one actor

mod aggregator;
mod computed;
mod stat_value;

pub use aggregator::StatAccumulator;
pub use stat_value::{Modifier, StatValue};

use crate::aura::AuraId;
use crate::error::SimError;
use crate::source::StatSource;
use crate::types::Stat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Before/after values of a single stat mutation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatChange {
    pub stat: Stat,
    pub modifier: Modifier,
    pub before: f64,
    pub after: f64,
}

impl StatChange {
    /// Combat log text for a gained modifier, e.g. `Spell Power + 120 (1000 -> 1120)`
    pub fn describe_gain(&self) -> String {
        format!(
            "{} {} ({} -> {})",
            self.stat.name(),
            self.modifier.describe_gain(),
            self.stat.display_value(self.before),
            self.stat.display_value(self.after)
        )
    }

    /// Combat log text for a removed modifier
    pub fn describe_loss(&self) -> String {
        format!(
            "{} {} ({} -> {})",
            self.stat.name(),
            self.modifier.describe_loss(),
            self.stat.display_value(self.before),
            self.stat.display_value(self.after)
        )
    }
}

/// Complete stat state for an actor
///
/// The baseline comes from [`StatSource`]s and is fixed for the whole run.
/// Auras layer modifiers on top through [`add_modifier`](Self::add_modifier)
/// and take them back off through [`remove_modifier`](Self::remove_modifier).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatBlock {
    /// Identifier for this actor
    pub id: String,
    values: HashMap<Stat, StatValue>,
}

impl StatBlock {
    /// Create an empty stat block
    pub fn new(id: impl Into<String>) -> Self {
        StatBlock {
            id: id.into(),
            values: HashMap::new(),
        }
    }

    /// Build a stat block from baseline sources applied in priority order
    pub fn from_sources(id: impl Into<String>, sources: &[Box<dyn StatSource>]) -> Self {
        let mut block = StatBlock::new(id);
        block.rebuild_from_sources(sources);
        block
    }

    /// Recompute the baseline from sources, dropping every modifier
    pub fn rebuild_from_sources(&mut self, sources: &[Box<dyn StatSource>]) {
        self.values.clear();

        let mut accumulator = StatAccumulator::new();
        let mut sorted_sources: Vec<_> = sources.iter().collect();
        sorted_sources.sort_by_key(|s| s.priority());

        for source in sorted_sources {
            source.apply(&mut accumulator);
        }

        accumulator.apply_to(self);
    }

    /// Current value of a stat (zero if never set)
    pub fn get(&self, stat: Stat) -> f64 {
        self.values.get(&stat).map(StatValue::compute).unwrap_or(0.0)
    }

    /// Baseline value of a stat, ignoring modifiers
    pub fn base(&self, stat: Stat) -> f64 {
        self.values.get(&stat).map(|v| v.base).unwrap_or(0.0)
    }

    /// Replace the baseline value, keeping any modifiers in place
    pub fn set_base(&mut self, stat: Stat, value: f64) {
        self.values.entry(stat).or_default().base = value;
    }

    /// Access the raw stat value
    pub fn value(&self, stat: Stat) -> Option<&StatValue> {
        self.values.get(&stat)
    }

    /// Apply a modifier owned by an aura
    pub fn add_modifier(
        &mut self,
        stat: Stat,
        source: AuraId,
        modifier: Modifier,
    ) -> Result<StatChange, SimError> {
        let value = self.values.entry(stat).or_default();
        let before = value.compute();
        if !value.add(source, modifier) {
            return Err(SimError::Invariant(format!(
                "{} already modifies {}",
                source.name(),
                stat.name()
            )));
        }
        let after = value.compute();
        Self::check_non_negative(stat, after)?;
        Ok(StatChange {
            stat,
            modifier,
            before,
            after,
        })
    }

    /// Remove the modifier an aura previously applied
    pub fn remove_modifier(&mut self, stat: Stat, source: AuraId) -> Result<StatChange, SimError> {
        let value = self.values.get_mut(&stat).ok_or_else(|| not_applied(stat, source))?;
        let before = value.compute();
        let modifier = value.remove(source).ok_or_else(|| not_applied(stat, source))?;
        let after = value.compute();
        Self::check_non_negative(stat, after)?;
        Ok(StatChange {
            stat,
            modifier,
            before,
            after,
        })
    }

    /// Whether any aura modifier is currently applied
    pub fn has_modifiers(&self) -> bool {
        self.values.values().any(|v| v.modifier_count() > 0)
    }

    /// Drop every aura modifier, leaving the baseline
    pub fn clear_modifiers(&mut self) {
        for value in self.values.values_mut() {
            value.reset_to_base();
        }
    }

    fn check_non_negative(stat: Stat, value: f64) -> Result<(), SimError> {
        if value < 0.0 {
            return Err(SimError::Invariant(format!(
                "{} went negative ({})",
                stat.name(),
                value
            )));
        }
        Ok(())
    }
}

fn not_applied(stat: Stat, source: AuraId) -> SimError {
    SimError::Invariant(format!(
        "{} never modified {}",
        source.name(),
        stat.name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_remove_restores_baseline() {
        let mut block = StatBlock::new("player");
        block.set_base(Stat::SpellPower, 1000.0);

        let change = block
            .add_modifier(Stat::SpellPower, AuraId::DestructionPotion, Modifier::Flat(120.0))
            .unwrap();
        assert_eq!(change.before, 1000.0);
        assert_eq!(change.after, 1120.0);
        assert_eq!(change.describe_gain(), "Spell Power + 120 (1000 -> 1120)");

        block
            .remove_modifier(Stat::SpellPower, AuraId::DestructionPotion)
            .unwrap();
        assert_eq!(block.get(Stat::SpellPower), 1000.0);
        assert!(!block.has_modifiers());
    }

    #[test]
    fn test_remove_unapplied_is_error() {
        let mut block = StatBlock::new("player");
        block.set_base(Stat::SpellPower, 1000.0);
        let result = block.remove_modifier(Stat::SpellPower, AuraId::BloodFury);
        assert!(matches!(result, Err(SimError::Invariant(_))));
    }

    #[test]
    fn test_negative_value_is_error() {
        let mut block = StatBlock::new("player");
        block.set_base(Stat::HasteRating, 10.0);
        let result = block.add_modifier(Stat::HasteRating, AuraId::DrumsOfBattle, Modifier::Flat(-20.0));
        assert!(matches!(result, Err(SimError::Invariant(_))));
    }

    #[test]
    fn test_set_base_keeps_modifiers() {
        let mut block = StatBlock::new("pet");
        block.set_base(Stat::SpellPower, 100.0);
        block
            .add_modifier(Stat::SpellPower, AuraId::BlackBook, Modifier::Flat(200.0))
            .unwrap();
        block.set_base(Stat::SpellPower, 150.0);
        assert_eq!(block.get(Stat::SpellPower), 350.0);
        assert_eq!(block.base(Stat::SpellPower), 150.0);
    }

    #[test]
    fn test_clear_modifiers() {
        let mut block = StatBlock::new("player");
        block.set_base(Stat::ManaCostModifier, 1.0);
        block
            .add_modifier(Stat::ManaCostModifier, AuraId::PowerInfusion, Modifier::Factor(0.8))
            .unwrap();
        assert!((block.get(Stat::ManaCostModifier) - 0.8).abs() < 1e-12);
        block.clear_modifiers();
        assert_eq!(block.get(Stat::ManaCostModifier), 1.0);
    }
}
