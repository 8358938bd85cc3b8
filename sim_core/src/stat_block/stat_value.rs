//! StatValue - Base value plus a ledger of aura modifiers

use crate::aura::AuraId;
use serde::{Deserialize, Serialize};

/// A single change an aura makes to a stat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Added to the base value
    Flat(f64),
    /// Multiplies the flat-adjusted total
    Factor(f64),
}

impl Modifier {
    /// Text used when the modifier is gained
    pub fn describe_gain(&self) -> String {
        match self {
            Modifier::Flat(v) if *v < 0.0 => format!("- {}", trim_number(-v)),
            Modifier::Flat(v) => format!("+ {}", trim_number(*v)),
            Modifier::Factor(v) => format!("* {}", trim_number(*v)),
        }
    }

    /// Text used when the modifier is removed
    pub fn describe_loss(&self) -> String {
        match self {
            Modifier::Flat(v) if *v < 0.0 => format!("+ {}", trim_number(-v)),
            Modifier::Flat(v) => format!("- {}", trim_number(*v)),
            Modifier::Factor(v) => format!("/ {}", trim_number(*v)),
        }
    }
}

fn trim_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{}", (v * 100.0).round() / 100.0)
    }
}

/// Represents a stat as a base value and the modifiers currently applied
///
/// Final value is calculated as:
/// `(base + Σ flat) × Π factor`
///
/// Modifiers are kept per source instead of being folded into a running
/// total. Removing a modifier recomputes from what is left, so applying
/// and removing an aura restores the previous value exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    /// Baseline value (race, gear, talents, static buffs)
    pub base: f64,
    #[serde(default)]
    modifiers: Vec<(AuraId, Modifier)>,
}

impl StatValue {
    /// Create a new StatValue with the given base
    pub fn with_base(base: f64) -> Self {
        StatValue {
            base,
            modifiers: Vec::new(),
        }
    }

    /// Calculate final value: (base + Σ flat) × Π factor
    pub fn compute(&self) -> f64 {
        let flat: f64 = self
            .modifiers
            .iter()
            .filter_map(|(_, m)| match m {
                Modifier::Flat(v) => Some(*v),
                Modifier::Factor(_) => None,
            })
            .sum();
        let factor: f64 = self
            .modifiers
            .iter()
            .filter_map(|(_, m)| match m {
                Modifier::Factor(v) => Some(*v),
                Modifier::Flat(_) => None,
            })
            .product();
        (self.base + flat) * factor
    }

    /// Record a modifier from the given source
    ///
    /// Returns false if that source already has a modifier on this stat.
    pub fn add(&mut self, source: AuraId, modifier: Modifier) -> bool {
        if self.has_modifier(source) {
            return false;
        }
        self.modifiers.push((source, modifier));
        true
    }

    /// Remove the modifier recorded for the given source
    pub fn remove(&mut self, source: AuraId) -> Option<Modifier> {
        let index = self.modifiers.iter().position(|(id, _)| *id == source)?;
        Some(self.modifiers.remove(index).1)
    }

    /// Check whether a source currently modifies this stat
    pub fn has_modifier(&self, source: AuraId) -> bool {
        self.modifiers.iter().any(|(id, _)| *id == source)
    }

    /// Number of modifiers currently applied
    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    /// Reset to just the base value
    pub fn reset_to_base(&mut self) {
        self.modifiers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_value_base_only() {
        let stat = StatValue::with_base(100.0);
        assert!((stat.compute() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stat_value_flat_and_factor() {
        let mut stat = StatValue::with_base(1000.0);
        assert!(stat.add(AuraId::DestructionPotion, Modifier::Flat(120.0)));
        assert!(stat.add(AuraId::PowerInfusion, Modifier::Factor(0.8)));
        // (1000 + 120) * 0.8 = 896
        assert!((stat.compute() - 896.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_source_rejected() {
        let mut stat = StatValue::with_base(10.0);
        assert!(stat.add(AuraId::Spellstrike, Modifier::Flat(92.0)));
        assert!(!stat.add(AuraId::Spellstrike, Modifier::Flat(92.0)));
        assert_eq!(stat.modifier_count(), 1);
    }

    #[test]
    fn test_out_of_order_removal_is_exact() {
        let base = 1234.567;
        let mut stat = StatValue::with_base(base);
        stat.add(AuraId::Spellstrike, Modifier::Flat(92.0));
        stat.add(AuraId::Flameshadow, Modifier::Flat(135.0));
        stat.remove(AuraId::Spellstrike);
        assert_eq!(stat.compute(), base + 135.0);
        stat.remove(AuraId::Flameshadow);
        assert_eq!(stat.compute(), base);
    }

    #[test]
    fn test_remove_missing_source() {
        let mut stat = StatValue::with_base(5.0);
        assert!(stat.remove(AuraId::BloodFury).is_none());
    }

    #[test]
    fn test_describe_modifiers() {
        assert_eq!(Modifier::Flat(120.0).describe_gain(), "+ 120");
        assert_eq!(Modifier::Flat(120.0).describe_loss(), "- 120");
        assert_eq!(Modifier::Factor(0.8).describe_gain(), "* 0.8");
    }
}
