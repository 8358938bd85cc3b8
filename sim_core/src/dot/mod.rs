//! DoT (Damage over Time) tracking on the target

mod active;
mod types;

pub use active::ActiveDot;
pub use types::DotDef;

use crate::spell::SpellId;
use crate::types::School;

/// Damage dealt by one DoT tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotTick {
    pub spell: SpellId,
    pub school: School,
    pub damage: f64,
}

/// DoTs running on the target, one per spell
#[derive(Debug, Clone, Default)]
pub struct DotTracker {
    dots: Vec<ActiveDot>,
}

impl DotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a DoT, replacing any running copy from the same spell
    pub fn apply(&mut self, def: &DotDef, damage_per_tick: f64) {
        let dot = ActiveDot::new(def, damage_per_tick);
        match self.dots.iter_mut().find(|d| d.spell == def.spell) {
            Some(existing) => *existing = dot,
            None => self.dots.push(dot),
        }
    }

    pub fn is_active(&self, spell: SpellId) -> bool {
        self.get(spell).is_some_and(ActiveDot::is_active)
    }

    pub fn get(&self, spell: SpellId) -> Option<&ActiveDot> {
        self.dots.iter().find(|d| d.spell == spell)
    }

    pub fn duration_remaining(&self, spell: SpellId) -> f64 {
        self.get(spell).map_or(0.0, ActiveDot::duration_remaining)
    }

    /// Advance every DoT by `dt`, in application order
    pub fn tick(&mut self, dt: f64) -> Vec<DotTick> {
        let ticks = self
            .dots
            .iter_mut()
            .filter_map(|dot| {
                dot.advance(dt).map(|damage| DotTick {
                    spell: dot.spell,
                    school: dot.school,
                    damage,
                })
            })
            .collect();
        self.dots.retain(ActiveDot::is_active);
        ticks
    }

    /// Seconds until the next DoT tick
    pub fn next_event(&self) -> Option<f64> {
        self.dots
            .iter()
            .filter(|d| d.is_active())
            .map(|d| d.time_until_tick)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn clear(&mut self) {
        self.dots.clear();
    }
}
