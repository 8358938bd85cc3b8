//! ActiveDot - A DoT currently running on the target

use super::types::DotDef;
use crate::spell::SpellId;
use crate::types::School;

/// A running DoT with its damage snapshotted at application
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDot {
    pub spell: SpellId,
    pub school: School,
    pub damage_per_tick: f64,
    pub tick_rate: f64,
    pub time_until_tick: f64,
    pub ticks_remaining: u32,
}

impl ActiveDot {
    pub fn new(def: &DotDef, damage_per_tick: f64) -> Self {
        ActiveDot {
            spell: def.spell,
            school: def.school,
            damage_per_tick,
            tick_rate: def.tick_rate,
            time_until_tick: def.tick_rate,
            ticks_remaining: def.ticks(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.ticks_remaining > 0
    }

    /// Seconds left until the last tick lands
    pub fn duration_remaining(&self) -> f64 {
        if self.ticks_remaining == 0 {
            return 0.0;
        }
        self.time_until_tick + self.tick_rate * (self.ticks_remaining - 1) as f64
    }

    /// Advance time, returning the damage of a tick if one landed
    pub fn advance(&mut self, dt: f64) -> Option<f64> {
        if !self.is_active() {
            return None;
        }
        self.time_until_tick = (self.time_until_tick - dt).max(0.0);
        if self.time_until_tick > 0.0 {
            return None;
        }
        self.ticks_remaining -= 1;
        self.time_until_tick = self.tick_rate;
        Some(self.damage_per_tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn immolate() -> DotDef {
        DotDef {
            spell: SpellId::Immolate,
            school: School::Fire,
            duration: 15.0,
            tick_rate: 3.0,
            base_damage: 615.0,
            coefficient: 0.65,
        }
    }

    #[test]
    fn test_ticks_until_expired() {
        let mut dot = ActiveDot::new(&immolate(), 100.0);
        assert!((dot.duration_remaining() - 15.0).abs() < 1e-9);

        let mut total = 0.0;
        for _ in 0..10 {
            if let Some(damage) = dot.advance(1.5) {
                total += damage;
            }
        }
        assert!((total - 500.0).abs() < 1e-9);
        assert!(!dot.is_active());
        assert_eq!(dot.advance(3.0), None);
    }
}
