//! SimulationClock - Event-driven time for one trial

use crate::error::SimError;

/// Tolerance for treating the fight as over
pub const TIME_EPSILON: f64 = 1e-9;
/// Upper bound on steps in one trial
const MAX_STEPS: u64 = 5_000_000;

#[derive(Debug, Clone)]
pub struct SimulationClock {
    now: f64,
    fight_length: f64,
    steps: u64,
}

impl SimulationClock {
    pub fn new(fight_length: f64) -> Self {
        SimulationClock {
            now: 0.0,
            fight_length,
            steps: 0,
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn fight_length(&self) -> f64 {
        self.fight_length
    }

    pub fn remaining(&self) -> f64 {
        (self.fight_length - self.now).max(0.0)
    }

    pub fn is_finished(&self) -> bool {
        self.remaining() <= TIME_EPSILON
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Move time forward by a positive step
    pub fn advance(&mut self, dt: f64) -> Result<(), SimError> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(SimError::Invariant(format!("time step must be positive, got {}", dt)));
        }
        self.steps += 1;
        if self.steps > MAX_STEPS {
            return Err(SimError::Invariant(format!(
                "trial exceeded {} steps at {:.3}s",
                MAX_STEPS, self.now
            )));
        }
        self.now += dt;
        if self.fight_length - self.now <= TIME_EPSILON {
            self.now = self.fight_length;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_to_end() {
        let mut clock = SimulationClock::new(10.0);
        clock.advance(3.3).unwrap();
        clock.advance(clock.remaining()).unwrap();
        assert!(clock.is_finished());
        assert_eq!(clock.now(), 10.0);
        assert_eq!(clock.steps(), 2);
    }

    #[test]
    fn test_non_positive_step_rejected() {
        let mut clock = SimulationClock::new(10.0);
        assert!(clock.advance(0.0).is_err());
        assert!(clock.advance(-1.0).is_err());
        assert!(clock.advance(f64::NAN).is_err());
    }
}
