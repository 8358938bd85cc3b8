//! Trial results and their aggregation across a batch

use crate::combat_log::LogEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of a single trial
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub fight_length: f64,
    pub player_damage: f64,
    pub pet_damage: f64,
    /// Portion of player damage dealt by DoT ticks
    pub dot_damage: f64,
    pub casts: u32,
    pub crits: u32,
    pub resists: u32,
    pub mana_spent: f64,
    pub mana_gained: f64,
    /// Seconds during which at least one important aura was active
    pub important_aura_uptime: f64,
    /// Activations per aura name
    pub procs: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub combat_log: Vec<LogEntry>,
}

impl TrialResult {
    pub fn new(fight_length: f64) -> Self {
        TrialResult {
            fight_length,
            ..Self::default()
        }
    }

    pub fn total_damage(&self) -> f64 {
        self.player_damage + self.pet_damage
    }

    pub fn dps(&self) -> f64 {
        if self.fight_length <= 0.0 {
            return 0.0;
        }
        self.total_damage() / self.fight_length
    }
}

/// Mean, spread and range of one metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub mean: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Standard error of the mean
    pub std_error: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricSummary {
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = if samples.len() > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        MetricSummary {
            mean,
            std_dev,
            std_error: std_dev / n.sqrt(),
            min: samples.iter().copied().fold(f64::INFINITY, f64::min),
            max: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Aggregated statistics for a batch of trials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSummary {
    pub iterations_requested: u32,
    pub completed: u32,
    pub aborted: u32,
    pub cancelled: u32,
    pub dps: MetricSummary,
    pub damage: MetricSummary,
    pub fight_length: MetricSummary,
    pub mean_mana_spent: f64,
    pub mean_casts: f64,
    pub crit_rate: f64,
    pub resist_rate: f64,
    /// Share of fight time with an important aura active, in percent
    pub important_aura_uptime: f64,
    /// Average activations per trial, by aura name
    pub procs_per_trial: BTreeMap<String, f64>,
    /// Messages of aborted trials
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub combat_log: Vec<LogEntry>,
}

impl SimSummary {
    /// Aggregate completed trials; abort and cancel counts are filled in by the caller
    pub fn from_results(iterations_requested: u32, results: &[TrialResult]) -> Self {
        let completed = results.len();
        let dps: Vec<f64> = results.iter().map(TrialResult::dps).collect();
        let damage: Vec<f64> = results.iter().map(TrialResult::total_damage).collect();
        let lengths: Vec<f64> = results.iter().map(|r| r.fight_length).collect();

        let mean = |f: &dyn Fn(&TrialResult) -> f64| {
            if completed == 0 {
                0.0
            } else {
                results.iter().map(f).sum::<f64>() / completed as f64
            }
        };

        let casts: u32 = results.iter().map(|r| r.casts).sum();
        let ratio = |part: u32| if casts == 0 { 0.0 } else { part as f64 / casts as f64 };
        let total_time: f64 = lengths.iter().sum();
        let uptime: f64 = results.iter().map(|r| r.important_aura_uptime).sum();

        let mut procs_per_trial: BTreeMap<String, f64> = BTreeMap::new();
        for result in results {
            for (name, count) in &result.procs {
                *procs_per_trial.entry(name.clone()).or_insert(0.0) += *count as f64;
            }
        }
        for value in procs_per_trial.values_mut() {
            *value /= completed.max(1) as f64;
        }

        SimSummary {
            iterations_requested,
            completed: completed as u32,
            dps: MetricSummary::from_samples(&dps),
            damage: MetricSummary::from_samples(&damage),
            fight_length: MetricSummary::from_samples(&lengths),
            mean_mana_spent: mean(&|r| r.mana_spent),
            mean_casts: mean(&|r| r.casts as f64),
            crit_rate: ratio(results.iter().map(|r| r.crits).sum()),
            resist_rate: ratio(results.iter().map(|r| r.resists).sum()),
            important_aura_uptime: if total_time > 0.0 {
                uptime / total_time * 100.0
            } else {
                0.0
            },
            procs_per_trial,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_summary() {
        let summary = MetricSummary::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((summary.mean - 5.0).abs() < 1e-9);
        // sample variance = 32 / 7
        assert!((summary.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-9);
        assert!((summary.std_error - summary.std_dev / 8f64.sqrt()).abs() < 1e-9);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
    }

    #[test]
    fn test_single_sample_has_zero_spread() {
        let summary = MetricSummary::from_samples(&[3.0]);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.mean, 3.0);
    }

    #[test]
    fn test_summary_from_results() {
        let mut a = TrialResult::new(100.0);
        a.player_damage = 100_000.0;
        a.casts = 40;
        a.crits = 10;
        a.important_aura_uptime = 50.0;
        a.procs.insert("Spellstrike".to_string(), 2);
        let mut b = TrialResult::new(100.0);
        b.player_damage = 120_000.0;
        b.casts = 40;
        b.crits = 10;

        let summary = SimSummary::from_results(2, &[a, b]);
        assert_eq!(summary.completed, 2);
        assert!((summary.dps.mean - 1100.0).abs() < 1e-9);
        assert!((summary.crit_rate - 0.25).abs() < 1e-9);
        assert!((summary.important_aura_uptime - 25.0).abs() < 1e-9);
        assert_eq!(summary.procs_per_trial.get("Spellstrike"), Some(&1.0));
    }

    #[test]
    fn test_empty_results() {
        let summary = SimSummary::from_results(5, &[]);
        assert_eq!(summary.completed, 0);
        assert_eq!(summary.dps.mean, 0.0);
    }
}
