//! Batch runner - Many independent trials, optionally across threads

use super::{SimSummary, Simulation, TrialResult};
use crate::config::Settings;
use crate::error::SimError;
use crate::random::SeededRandom;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// How a batch of trials is run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchOptions {
    pub iterations: u32,
    /// Trial `i` is seeded with `seed + i`
    pub seed: u64,
    pub parallel: bool,
    /// Keep the combat log of the first trial
    pub record_first_log: bool,
}

impl From<&Settings> for BatchOptions {
    fn from(settings: &Settings) -> Self {
        BatchOptions {
            iterations: settings.iterations,
            seed: settings.seed,
            parallel: settings.parallel,
            record_first_log: settings.combat_log,
        }
    }
}

enum TrialOutcome {
    Completed(TrialResult),
    Aborted(SimError),
    Cancelled,
}

fn run_one(sim: &mut Simulation, options: &BatchOptions, iteration: u32, cancel: Option<&AtomicBool>) -> TrialOutcome {
    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
        return TrialOutcome::Cancelled;
    }
    let mut rng = SeededRandom::new(options.seed.wrapping_add(u64::from(iteration)));
    let record_log = options.record_first_log && iteration == 0;
    match sim.run_trial(&mut rng, record_log) {
        Ok(result) => {
            tracing::debug!(trial = iteration, dps = result.dps(), fight_length = result.fight_length, "Trial finished");
            TrialOutcome::Completed(result)
        }
        Err(err) => TrialOutcome::Aborted(err),
    }
}

/// Run `options.iterations` trials and aggregate the completed ones
///
/// A trial that hits an engine error is aborted and counted, the rest of
/// the batch carries on. Setting `cancel` stops trials that have not
/// started yet.
pub fn run_batch(sim: &Simulation, options: &BatchOptions, cancel: Option<&AtomicBool>) -> SimSummary {
    tracing::info!(
        iterations = options.iterations,
        seed = options.seed,
        parallel = options.parallel,
        "Starting batch"
    );

    let outcomes: Vec<TrialOutcome> = if options.parallel {
        (0..options.iterations)
            .into_par_iter()
            .map_init(|| sim.clone(), |local, i| run_one(local, options, i, cancel))
            .collect()
    } else {
        let mut local = sim.clone();
        (0..options.iterations)
            .map(|i| run_one(&mut local, options, i, cancel))
            .collect()
    };

    let mut results = Vec::with_capacity(outcomes.len());
    let mut errors = Vec::new();
    let mut cancelled = 0;
    for (i, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            TrialOutcome::Completed(result) => results.push(result),
            TrialOutcome::Aborted(err) => {
                tracing::warn!(trial = i, error = %err, "Trial aborted");
                errors.push(format!("trial {}: {}", i, err));
            }
            TrialOutcome::Cancelled => cancelled += 1,
        }
    }

    let first_log = if options.record_first_log {
        results.first_mut().map(|r| std::mem::take(&mut r.combat_log))
    } else {
        None
    };

    let mut summary = SimSummary::from_results(options.iterations, &results);
    summary.aborted = errors.len() as u32;
    summary.cancelled = cancelled;
    summary.errors = errors;
    summary.combat_log = first_log.unwrap_or_default();

    tracing::info!(
        completed = summary.completed,
        aborted = summary.aborted,
        cancelled = summary.cancelled,
        dps = summary.dps.mean,
        "Batch finished"
    );
    summary
}
