//! Batch driver: repeats the single-year simulation under one seeded stream.

use super::config::SimConfig;
use super::iteration::{simulate_year, IterationOutcome};
use crate::budget::types::{validate_items, BudgetItem, RevenueModel};
use crate::constants::MAX_PREALLOCATED_OUTCOMES;
use crate::error::SimResult;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Ordered iteration table plus a snapshot of the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub items: Vec<BudgetItem>,
    pub revenue: RevenueModel,
    pub config: SimConfig,
    pub outcomes: Vec<IterationOutcome>,
}

impl SimulationResult {
    pub fn iterations(&self) -> u32 {
        self.config.iterations
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Fraction of iterations where revenue covered total cost (0.0 when empty).
    pub fn affordability_probability(&self) -> f64 {
        self.fraction(|o| o.affordable)
    }

    /// Fraction of iterations flagged as compound stress (0.0 when empty).
    pub fn compound_stress_probability(&self) -> f64 {
        self.fraction(|o| o.compound_stress)
    }

    /// Mean of `f` over all outcomes (0.0 when empty).
    pub fn mean_of(&self, f: impl Fn(&IterationOutcome) -> f64) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.outcomes.iter().map(f).sum::<f64>() / self.outcomes.len() as f64
    }

    fn fraction(&self, pred: impl Fn(&IterationOutcome) -> bool) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.outcomes.iter().filter(|o| pred(o)).count() as f64 / self.outcomes.len() as f64
    }
}

/// Run `config.iterations` fiscal years from a single stream seeded with
/// `config.seed`.
///
/// All inputs are validated before the first draw, so a misconfigured item
/// aborts the batch with nothing produced. Zero iterations yields an empty
/// table.
pub fn run_batch(
    items: &[BudgetItem],
    revenue: &RevenueModel,
    config: &SimConfig,
) -> SimResult<SimulationResult> {
    validate_items(items)?;
    revenue.validate()?;
    config.validate()?;

    info!(
        iterations = config.iterations,
        seed = config.seed,
        items = items.len(),
        "starting simulation batch"
    );
    debug!(?revenue, ?config, "batch configuration");

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut outcomes = Vec::with_capacity(outcome_capacity(config.iterations));

    for iteration in 0..config.iterations {
        outcomes.push(simulate_year(iteration, items, revenue, config, &mut rng)?);
    }

    let result = SimulationResult {
        items: items.to_vec(),
        revenue: revenue.clone(),
        config: config.clone(),
        outcomes,
    };

    info!(
        iterations = result.len(),
        affordability = result.affordability_probability(),
        "simulation batch complete"
    );

    Ok(result)
}

fn outcome_capacity(iterations: u32) -> usize {
    iterations.min(MAX_PREALLOCATED_OUTCOMES) as usize
}
