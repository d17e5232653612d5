//! Named fiscal scenarios: rescaled item sets and overridden revenue models,
//! each simulated independently from the same seed.

use super::config::SimConfig;
use super::runner::{run_batch, SimulationResult};
use crate::budget::types::{require_finite, validate_items, BudgetItem, RevenueModel};
use crate::constants::{BASELINE_REVENUE, BASELINE_REVENUE_SPREAD, SCENARIO_ITERATIONS};
use crate::error::{ConfigError, SimResult};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One named re-parameterization of the base budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    /// Multiplies every item's mean cost (and its spread)
    pub cost_multiplier: f64,
    /// Further multiplies every item's spread
    pub spread_multiplier: f64,
    pub expected_revenue: f64,
    pub revenue_spread: f64,
    #[serde(default = "default_scenario_iterations")]
    pub iterations: u32,
}

fn default_scenario_iterations() -> u32 {
    SCENARIO_ITERATIONS
}

impl ScenarioSpec {
    pub fn new(
        name: impl Into<String>,
        cost_multiplier: f64,
        spread_multiplier: f64,
        expected_revenue: f64,
        revenue_spread: f64,
    ) -> Self {
        Self {
            name: name.into(),
            cost_multiplier,
            spread_multiplier,
            expected_revenue,
            revenue_spread,
            iterations: SCENARIO_ITERATIONS,
        }
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Optimistic, base case and pessimistic revenue outlooks.
    pub fn standard_set() -> Vec<ScenarioSpec> {
        vec![
            ScenarioSpec::new("Optimistic", 0.85, 0.7, 8_000_000_000.0, 1_200_000_000.0),
            ScenarioSpec::new("Base Case", 1.0, 1.0, BASELINE_REVENUE, BASELINE_REVENUE_SPREAD),
            ScenarioSpec::new("Pessimistic", 1.20, 1.3, 3_000_000_000.0, 1_000_000_000.0),
        ]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("cost multiplier", self.cost_multiplier),
            ("spread multiplier", self.spread_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidMultiplier {
                    scenario: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        require_finite("scenario expected revenue", self.expected_revenue)?;
        require_finite("scenario revenue spread", self.revenue_spread)?;
        Ok(())
    }

    /// Rescaled copy of `base`; the shared set is never touched.
    pub fn apply_to_items(&self, base: &[BudgetItem]) -> Vec<BudgetItem> {
        base.iter()
            .map(|item| item.rescaled(self.cost_multiplier, self.spread_multiplier))
            .collect()
    }

    /// `base` with expected revenue and spread overridden; macro settings kept.
    pub fn apply_to_revenue(&self, base: &RevenueModel) -> RevenueModel {
        RevenueModel {
            expected: self.expected_revenue,
            spread: self.revenue_spread,
            ..base.clone()
        }
    }
}

/// Reduced statistics for one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub iterations: u32,
    pub affordability_probability: f64,
    pub compound_stress_probability: f64,
    pub mean_total_cost: f64,
    pub mean_revenue: f64,
}

impl ScenarioSummary {
    pub fn from_result(name: &str, result: &SimulationResult) -> Self {
        Self {
            name: name.to_string(),
            iterations: result.iterations(),
            affordability_probability: result.affordability_probability(),
            compound_stress_probability: result.compound_stress_probability(),
            mean_total_cost: result.mean_of(|o| o.total_cost),
            mean_revenue: result.mean_of(|o| o.revenue),
        }
    }
}

/// Scenario summaries in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub scenarios: Vec<ScenarioSummary>,
}

impl ScenarioReport {
    pub fn get(&self, name: &str) -> Option<&ScenarioSummary> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("── SCENARIOS ────────────────────────────────────────────────────\n");
        out.push_str("  Scenario               Runs   Affordable   Stress   Mean Cost   Mean Rev\n");
        for s in &self.scenarios {
            out.push_str(&format!(
                "  {:<20} {:>6}   {:>9.1}%   {:>5.1}%   {:>9}   {:>8}\n",
                s.name,
                s.iterations,
                s.affordability_probability * 100.0,
                s.compound_stress_probability * 100.0,
                billions(s.mean_total_cost),
                billions(s.mean_revenue),
            ));
        }
        out
    }
}

pub(crate) fn billions(dollars: f64) -> String {
    format!("${:.2}B", dollars / 1e9)
}

/// Run every scenario against `base_items` / `base_revenue`.
///
/// Each scenario gets its own rescaled copy of the items and its own batch
/// seeded with `base_config.seed`, so scenarios are reproducible on their own
/// rather than chained. Any invalid scenario fails the whole call before
/// anything is simulated.
pub fn run_scenarios(
    base_items: &[BudgetItem],
    base_revenue: &RevenueModel,
    base_config: &SimConfig,
    specs: &[ScenarioSpec],
) -> SimResult<ScenarioReport> {
    base_config.validate()?;
    for (idx, spec) in specs.iter().enumerate() {
        spec.validate()?;
        validate_items(&spec.apply_to_items(base_items))?;
        spec.apply_to_revenue(base_revenue).validate()?;
        if specs[..idx].iter().any(|prev| prev.name == spec.name) {
            return Err(ConfigError::DuplicateScenarioName(spec.name.clone()).into());
        }
    }

    let mut report = ScenarioReport::default();
    for spec in specs {
        let items = spec.apply_to_items(base_items);
        let revenue = spec.apply_to_revenue(base_revenue);
        let config = base_config.clone().with_iterations(spec.iterations);

        let result = run_batch(&items, &revenue, &config)?;
        let summary = ScenarioSummary::from_result(&spec.name, &result);
        info!(
            scenario = %spec.name,
            affordability = summary.affordability_probability,
            "scenario complete"
        );
        report.scenarios.push(summary);
    }

    Ok(report)
}
