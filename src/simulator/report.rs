//! Simulation report generation.

use super::runner::SimulationResult;
use super::scenario::billions;
use serde::Serialize;

/// Aggregated statistics for one simulation batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub iterations: usize,
    pub seed: u64,
    pub macro_shock: bool,

    // Means over all iterations
    pub mean_total_cost: f64,
    pub mean_operating_cost: f64,
    pub mean_capital_cost: f64,
    pub mean_revenue: f64,
    pub mean_surplus: f64,
    pub mean_macro_factor: f64,

    // Classification rates
    pub affordability_probability: f64,
    pub compound_stress_probability: f64,

    // Surplus distribution (nearest-rank)
    pub surplus_p5: f64,
    pub surplus_p50: f64,
    pub surplus_p95: f64,

    /// Mean deficit over the unaffordable iterations only
    pub mean_shortfall: f64,

    pub expected_revenue: f64,
    pub configured_mean_cost: f64,
}

impl SimReport {
    pub fn from_result(result: &SimulationResult) -> Self {
        let mut surpluses: Vec<f64> = result.outcomes.iter().map(|o| o.surplus).collect();
        surpluses.sort_by(f64::total_cmp);

        let deficits: Vec<f64> = result
            .outcomes
            .iter()
            .filter(|o| !o.affordable)
            .map(|o| -o.surplus)
            .collect();
        let mean_shortfall = if deficits.is_empty() {
            0.0
        } else {
            deficits.iter().sum::<f64>() / deficits.len() as f64
        };

        Self {
            iterations: result.len(),
            seed: result.seed(),
            macro_shock: result.revenue.macro_shock,
            mean_total_cost: result.mean_of(|o| o.total_cost),
            mean_operating_cost: result.mean_of(|o| o.operating_cost),
            mean_capital_cost: result.mean_of(|o| o.capital_cost),
            mean_revenue: result.mean_of(|o| o.revenue),
            mean_surplus: result.mean_of(|o| o.surplus),
            mean_macro_factor: result.mean_of(|o| o.macro_factor),
            affordability_probability: result.affordability_probability(),
            compound_stress_probability: result.compound_stress_probability(),
            surplus_p5: percentile(&surpluses, 5.0),
            surplus_p50: percentile(&surpluses, 50.0),
            surplus_p95: percentile(&surpluses, 95.0),
            mean_shortfall,
            expected_revenue: result.revenue.expected,
            configured_mean_cost: result.items.iter().map(|i| i.mean_cost).sum(),
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 FISCAL FEASIBILITY REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Iterations: {}   Seed: {}   Macro shock: {}\n\n",
            self.iterations,
            self.seed,
            if self.macro_shock { "on" } else { "off" }
        ));

        report.push_str("── COSTS ────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Configured Mean Cost: {}\n",
            billions(self.configured_mean_cost)
        ));
        report.push_str(&format!(
            "  Mean Total Cost:      {}\n",
            billions(self.mean_total_cost)
        ));
        report.push_str(&format!(
            "  Mean Operating:       {}\n",
            billions(self.mean_operating_cost)
        ));
        report.push_str(&format!(
            "  Mean Capital:         {}\n",
            billions(self.mean_capital_cost)
        ));
        report.push_str(&format!(
            "  Mean Macro Factor:    {:.4}\n\n",
            self.mean_macro_factor
        ));

        report.push_str("── REVENUE ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Expected Revenue:     {}\n",
            billions(self.expected_revenue)
        ));
        report.push_str(&format!(
            "  Mean Realized:        {}\n\n",
            billions(self.mean_revenue)
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Affordable:           {:.2}%\n",
            self.affordability_probability * 100.0
        ));
        report.push_str(&format!(
            "  Compound Stress:      {:.2}%\n",
            self.compound_stress_probability * 100.0
        ));
        report.push_str(&format!(
            "  Mean Surplus:         {}\n",
            billions(self.mean_surplus)
        ));
        report.push_str(&format!(
            "  Surplus P5/P50/P95:   {} / {} / {}\n",
            billions(self.surplus_p5),
            billions(self.surplus_p50),
            billions(self.surplus_p95)
        ));
        report.push_str(&format!(
            "  Mean Shortfall:       {}\n\n",
            billions(self.mean_shortfall)
        ));

        report.push_str("── ASSESSMENT ───────────────────────────────────────────────────\n");
        let rating = if self.affordability_probability >= 0.9 {
            "AFFORDABLE - revenue covers costs in nearly every year"
        } else if self.affordability_probability >= 0.5 {
            "AT RISK - deficits in a meaningful share of years"
        } else if self.affordability_probability >= 0.1 {
            "UNLIKELY - deficits in most years"
        } else {
            "UNAFFORDABLE - revenue rarely covers costs"
        };
        report.push_str(&format!("  {}\n", rating));
        if self.mean_operating_cost > self.expected_revenue {
            report.push_str("  ⚠️  Operating costs alone exceed expected revenue\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Nearest-rank percentile of an ascending slice (0.0 when empty).
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (pct / 100.0 * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}
