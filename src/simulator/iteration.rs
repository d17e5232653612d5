//! One simulated fiscal year.

use super::config::SimConfig;
use super::sampler::sample_validated;
use crate::budget::types::{validate_items, BudgetItem, RevenueModel};
use crate::constants::{DEGENERATE_MACRO_EPSILON, MACRO_FACTOR_CENTER};
use crate::error::{ConfigError, SimResult};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Result of one simulated fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationOutcome {
    pub iteration: u32,
    pub total_cost: f64,
    pub operating_cost: f64,
    pub capital_cost: f64,
    pub revenue: f64,
    /// revenue - total_cost
    pub surplus: f64,
    /// total_cost <= revenue
    pub affordable: bool,
    pub macro_factor: f64,
    /// Revenue shortfall and macro-driven cost overrun in the same year
    pub compound_stress: bool,
}

/// Simulate one fiscal year after validating every input.
///
/// Draw order is fixed: revenue, then the macro factor (only when the shock
/// is enabled), then each item's cost in declaration order.
pub fn run_iteration(
    iteration: u32,
    items: &[BudgetItem],
    revenue: &RevenueModel,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> SimResult<IterationOutcome> {
    validate_items(items)?;
    revenue.validate()?;
    config.validate()?;
    simulate_year(iteration, items, revenue, config, rng)
}

/// Simulate one fiscal year from inputs the caller has already validated.
pub(crate) fn simulate_year(
    iteration: u32,
    items: &[BudgetItem],
    revenue_model: &RevenueModel,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> SimResult<IterationOutcome> {
    let revenue =
        draw_normal(revenue_model.expected, revenue_model.spread, "revenue spread", rng)?.max(0.0);

    let macro_factor = if revenue_model.macro_shock {
        draw_normal(
            MACRO_FACTOR_CENTER,
            revenue_model.macro_spread,
            "macro spread",
            rng,
        )?
        .clamp(config.macro_floor, config.macro_ceiling)
    } else {
        MACRO_FACTOR_CENTER
    };

    let mut total_cost = 0.0;
    let mut operating_cost = 0.0;
    let mut capital_cost = 0.0;

    for item in items {
        let cost = sample_validated(item, rng)? * macro_factor;
        total_cost += cost;
        if item.is_capital {
            capital_cost += cost;
        } else {
            operating_cost += cost;
        }
    }

    let surplus = revenue - total_cost;
    let affordable = total_cost <= revenue;
    let compound_stress = is_compound_stress(
        revenue,
        revenue_model.expected,
        total_cost,
        macro_factor,
        config,
    );

    Ok(IterationOutcome {
        iteration,
        total_cost,
        operating_cost,
        capital_cost,
        revenue,
        surplus,
        affordable,
        macro_factor,
        compound_stress,
    })
}

/// Revenue below the shortfall threshold while the macro-inflated cost exceeds
/// the overrun threshold over its neutral-factor baseline (`total / factor`).
///
/// A factor within `DEGENERATE_MACRO_EPSILON` of zero makes the baseline
/// meaningless, so the flag is false there.
pub fn is_compound_stress(
    revenue: f64,
    expected_revenue: f64,
    total_cost: f64,
    macro_factor: f64,
    config: &SimConfig,
) -> bool {
    if macro_factor.abs() < DEGENERATE_MACRO_EPSILON {
        trace!(macro_factor, "degenerate macro factor, compound stress forced false");
        return false;
    }
    let shortfall = revenue < expected_revenue * config.revenue_shortfall_ratio;
    let neutral_cost = total_cost / macro_factor;
    shortfall && total_cost > neutral_cost * config.cost_overrun_ratio
}

fn draw_normal(
    mean: f64,
    spread: f64,
    field: &str,
    rng: &mut impl Rng,
) -> Result<f64, ConfigError> {
    let dist = Normal::new(mean, spread).map_err(|_| ConfigError::NonFinite {
        field: field.to_string(),
        value: spread,
    })?;
    Ok(dist.sample(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::types::DistributionKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn items() -> Vec<BudgetItem> {
        vec![
            BudgetItem::new("ops", "a", 100.0, DistributionKind::Normal, 10.0, false),
            BudgetItem::new("cap", "b", 50.0, DistributionKind::Lognormal, 5.0, true),
        ]
    }

    #[test]
    fn test_subtotals_sum_to_total() {
        let revenue = RevenueModel::new(140.0, 20.0).with_macro_shock(0.05);
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for i in 0..500 {
            let outcome = run_iteration(i, &items(), &revenue, &config, &mut rng).unwrap();
            let sum = outcome.operating_cost + outcome.capital_cost;
            assert!((sum - outcome.total_cost).abs() <= 1e-9 * outcome.total_cost.max(1.0));
            assert_eq!(outcome.affordable, outcome.total_cost <= outcome.revenue);
            assert!((outcome.surplus - (outcome.revenue - outcome.total_cost)).abs() < 1e-9);
            assert!((0.5..=1.5).contains(&outcome.macro_factor));
            assert!(outcome.revenue >= 0.0);
        }
    }

    #[test]
    fn test_macro_disabled_is_exactly_one() {
        let revenue = RevenueModel::new(140.0, 20.0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let outcome =
            run_iteration(0, &items(), &revenue, &SimConfig::default(), &mut rng).unwrap();
        assert_eq!(outcome.macro_factor, 1.0);
        assert!(!outcome.compound_stress);
    }

    #[test]
    fn test_macro_factor_clamped_to_bounds() {
        // A 10x spread pushes most draws past the clamp
        let revenue = RevenueModel::new(140.0, 20.0).with_macro_shock(10.0);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut hit_floor = false;
        let mut hit_ceiling = false;
        for i in 0..200 {
            let outcome =
                run_iteration(i, &items(), &revenue, &SimConfig::default(), &mut rng).unwrap();
            hit_floor |= outcome.macro_factor == 0.5;
            hit_ceiling |= outcome.macro_factor == 1.5;
            assert!((0.5..=1.5).contains(&outcome.macro_factor));
        }
        assert!(hit_floor && hit_ceiling);
    }

    #[test]
    fn test_revenue_draw_comes_first() {
        let revenue = RevenueModel::new(140.0, 20.0).with_macro_shock(0.05);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut mirror = ChaCha8Rng::seed_from_u64(99);

        let outcome =
            run_iteration(0, &items(), &revenue, &SimConfig::default(), &mut rng).unwrap();
        let expected = Normal::new(140.0_f64, 20.0).unwrap().sample(&mut mirror).max(0.0);
        assert_eq!(outcome.revenue, expected);
    }

    #[test]
    fn test_compound_stress_requires_both_conditions() {
        let config = SimConfig::default();
        // shortfall and 1.2x macro inflation
        assert!(is_compound_stress(80.0, 100.0, 120.0, 1.2, &config));
        // shortfall without overrun
        assert!(!is_compound_stress(80.0, 100.0, 105.0, 1.05, &config));
        // overrun without shortfall
        assert!(!is_compound_stress(95.0, 100.0, 120.0, 1.2, &config));
        // deflation never counts as an overrun
        assert!(!is_compound_stress(10.0, 100.0, 80.0, 0.8, &config));
    }

    #[test]
    fn test_compound_stress_degenerate_factor_is_false() {
        let config = SimConfig::default();
        assert!(!is_compound_stress(0.0, 100.0, 1.0, 0.0, &config));
        assert!(!is_compound_stress(0.0, 100.0, 1.0, 1e-12, &config));
    }

    #[test]
    fn test_zero_floor_config_still_produces_finite_outcomes() {
        let config = SimConfig {
            macro_floor: 0.0,
            ..Default::default()
        };
        let revenue = RevenueModel::new(140.0, 20.0).with_macro_shock(5.0);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for i in 0..200 {
            let outcome = run_iteration(i, &items(), &revenue, &config, &mut rng).unwrap();
            assert!(outcome.total_cost.is_finite());
            if outcome.macro_factor == 0.0 {
                assert!(!outcome.compound_stress);
            }
        }
    }

    #[test]
    fn test_invalid_item_fails_iteration() {
        let mut bad = items();
        bad[1].spread = -1.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = run_iteration(
            0,
            &bad,
            &RevenueModel::baseline(),
            &SimConfig::default(),
            &mut rng,
        );
        assert!(result.is_err());
    }
}
