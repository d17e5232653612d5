//! Per-item cost sampling.

use crate::budget::types::{BudgetItem, DistributionKind};
use crate::error::{ConfigError, SimResult};
use rand::Rng;
use rand_distr::{Distribution, LogNormal, Normal};

/// Draw one annual cost for `item`.
///
/// `normal` draws are clamped at zero (not resampled). For `lognormal` the
/// item's mean and spread are the arithmetic mean and standard deviation of
/// the resulting distribution and are converted to the underlying normal's
/// parameters first. The item is validated before anything is drawn.
pub fn sample_cost(item: &BudgetItem, rng: &mut impl Rng) -> SimResult<f64> {
    item.validate()?;
    sample_validated(item, rng)
}

/// Sample an item already known to satisfy its invariants.
pub(crate) fn sample_validated(item: &BudgetItem, rng: &mut impl Rng) -> SimResult<f64> {
    match item.distribution {
        DistributionKind::Normal => {
            let dist = Normal::new(item.mean_cost, item.spread)
                .map_err(|_| spread_error(item))?;
            Ok(dist.sample(rng).max(0.0))
        }
        DistributionKind::Lognormal => {
            // ln(0) is undefined; a zero-mean item is a point mass at zero
            if item.mean_cost == 0.0 {
                return Ok(0.0);
            }
            let (mu, sigma) = lognormal_params(item.mean_cost, item.spread);
            let dist = LogNormal::new(mu, sigma).map_err(|_| spread_error(item))?;
            Ok(dist.sample(rng))
        }
    }
}

/// Convert an arithmetic mean and standard deviation into the (mu, sigma)
/// of the underlying normal distribution.
pub fn lognormal_params(mean: f64, spread: f64) -> (f64, f64) {
    let variance = spread * spread;
    let sigma_sq = (1.0 + variance / (mean * mean)).ln();
    let mu = mean.ln() - sigma_sq / 2.0;
    (mu, sigma_sq.sqrt())
}

// Only reachable when the parameter transform overflows
fn spread_error(item: &BudgetItem) -> ConfigError {
    ConfigError::NonFinite {
        field: format!("{} distribution spread", item.name),
        value: item.spread,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn item(kind: DistributionKind, mean: f64, spread: f64) -> BudgetItem {
        BudgetItem::new("test item", "test", mean, kind, spread, false)
    }

    #[test]
    fn test_normal_never_negative() {
        // Spread far larger than the mean forces many clamped draws
        let wide = item(DistributionKind::Normal, 10.0, 1_000.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut zeros = 0;
        for _ in 0..10_000 {
            let cost = sample_cost(&wide, &mut rng).unwrap();
            assert!(cost >= 0.0);
            if cost == 0.0 {
                zeros += 1;
            }
        }
        assert!(zeros > 0, "clamp should produce exact zeros");
    }

    #[test]
    fn test_normal_zero_spread_is_exact() {
        let fixed = item(DistributionKind::Normal, 123.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(sample_cost(&fixed, &mut rng).unwrap(), 123.0);
    }

    #[test]
    fn test_lognormal_params_recover_moments() {
        let (mu, sigma) = lognormal_params(2_500.0, 750.0);
        let mean = (mu + sigma * sigma / 2.0).exp();
        let var = ((sigma * sigma).exp() - 1.0) * (2.0 * mu + sigma * sigma).exp();
        assert!((mean - 2_500.0).abs() < 1e-6);
        assert!((var.sqrt() - 750.0).abs() < 1e-6);
    }

    #[test]
    fn test_lognormal_positive_and_converges_to_mean() {
        let grocery = item(DistributionKind::Lognormal, 60_000_000.0, 15_000_000.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let n = 100_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let cost = sample_cost(&grocery, &mut rng).unwrap();
            assert!(cost > 0.0);
            sum += cost;
        }
        let mean = sum / n as f64;
        assert!(
            (mean - 60_000_000.0).abs() < 60_000_000.0 * 0.05,
            "empirical mean {mean} too far from configured mean"
        );
    }

    #[test]
    fn test_lognormal_zero_mean_is_zero() {
        let empty = item(DistributionKind::Lognormal, 0.0, 10.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(sample_cost(&empty, &mut rng).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_item_consumes_no_draws() {
        let bad = item(DistributionKind::Normal, -5.0, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut untouched = ChaCha8Rng::seed_from_u64(9);

        assert!(sample_cost(&bad, &mut rng).is_err());
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }
}
