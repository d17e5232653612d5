use crate::constants::{
    BASELINE_REVENUE, BASELINE_REVENUE_SPREAD, DEFAULT_MACRO_SPREAD,
};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of the cost distribution for a budget item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DistributionKind {
    /// Symmetric around the mean, clamped at zero
    Normal,
    /// Right-skewed; mean/spread are the arithmetic moments of the result
    Lognormal,
}

impl DistributionKind {
    pub fn name(&self) -> &'static str {
        match self {
            DistributionKind::Normal => "normal",
            DistributionKind::Lognormal => "lognormal",
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistributionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(DistributionKind::Normal),
            "lognormal" => Ok(DistributionKind::Lognormal),
            _ => Err(ConfigError::UnsupportedDistribution(s.to_string())),
        }
    }
}

impl TryFrom<String> for DistributionKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One recurring fiscal commitment with an uncertain annual cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Unique within a run
    pub name: String,
    pub category: String,
    /// Mean annual cost in dollars
    pub mean_cost: f64,
    pub distribution: DistributionKind,
    /// Standard deviation, same units as `mean_cost`
    pub spread: f64,
    /// Capital-like (deferrable) rather than operating
    #[serde(default)]
    pub is_capital: bool,
}

impl BudgetItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        mean_cost: f64,
        distribution: DistributionKind,
        spread: f64,
        is_capital: bool,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            mean_cost,
            distribution,
            spread,
            is_capital,
        }
    }

    /// Build an item from a textual distribution kind, rejecting unknown kinds.
    pub fn with_kind(
        name: impl Into<String>,
        category: impl Into<String>,
        mean_cost: f64,
        kind: &str,
        spread: f64,
        is_capital: bool,
    ) -> Result<Self, ConfigError> {
        let distribution = kind.parse()?;
        Ok(Self::new(name, category, mean_cost, distribution, spread, is_capital))
    }

    /// Check the item's invariants: finite, non-negative mean and spread.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_finite(&format!("{} mean cost", self.name), self.mean_cost)?;
        require_finite(&format!("{} spread", self.name), self.spread)?;
        if self.mean_cost < 0.0 {
            return Err(ConfigError::NegativeMean {
                item: self.name.clone(),
                value: self.mean_cost,
            });
        }
        if self.spread < 0.0 {
            return Err(ConfigError::NegativeSpread {
                item: self.name.clone(),
                value: self.spread,
            });
        }
        Ok(())
    }

    /// Copy of this item with the mean scaled by `cost_multiplier` and the
    /// spread scaled by `cost_multiplier * spread_multiplier`.
    pub fn rescaled(&self, cost_multiplier: f64, spread_multiplier: f64) -> Self {
        Self {
            mean_cost: self.mean_cost * cost_multiplier,
            spread: self.spread * cost_multiplier * spread_multiplier,
            ..self.clone()
        }
    }
}

/// The uncertain income available to cover costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueModel {
    pub expected: f64,
    pub spread: f64,
    /// Apply one shared macro-economic factor to every item's cost
    #[serde(default)]
    pub macro_shock: bool,
    /// Standard deviation of the macro factor around 1.0
    #[serde(default = "default_macro_spread")]
    pub macro_spread: f64,
}

fn default_macro_spread() -> f64 {
    DEFAULT_MACRO_SPREAD
}

impl RevenueModel {
    pub fn new(expected: f64, spread: f64) -> Self {
        Self {
            expected,
            spread,
            macro_shock: false,
            macro_spread: DEFAULT_MACRO_SPREAD,
        }
    }

    /// $5B expected, $1.5B spread, macro shock enabled at 5%.
    pub fn baseline() -> Self {
        Self::new(BASELINE_REVENUE, BASELINE_REVENUE_SPREAD).with_macro_shock(DEFAULT_MACRO_SPREAD)
    }

    pub fn with_macro_shock(mut self, macro_spread: f64) -> Self {
        self.macro_shock = true;
        self.macro_spread = macro_spread;
        self
    }

    pub fn without_macro_shock(mut self) -> Self {
        self.macro_shock = false;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_finite("expected revenue", self.expected)?;
        require_finite("revenue spread", self.spread)?;
        require_finite("macro spread", self.macro_spread)?;
        if self.expected < 0.0 {
            return Err(ConfigError::NegativeRevenue(self.expected));
        }
        if self.spread < 0.0 {
            return Err(ConfigError::NegativeRevenueSpread(self.spread));
        }
        if self.macro_spread < 0.0 {
            return Err(ConfigError::NegativeMacroSpread(self.macro_spread));
        }
        Ok(())
    }
}

impl Default for RevenueModel {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Validate every item and reject duplicate names.
pub fn validate_items(items: &[BudgetItem]) -> Result<(), ConfigError> {
    for (idx, item) in items.iter().enumerate() {
        item.validate()?;
        if items[..idx].iter().any(|prev| prev.name == item.name) {
            return Err(ConfigError::DuplicateItemName(item.name.clone()));
        }
    }
    Ok(())
}

/// Sum of configured mean costs.
pub fn total_mean_cost(items: &[BudgetItem]) -> f64 {
    items.iter().map(|i| i.mean_cost).sum()
}

pub(crate) fn require_finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite {
            field: field.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, mean: f64, spread: f64) -> BudgetItem {
        BudgetItem::new(name, "test", mean, DistributionKind::Normal, spread, false)
    }

    #[test]
    fn test_distribution_kind_parses_known_kinds() {
        assert_eq!("normal".parse::<DistributionKind>(), Ok(DistributionKind::Normal));
        assert_eq!("lognormal".parse::<DistributionKind>(), Ok(DistributionKind::Lognormal));
    }

    #[test]
    fn test_distribution_kind_is_case_and_space_exact() {
        for kind in ["NORMAL", "LogNormal", " lognormal ", "normal\n"] {
            assert_eq!(
                kind.parse::<DistributionKind>(),
                Err(ConfigError::UnsupportedDistribution(kind.to_string()))
            );
        }
        assert!(BudgetItem::with_kind("x", "y", 1.0, "NORMAL", 0.0, false).is_err());
    }

    #[test]
    fn test_distribution_kind_rejects_unknown() {
        assert_eq!(
            "uniform".parse::<DistributionKind>(),
            Err(ConfigError::UnsupportedDistribution("uniform".to_string()))
        );
        assert!(BudgetItem::with_kind("x", "y", 1.0, "triangular", 0.0, false).is_err());
    }

    #[test]
    fn test_distribution_kind_json_uses_lowercase_names() {
        let json = serde_json::to_string(&DistributionKind::Lognormal).unwrap();
        assert_eq!(json, "\"lognormal\"");
        let back: DistributionKind = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(back, DistributionKind::Normal);
        assert!(serde_json::from_str::<DistributionKind>("\"uniform\"").is_err());
    }

    #[test]
    fn test_item_validation() {
        assert!(item("ok", 10.0, 0.0).validate().is_ok());
        assert!(matches!(
            item("bad", -1.0, 1.0).validate(),
            Err(ConfigError::NegativeMean { .. })
        ));
        assert!(matches!(
            item("bad", 1.0, -1.0).validate(),
            Err(ConfigError::NegativeSpread { .. })
        ));
        assert!(matches!(
            item("bad", f64::NAN, 1.0).validate(),
            Err(ConfigError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_duplicate_item_names_rejected() {
        let items = vec![item("a", 1.0, 0.1), item("b", 1.0, 0.1), item("a", 2.0, 0.1)];
        assert_eq!(
            validate_items(&items),
            Err(ConfigError::DuplicateItemName("a".to_string()))
        );
    }

    #[test]
    fn test_rescaled_compounds_spread_multipliers() {
        let base = item("a", 100.0, 10.0);
        let scaled = base.rescaled(1.2, 1.3);
        assert!((scaled.mean_cost - 120.0).abs() < 1e-9);
        assert!((scaled.spread - 10.0 * 1.2 * 1.3).abs() < 1e-9);
        assert_eq!(base.mean_cost, 100.0);
    }

    #[test]
    fn test_revenue_validation() {
        assert!(RevenueModel::baseline().validate().is_ok());
        assert_eq!(
            RevenueModel::new(-5.0, 1.0).validate(),
            Err(ConfigError::NegativeRevenue(-5.0))
        );
        assert_eq!(
            RevenueModel::new(5.0, -1.0).validate(),
            Err(ConfigError::NegativeRevenueSpread(-1.0))
        );
        assert_eq!(
            RevenueModel::new(5.0, 1.0).with_macro_shock(-0.1).validate(),
            Err(ConfigError::NegativeMacroSpread(-0.1))
        );
    }
}
