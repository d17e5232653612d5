//! Fiscal plan files: items, revenue model, run settings and scenarios as JSON.
//!
//! ```json
//! {
//!   "items": [
//!     { "name": "Free City Buses", "category": "transport",
//!       "mean_cost": 750000000, "distribution": "normal", "spread": 50000000 }
//!   ],
//!   "revenue": { "expected": 5000000000, "spread": 1500000000, "macro_shock": true },
//!   "config": { "iterations": 10000, "seed": 42 },
//!   "scenarios": []
//! }
//! ```

use crate::budget::{city_program, validate_items, BudgetItem, RevenueModel};
use crate::error::{ConfigError, SimResult};
use crate::simulator::{ScenarioSpec, SimConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A budget plan read from or written to JSON.
///
/// Deserialization goes through [`FiscalPlan::from_json`] so that an unknown
/// distribution kind is reported as a configuration error rather than a
/// JSON error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiscalPlan {
    pub items: Vec<BudgetItem>,
    pub revenue: RevenueModel,
    #[serde(default)]
    pub config: SimConfig,
    #[serde(default)]
    pub scenarios: Vec<ScenarioSpec>,
}

impl FiscalPlan {
    /// The built-in city program with the baseline revenue model and the
    /// standard scenario set.
    pub fn city_default() -> Self {
        Self {
            items: city_program(),
            revenue: RevenueModel::baseline(),
            config: SimConfig::default(),
            scenarios: ScenarioSpec::standard_set(),
        }
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        let file: PlanFile = serde_json::from_str(json)?;
        let items = file
            .items
            .into_iter()
            .map(PlanItem::into_item)
            .collect::<Result<Vec<_>, _>>()?;
        let plan = FiscalPlan {
            items,
            revenue: file.revenue,
            config: file.config,
            scenarios: file.scenarios,
        };
        plan.validate()?;
        Ok(plan)
    }

    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading fiscal plan");
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_items(&self.items)?;
        self.revenue.validate()?;
        self.config.validate()?;
        for spec in &self.scenarios {
            spec.validate()?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for FiscalPlan {
    fn default() -> Self {
        Self::city_default()
    }
}

/// On-disk shape of a plan; item kinds stay raw text until validated.
#[derive(Deserialize)]
struct PlanFile {
    items: Vec<PlanItem>,
    revenue: RevenueModel,
    #[serde(default)]
    config: SimConfig,
    #[serde(default)]
    scenarios: Vec<ScenarioSpec>,
}

#[derive(Deserialize)]
struct PlanItem {
    name: String,
    category: String,
    mean_cost: f64,
    distribution: String,
    spread: f64,
    #[serde(default)]
    is_capital: bool,
}

impl PlanItem {
    fn into_item(self) -> Result<BudgetItem, ConfigError> {
        BudgetItem::with_kind(
            self.name,
            self.category,
            self.mean_cost,
            &self.distribution,
            self.spread,
            self.is_capital,
        )
    }
}
