//! Simulation configuration.

use crate::budget::types::require_finite;
use crate::constants::{
    COST_OVERRUN_RATIO, DEFAULT_ITERATIONS, DEFAULT_SEED, MACRO_FACTOR_CEILING,
    MACRO_FACTOR_FLOOR, QUICK_ITERATIONS, REVENUE_SHORTFALL_RATIO, SCENARIO_ITERATIONS,
};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of simulated fiscal years
    pub iterations: u32,

    /// Seed for the run's single random stream
    pub seed: u64,

    /// Lower clamp for the macro factor
    pub macro_floor: f64,

    /// Upper clamp for the macro factor
    pub macro_ceiling: f64,

    /// Revenue below `expected * ratio` counts as a shortfall
    pub revenue_shortfall_ratio: f64,

    /// Cost above `neutral cost * ratio` counts as an overrun
    pub cost_overrun_ratio: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: DEFAULT_SEED,
            macro_floor: MACRO_FACTOR_FLOOR,
            macro_ceiling: MACRO_FACTOR_CEILING,
            revenue_shortfall_ratio: REVENUE_SHORTFALL_RATIO,
            cost_overrun_ratio: COST_OVERRUN_RATIO,
        }
    }
}

impl SimConfig {
    /// Quick config for smoke checks
    pub fn quick() -> Self {
        Self {
            iterations: QUICK_ITERATIONS,
            ..Default::default()
        }
    }

    /// Per-scenario config used by the standard scenario comparison
    pub fn scenario() -> Self {
        Self {
            iterations: SCENARIO_ITERATIONS,
            ..Default::default()
        }
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_finite("macro floor", self.macro_floor)?;
        require_finite("macro ceiling", self.macro_ceiling)?;
        if self.macro_floor < 0.0 || self.macro_floor > self.macro_ceiling {
            return Err(ConfigError::InvalidMacroBounds {
                floor: self.macro_floor,
                ceiling: self.macro_ceiling,
            });
        }
        for (field, value) in [
            ("revenue shortfall ratio", self.revenue_shortfall_ratio),
            ("cost overrun ratio", self.cost_overrun_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidThreshold { field, value });
            }
        }
        Ok(())
    }
}
