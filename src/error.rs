//! Error types for the fiscal simulator.

use thiserror::Error;

/// A budget item, revenue model, scenario or run configuration that violates
/// one of its invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Distribution kind other than `normal` or `lognormal`
    #[error("unsupported distribution kind: {0:?}")]
    UnsupportedDistribution(String),

    #[error("budget item {item:?} has negative mean cost {value}")]
    NegativeMean { item: String, value: f64 },

    #[error("budget item {item:?} has negative spread {value}")]
    NegativeSpread { item: String, value: f64 },

    /// NaN or infinite input where a finite real is required
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: String, value: f64 },

    #[error("expected revenue must be non-negative, got {0}")]
    NegativeRevenue(f64),

    #[error("revenue spread must be non-negative, got {0}")]
    NegativeRevenueSpread(f64),

    #[error("macro-shock spread must be non-negative, got {0}")]
    NegativeMacroSpread(f64),

    #[error("duplicate budget item name: {0:?}")]
    DuplicateItemName(String),

    #[error("duplicate scenario name: {0:?}")]
    DuplicateScenarioName(String),

    #[error("scenario {scenario:?} has invalid {field} {value}")]
    InvalidMultiplier {
        scenario: String,
        field: &'static str,
        value: f64,
    },

    #[error("macro factor bounds are invalid: floor {floor}, ceiling {ceiling}")]
    InvalidMacroBounds { floor: f64, ceiling: f64 },

    #[error("{field} must be a positive finite ratio, got {value}")]
    InvalidThreshold { field: &'static str, value: f64 },
}

/// Errors surfaced by the simulator and its configuration loader.
#[derive(Error, Debug)]
pub enum SimError {
    /// Invalid input configuration; fatal to the run that hit it
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// Plan file could not be read or an export could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Plan JSON could not be parsed or a report could not be serialized
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SimError {
    /// The underlying configuration error, if this is one.
    pub fn config_error(&self) -> Option<&ConfigError> {
        match self {
            SimError::InvalidConfiguration(err) => Some(err),
            _ => None,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
