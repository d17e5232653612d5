//! Fiscal Sim - Monte Carlo fiscal-feasibility simulator
//!
//! Estimates the probability that an uncertain revenue stream covers a bundle
//! of budget items whose individual costs are uncertain, optionally under a
//! shared macro-economic shock.

pub mod budget;
pub mod build_info;
pub mod constants;
pub mod error;
pub mod export;
pub mod plan;
pub mod simulator;

pub use budget::{BudgetItem, DistributionKind, RevenueModel};
pub use error::{ConfigError, SimError, SimResult};
pub use plan::FiscalPlan;
pub use simulator::{
    run_batch, run_scenarios, IterationOutcome, ScenarioReport, ScenarioSpec, SimConfig,
    SimReport, SimulationResult,
};
