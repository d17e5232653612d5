//! Monte Carlo fiscal-feasibility simulator.
//!
//! Estimates how often an uncertain revenue stream covers a bundle of budget
//! items with uncertain costs:
//! - `sampler` draws one item's annual cost
//! - `iteration` draws one complete fiscal year and classifies it
//! - `runner` repeats that under one seeded stream into a result table
//! - `scenario` re-parameterizes the budget per named scenario
//!
//! Every run owns its random stream; identical inputs and seed reproduce the
//! same table.

mod config;
mod iteration;
mod report;
mod runner;
mod sampler;
mod scenario;

pub use config::SimConfig;
pub use iteration::{is_compound_stress, run_iteration, IterationOutcome};
pub use report::{percentile, SimReport};
pub use runner::{run_batch, SimulationResult};
pub use sampler::{lognormal_params, sample_cost};
pub use scenario::{run_scenarios, ScenarioReport, ScenarioSpec, ScenarioSummary};
