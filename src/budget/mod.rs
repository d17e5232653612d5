//! Budget model: line items, their cost distributions, and the revenue model.

pub mod presets;
pub mod types;

pub use presets::city_program;
pub use types::*;
