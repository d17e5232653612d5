// Run defaults
pub const DEFAULT_ITERATIONS: u32 = 10_000;
pub const QUICK_ITERATIONS: u32 = 1_000;
pub const SCENARIO_ITERATIONS: u32 = 3_000;
pub const DEFAULT_SEED: u64 = 42;

// Upfront reservation cap for the iteration table; longer runs grow the Vec
pub const MAX_PREALLOCATED_OUTCOMES: u32 = 1 << 20;

// Macro-economic shock: factor ~ N(1.0, spread), clamped to [floor, ceiling]
pub const MACRO_FACTOR_CENTER: f64 = 1.0;
pub const MACRO_FACTOR_FLOOR: f64 = 0.5;
pub const MACRO_FACTOR_CEILING: f64 = 1.5;
pub const DEFAULT_MACRO_SPREAD: f64 = 0.05;

// Below this the neutral-cost baseline (total / factor) is not trusted
pub const DEGENERATE_MACRO_EPSILON: f64 = 1e-9;

// Compound stress: revenue < expected * 0.9 and cost > neutral cost * 1.1
pub const REVENUE_SHORTFALL_RATIO: f64 = 0.9;
pub const COST_OVERRUN_RATIO: f64 = 1.1;

// Baseline revenue model (dollars)
pub const BASELINE_REVENUE: f64 = 5_000_000_000.0;
pub const BASELINE_REVENUE_SPREAD: f64 = 1_500_000_000.0;
