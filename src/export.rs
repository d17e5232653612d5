//! CSV export of the iteration table.

use crate::simulator::SimulationResult;
use std::io::{self, Write};

pub const CSV_HEADER: &str = "iteration,total_cost,operating_cost,capital_cost,revenue,surplus,affordable,macro_factor,compound_stress";

/// Write one header row and one row per iteration, in iteration order.
pub fn write_csv<W: Write>(result: &SimulationResult, mut out: W) -> io::Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for o in &result.outcomes {
        writeln!(
            out,
            "{},{:.2},{:.2},{:.2},{:.2},{:.2},{},{:.6},{}",
            o.iteration,
            o.total_cost,
            o.operating_cost,
            o.capital_cost,
            o.revenue,
            o.surplus,
            o.affordable,
            o.macro_factor,
            o.compound_stress,
        )?;
    }
    out.flush()
}
