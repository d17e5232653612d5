//! Fiscal feasibility simulator CLI.
//!
//! Runs the Monte Carlo engine over a budget plan and prints a report.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # Built-in city program, 10,000 years
//!   cargo run --bin simulate -- -n 1000 --seed 7     # Shorter run, different seed
//!   cargo run --bin simulate -- --plan plan.json     # Budget from a plan file
//!   cargo run --bin simulate -- --scenarios --csv out.csv

use clap::Parser;
use fiscal_sim::build_info::version_line;
use fiscal_sim::export::write_csv;
use fiscal_sim::{
    run_batch, run_scenarios, FiscalPlan, ScenarioReport, ScenarioSpec, SimReport, SimResult,
};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Monte Carlo fiscal-feasibility simulator", long_about = None)]
struct Cli {
    /// JSON plan file (default: built-in city program)
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Number of simulated fiscal years
    #[arg(short = 'n', long)]
    iterations: Option<u32>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Expected revenue in dollars
    #[arg(long)]
    revenue: Option<f64>,

    /// Revenue standard deviation in dollars
    #[arg(long)]
    revenue_std: Option<f64>,

    /// Disable the shared macro-economic shock
    #[arg(long)]
    no_macro: bool,

    /// Macro factor standard deviation (enables the shock)
    #[arg(long, conflicts_with = "no_macro")]
    macro_std: Option<f64>,

    /// Also run the plan's scenarios (standard set if the plan has none)
    #[arg(long)]
    scenarios: bool,

    /// Write a JSON report (timestamped file name if no path given)
    #[arg(long)]
    json: Option<Option<PathBuf>>,

    /// Write the iteration table as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    version: String,
    report: &'a SimReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenarios: Option<&'a ScenarioReport>,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Load the plan and fold command-line overrides into it.
fn build_plan(cli: &Cli) -> SimResult<FiscalPlan> {
    let mut plan = match &cli.plan {
        Some(path) => FiscalPlan::load(path)?,
        None => FiscalPlan::city_default(),
    };

    if let Some(n) = cli.iterations {
        plan.config.iterations = n;
    }
    if let Some(seed) = cli.seed {
        plan.config.seed = seed;
    }
    if let Some(expected) = cli.revenue {
        plan.revenue.expected = expected;
    }
    if let Some(spread) = cli.revenue_std {
        plan.revenue.spread = spread;
    }
    if cli.no_macro {
        plan.revenue.macro_shock = false;
    }
    if let Some(spread) = cli.macro_std {
        plan.revenue = plan.revenue.with_macro_shock(spread);
    }
    if cli.scenarios && plan.scenarios.is_empty() {
        plan.scenarios = ScenarioSpec::standard_set();
    }

    plan.validate()?;
    Ok(plan)
}

fn run(cli: &Cli) -> SimResult<()> {
    let plan = build_plan(cli)?;

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              FISCAL FEASIBILITY SIMULATOR                     ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!("{}", version_line());
    println!();
    println!("Configuration:");
    println!("  Budget Items:   {}", plan.items.len());
    println!("  Iterations:     {}", plan.config.iterations);
    println!("  Seed:           {}", plan.config.seed);
    println!("  Revenue:        ${:.2}B", plan.revenue.expected / 1e9);
    if plan.revenue.macro_shock {
        println!("  Macro Shock:    on (std {})", plan.revenue.macro_spread);
    } else {
        println!("  Macro Shock:    off");
    }
    println!();

    let result = run_batch(&plan.items, &plan.revenue, &plan.config)?;
    let report = SimReport::from_result(&result);
    println!("{}", report.to_text());

    let scenario_report = if cli.scenarios {
        let scenarios = run_scenarios(&plan.items, &plan.revenue, &plan.config, &plan.scenarios)?;
        println!("{}", scenarios.to_text());
        Some(scenarios)
    } else {
        None
    };

    if let Some(path) = &cli.csv {
        write_csv(&result, BufWriter::new(File::create(path)?))?;
        info!(path = %path.display(), "wrote iteration table");
        println!("CSV saved to: {}", path.display());
    }

    if let Some(target) = &cli.json {
        let path = target.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "fiscal_report_{}.json",
                chrono::Utc::now().format("%Y%m%d_%H%M%S")
            ))
        });
        let output = JsonOutput {
            version: version_line(),
            report: &report,
            scenarios: scenario_report.as_ref(),
        };
        std::fs::write(&path, serde_json::to_string_pretty(&output)?)?;
        println!("JSON report saved to: {}", path.display());
    }

    Ok(())
}
