//! # ghg CLI entry point
//!
//! Parses command-line arguments, initializes logging, and dispatches to
//! subcommand handlers. Results go to stdout, logs to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ghg_cli::calculate::{
    run_calc, run_electricity, run_spend, run_travel, CalcArgs, ElectricityArgs, SpendArgs,
    TravelArgs,
};
use ghg_cli::context::CliContext;
use ghg_cli::factors::{run_factors, FactorsArgs};
use ghg_cli::inventory::{run_inventory, InventoryArgs};
use ghg_cli::{ENGINE_CONFIG_ENV, EXIT_OPERATIONAL, FACTOR_PACK_ENV};

/// GHG emission calculator
///
/// Calculates CO2e emissions from activity data using published emission
/// factors (DEFRA 2024, EPA, EEIO by default), classified by GHG Protocol
/// scope.
#[derive(Parser, Debug)]
#[command(name = "ghg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Factor pack to use instead of the built-in factor set.
    #[arg(long, global = true, env = FACTOR_PACK_ENV)]
    factors: Option<PathBuf>,

    /// Engine configuration file (YAML or JSON).
    #[arg(long, global = true, env = ENGINE_CONFIG_ENV)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate emissions for one activity.
    Calc(CalcArgs),

    /// Electricity consumption with an optional renewable share.
    Electricity(ElectricityArgs),

    /// Business travel by distance.
    Travel(TravelArgs),

    /// Spend-based Scope 3 emissions.
    Spend(SpendArgs),

    /// Factor catalog, look-up, export and validation.
    Factors(FactorsArgs),

    /// Compile a yearly inventory from a records file.
    Inventory(InventoryArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "ghg CLI starting");

    let ctx = CliContext::new(cli.factors, cli.config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Commands::Calc(args) => run_calc(&args, &ctx, &mut out),
        Commands::Electricity(args) => run_electricity(&args, &ctx, &mut out),
        Commands::Travel(args) => run_travel(&args, &ctx, &mut out),
        Commands::Spend(args) => run_spend(&args, &ctx, &mut out),
        Commands::Factors(args) => run_factors(&args, &ctx, &mut out),
        Commands::Inventory(args) => run_inventory(&args, &ctx, &mut out),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_OPERATIONAL)
        }
    }
}

/// `RUST_LOG` wins over the `-v` count when set.
fn init_tracing(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
