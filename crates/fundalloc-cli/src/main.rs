mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::plan::PlanArgs;
use commands::projection::ProjectionArgs;
use commands::rebalance::{CurrentAllocationArgs, DriftCheckArgs, TradesArgs};

/// Personal mutual-fund allocation planning
#[derive(Parser)]
#[command(
    name = "fundalloc",
    version,
    about = "Personal mutual-fund allocation planning and rebalancing",
    long_about = "Derives a personalized equity/debt allocation plan from an investor \
                  profile and named strategy presets, converts it into SIP and lumpsum \
                  amounts, and checks an existing portfolio for drift against a target, \
                  proposing the buy/sell trades that restore it. All arithmetic is \
                  decimal-precise."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an allocation plan from an investor profile
    Plan(PlanArgs),
    /// Percentage view of a portfolio's current values
    CurrentAllocation(CurrentAllocationArgs),
    /// Check current percentages against a target for drift
    DriftCheck(DriftCheckArgs),
    /// Buy/sell amounts that restore a portfolio to its target weights
    RebalanceTrades(TradesArgs),
    /// Project the retirement corpus of a monthly SIP
    Projection(ProjectionArgs),
    /// List the registered equity and debt strategies
    Strategies,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Plan(args) => commands::plan::run_plan(args),
        Commands::CurrentAllocation(args) => commands::rebalance::run_current_allocation(args),
        Commands::DriftCheck(args) => commands::rebalance::run_drift_check(args),
        Commands::RebalanceTrades(args) => commands::rebalance::run_trades(args),
        Commands::Projection(args) => commands::projection::run_projection(args),
        Commands::Strategies => commands::strategies::run_strategies(),
        Commands::Version => {
            println!("fundalloc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
