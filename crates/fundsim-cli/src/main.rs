mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::payroll::{GrossUpArgs, NetPayArgs, PremiumsArgs};
use commands::risk::RiskArgs;
use commands::simulate::{RaiseShiftArgs, SimulateArgs};
use commands::tax::TaxArgs;
use commands::valuation::ValuationArgs;

/// Welfare-fund contribution simulations
#[derive(Parser)]
#[command(
    name = "fundsim",
    version,
    about = "Welfare-fund contribution simulations with decimal precision",
    long_about = "A CLI for simulating the monetary effect of welfare-fund \
                  contributions: progressive tax, social-insurance premiums, \
                  net-to-gross payroll solving, non-listed share valuation, \
                  succession taxation and balance-sheet risk profiling."
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
    /// Progressive tax for a taxable base (income or gift/inheritance table)
    Tax(TaxArgs),
    /// Social-insurance premiums for a monthly wage
    Premiums(PremiumsArgs),
    /// Net pay breakdown for a gross monthly wage
    NetPay(NetPayArgs),
    /// Solve the gross wage required to reach a target net
    GrossUp(GrossUpArgs),
    /// Supplementary valuation of non-listed shares
    Valuation(ValuationArgs),
    /// Balance-sheet risk profile
    Risk(RiskArgs),
    /// CEO welfare-fund contribution simulation
    Simulate(SimulateArgs),
    /// Wage-to-fund conversion scenario
    RaiseShift(RaiseShiftArgs),
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
        Commands::Tax(args) => commands::tax::run_tax(args),
        Commands::Premiums(args) => commands::payroll::run_premiums(args),
        Commands::NetPay(args) => commands::payroll::run_net_pay(args),
        Commands::GrossUp(args) => commands::payroll::run_gross_up(args),
        Commands::Valuation(args) => commands::valuation::run_valuation(args),
        Commands::Risk(args) => commands::risk::run_risk(args),
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::RaiseShift(args) => commands::simulate::run_raise_shift(args),
        Commands::Version => {
            println!("fundsim {}", env!("CARGO_PKG_VERSION"));
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
