use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fundsim_core::payroll::solver::TaxMode;
use fundsim_core::simulation::ceo::{simulate_ceo, CeoSimulationInput};
use fundsim_core::simulation::raise_to_fund::{
    simulate_raise_shift, RaiseToFundInput, RetirementPlan,
};

use crate::input;

/// Arguments for the CEO contribution simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to a JSON/YAML file with the full simulation input
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum PlanArg {
    /// Defined-benefit plan
    Db,
    /// Defined-contribution plan
    Dc,
}

/// Arguments for the wage-to-fund conversion scenario
#[derive(Args)]
pub struct RaiseShiftArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross monthly wage in won
    #[arg(long)]
    pub wage: Option<Decimal>,

    /// Monthly wage amount shifted into the fund
    #[arg(long)]
    pub shift: Option<Decimal>,

    /// Service years to date
    #[arg(long)]
    pub years_served: Option<Decimal>,

    /// Years until retirement
    #[arg(long)]
    pub years_to_retirement: Option<Decimal>,

    /// Retirement plan type
    #[arg(long, value_enum, default_value = "db")]
    pub plan: PlanArg,

    /// Severance pays on final-average wage
    #[arg(long)]
    pub affects_average_wage: bool,

    /// Flat withholding rate instead of the progressive table
    #[arg(long)]
    pub flat_rate: Option<Decimal>,

    /// Preset year
    #[arg(long, default_value = "2025")]
    pub year: u16,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let simulation_input: CeoSimulationInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("provide --input or pipe the simulation input as JSON".into());
    };

    let result = simulate_ceo(&simulation_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_raise_shift(args: RaiseShiftArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raise_input: RaiseToFundInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        RaiseToFundInput {
            year: args.year,
            monthly_wage: args.wage.ok_or("--wage is required (or provide --input)")?,
            shift_monthly: args.shift.ok_or("--shift is required (or provide --input)")?,
            years_served: args.years_served,
            years_to_retirement: args.years_to_retirement,
            hire_date: None,
            retirement_date: None,
            as_of: None,
            plan: match args.plan {
                PlanArg::Db => RetirementPlan::DefinedBenefit,
                PlanArg::Dc => RetirementPlan::DefinedContribution,
            },
            affects_average_wage: args.affects_average_wage,
            tax_mode: match args.flat_rate {
                Some(rate) => TaxMode::Flat(rate),
                None => TaxMode::Progressive,
            },
        }
    };

    let result = simulate_raise_shift(&raise_input)?;
    Ok(serde_json::to_value(result)?)
}
