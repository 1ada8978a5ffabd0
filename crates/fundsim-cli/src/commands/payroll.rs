use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use fundsim_core::payroll::insurance::premiums;
use fundsim_core::payroll::solver::{net_pay, solve_gross, TaxMode};
use fundsim_core::presets::preset_bundle;

/// Arguments for a social-insurance premium lookup
#[derive(Args)]
pub struct PremiumsArgs {
    /// Gross monthly wage in won
    #[arg(long)]
    pub wage: Decimal,

    /// Preset year
    #[arg(long, default_value = "2025")]
    pub year: u16,
}

/// Arguments for a forward net-pay breakdown
#[derive(Args)]
pub struct NetPayArgs {
    /// Gross monthly wage in won
    #[arg(long)]
    pub gross: Decimal,

    /// Flat withholding rate instead of the progressive table
    #[arg(long)]
    pub flat_rate: Option<Decimal>,

    /// Preset year
    #[arg(long, default_value = "2025")]
    pub year: u16,
}

/// Arguments for the net-to-gross solver
#[derive(Args)]
pub struct GrossUpArgs {
    /// Target net monthly pay in won
    #[arg(long)]
    pub target_net: Decimal,

    /// Flat withholding rate instead of the progressive table
    #[arg(long)]
    pub flat_rate: Option<Decimal>,

    /// Preset year
    #[arg(long, default_value = "2025")]
    pub year: u16,
}

fn tax_mode(flat_rate: Option<Decimal>) -> TaxMode {
    match flat_rate {
        Some(rate) => TaxMode::Flat(rate),
        None => TaxMode::Progressive,
    }
}

pub fn run_premiums(args: PremiumsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bundle = preset_bundle(args.year)?;
    let result = premiums(args.wage, &bundle.insurance);
    Ok(json!({
        "result": result,
        "year": args.year,
    }))
}

pub fn run_net_pay(args: NetPayArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bundle = preset_bundle(args.year)?;
    let result = net_pay(args.gross, &bundle, tax_mode(args.flat_rate))?;
    Ok(json!({
        "result": result,
        "year": args.year,
    }))
}

pub fn run_gross_up(args: GrossUpArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bundle = preset_bundle(args.year)?;
    let result = solve_gross(args.target_net, &bundle, tax_mode(args.flat_rate))?;
    Ok(json!({
        "result": result,
        "year": args.year,
    }))
}
