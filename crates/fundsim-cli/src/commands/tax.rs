use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use fundsim_core::presets::{preset_bundle, LOCAL_SURTAX_RATE};
use fundsim_core::tax::bracket::{effective_rate, marginal_rate, progressive_tax};

#[derive(Debug, Clone, ValueEnum)]
pub enum Schedule {
    /// Personal income tax table
    Income,
    /// Gift/inheritance tax table
    Transfer,
}

/// Arguments for a progressive tax lookup
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TaxArgs {
    /// Taxable base in won
    #[arg(long)]
    pub base: Decimal,

    /// Which progressive schedule to apply
    #[arg(long, value_enum, default_value = "income")]
    pub schedule: Schedule,

    /// Preset year
    #[arg(long, default_value = "2025")]
    pub year: u16,
}

pub fn run_tax(args: TaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bundle = preset_bundle(args.year)?;
    let table = match args.schedule {
        Schedule::Income => &bundle.income_tax,
        Schedule::Transfer => &bundle.transfer_tax,
    };

    let tax = progressive_tax(args.base, table);
    // The 10% local surtax rides on income tax only.
    let local_surtax = match args.schedule {
        Schedule::Income => Some(tax * LOCAL_SURTAX_RATE),
        Schedule::Transfer => None,
    };

    Ok(json!({
        "result": {
            "year": args.year,
            "taxable_base": args.base,
            "tax": tax,
            "local_surtax": local_surtax,
            "marginal_rate": marginal_rate(args.base, table),
            "effective_rate": effective_rate(args.base, table),
        }
    }))
}
