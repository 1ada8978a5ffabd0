use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use fundsim_core::presets::{preset_bundle, ValuationPolicy, WeightScheme};
use fundsim_core::valuation::supplementary::{calculate_valuation, ValuationInput};

use crate::input;

#[derive(Debug, Clone, ValueEnum)]
pub enum SchemeArg {
    /// Preset NAV/earnings weights with the real-estate nudge
    Preset,
    /// Statutory 3:2 blend, swapped when real-estate-heavy
    Statutory,
}

/// Arguments for a supplementary share valuation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ValuationArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Total issued shares
    #[arg(long)]
    pub issued_shares: Option<Decimal>,

    /// Corporate net asset in won
    #[arg(long)]
    pub net_asset: Option<Decimal>,

    /// EPS of the most recent year
    #[arg(long)]
    pub eps1: Option<Decimal>,

    /// EPS one year back
    #[arg(long)]
    pub eps2: Option<Decimal>,

    /// EPS two years back
    #[arg(long)]
    pub eps3: Option<Decimal>,

    /// Treat the firm as real-estate-heavy
    #[arg(long)]
    pub real_estate_heavy: bool,

    /// Shares being transferred (defaults to a single share)
    #[arg(long)]
    pub shares_transferred: Option<Decimal>,

    /// Weighting scheme (defaults to the year preset's policy)
    #[arg(long, value_enum)]
    pub scheme: Option<SchemeArg>,

    /// NAV floor fraction, e.g. 0.8
    #[arg(long)]
    pub nav_floor: Option<Decimal>,

    /// Preset year
    #[arg(long, default_value = "2025")]
    pub year: u16,
}

pub fn run_valuation(args: ValuationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bundle = preset_bundle(args.year)?;

    let valuation_input: ValuationInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let policy = match (&args.scheme, args.nav_floor) {
            (None, None) => None,
            (scheme, nav_floor) => Some(ValuationPolicy {
                scheme: match scheme {
                    Some(SchemeArg::Statutory) => WeightScheme::StatutoryBlend,
                    _ => WeightScheme::PresetWeights,
                },
                nav_floor,
            }),
        };
        ValuationInput {
            issued_shares: args
                .issued_shares
                .ok_or("--issued-shares is required (or provide --input)")?,
            net_asset: args
                .net_asset
                .ok_or("--net-asset is required (or provide --input)")?,
            eps: [
                args.eps1.ok_or("--eps1 is required (or provide --input)")?,
                args.eps2.ok_or("--eps2 is required (or provide --input)")?,
                args.eps3.ok_or("--eps3 is required (or provide --input)")?,
            ],
            real_estate_heavy: args.real_estate_heavy,
            shares_transferred: args.shares_transferred.unwrap_or(dec!(1)),
            policy,
        }
    };

    let result = calculate_valuation(&valuation_input, &bundle.valuation)?;
    Ok(serde_json::to_value(result)?)
}
