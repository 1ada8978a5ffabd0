use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fundsim_core::risk::profile::{calculate_risk, BalanceSheetRatios};

/// Arguments for a balance-sheet risk profile
#[derive(Args)]
pub struct RiskArgs {
    /// Corporate net asset in won (ratio denominator)
    #[arg(long)]
    pub net_asset: Decimal,

    /// Retained earnings balance
    #[arg(long, default_value = "0")]
    pub retained_earnings: Decimal,

    /// Officer loan balance
    #[arg(long, default_value = "0")]
    pub officer_loans: Decimal,

    /// Estimated nominee-held share value
    #[arg(long, default_value = "0")]
    pub nominee_shares: Decimal,

    /// Real-estate holdings at the higher of book or market
    #[arg(long, default_value = "0")]
    pub real_estate: Decimal,
}

pub fn run_risk(args: RiskArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ratios = BalanceSheetRatios::from_balances(
        args.net_asset,
        args.retained_earnings,
        args.officer_loans,
        args.nominee_shares,
        args.real_estate,
    );
    let result = calculate_risk(&ratios)?;
    Ok(serde_json::to_value(result)?)
}
