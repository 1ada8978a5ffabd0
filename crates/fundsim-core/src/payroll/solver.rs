use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FundSimError;
use crate::numeric::{floor_to_won, non_negative, round_down_to_10};
use crate::payroll::insurance::{premiums, InsurancePremiums};
use crate::presets::{PresetBundle, LOCAL_SURTAX_RATE};
use crate::tax::bracket::progressive_tax;
use crate::types::{Money, Rate};
use crate::FundSimResult;

const MAX_SOLVER_ITERATIONS: u32 = 60;
/// Search ceiling for small targets; large targets use 5x instead.
const SEARCH_HEADROOM: Decimal = dec!(10000000);
const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How monthly income tax is derived from the wage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TaxMode {
    /// Annualized progressive withholding plus the 10% local surtax.
    Progressive,
    /// Flat rate on the wage net of insurance, plus the local surtax.
    Flat(Rate),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetPayBreakdown {
    pub gross: Money,
    pub insurance: InsurancePremiums,
    pub income_tax: Money,
    pub local_surtax: Money,
    pub net: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrossUpSolution {
    pub gross: Money,
    pub breakdown: NetPayBreakdown,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly net pay for a gross wage: insurance via the year preset, then
/// withholding on the annualized wage net of employee premiums.
pub fn net_pay(
    gross_monthly: Money,
    bundle: &PresetBundle,
    mode: TaxMode,
) -> FundSimResult<NetPayBreakdown> {
    if let TaxMode::Flat(rate) = mode {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(FundSimError::InvalidInput {
                field: "tax_mode".into(),
                reason: format!("flat rate {rate} outside [0, 1]"),
            });
        }
    }

    let gross = floor_to_won(non_negative(gross_monthly));
    let insurance = premiums(gross, &bundle.insurance);
    let taxable_monthly = non_negative(gross - insurance.employee.total);

    let income_tax = match mode {
        TaxMode::Progressive => round_down_to_10(
            progressive_tax(taxable_monthly * MONTHS_PER_YEAR, &bundle.income_tax)
                / MONTHS_PER_YEAR,
        ),
        TaxMode::Flat(rate) => round_down_to_10(taxable_monthly * rate),
    };
    let local_surtax = round_down_to_10(income_tax * LOCAL_SURTAX_RATE);
    let net = gross - insurance.employee.total - income_tax - local_surtax;

    Ok(NetPayBreakdown {
        gross,
        insurance,
        income_tax,
        local_surtax,
        net,
    })
}

/// Smallest gross monthly wage whose net pay reaches `target_net`.
///
/// Net pay rises with gross (premiums and withholding both take less than
/// the whole marginal won), so a bounded binary search inverts it. The
/// iteration cap is mandatory: on exhaustion the caller gets an error, never
/// a stale midpoint.
pub fn solve_gross(
    target_net: Money,
    bundle: &PresetBundle,
    mode: TaxMode,
) -> FundSimResult<GrossUpSolution> {
    let target = floor_to_won(non_negative(target_net));

    let mut lo = target;
    let mut hi = (target * dec!(5)).max(target + SEARCH_HEADROOM);

    // The ceiling must already clear the target for the search to narrow.
    let ceiling = net_pay(hi, bundle, mode)?;
    if ceiling.net < target {
        return Err(FundSimError::ConvergenceFailure {
            function: "solve_gross".into(),
            iterations: 0,
            last_delta: target - ceiling.net,
        });
    }

    let mut iterations = 0;
    while hi - lo > Decimal::ONE {
        if iterations >= MAX_SOLVER_ITERATIONS {
            return Err(FundSimError::ConvergenceFailure {
                function: "solve_gross".into(),
                iterations,
                last_delta: hi - lo,
            });
        }
        let mid = floor_to_won((lo + hi) / dec!(2));
        if net_pay(mid, bundle, mode)?.net >= target {
            hi = mid;
        } else {
            lo = mid + Decimal::ONE;
        }
        iterations += 1;
    }

    // lo may have been reached by exclusion without being probed itself.
    let gross = if net_pay(lo, bundle, mode)?.net >= target {
        lo
    } else {
        hi
    };
    let breakdown = net_pay(gross, bundle, mode)?;

    Ok(GrossUpSolution { gross, breakdown })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
