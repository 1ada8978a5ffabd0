use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FundSimError;
use crate::numeric::non_negative;
use crate::payroll::solver::{net_pay, TaxMode};
use crate::presets::preset_bundle;
use crate::types::{with_metadata, ComputationOutput, Money, Years};
use crate::FundSimResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const DAYS_PER_YEAR: Decimal = dec!(365.25);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetirementPlan {
    DefinedBenefit,
    DefinedContribution,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaiseToFundInput {
    pub year: u16,
    pub monthly_wage: Money,
    /// Wage shifted into fund contributions each month.
    pub shift_monthly: Money,
    /// Explicit service years win over the date pair below.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_served: Option<Years>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_to_retirement: Option<Years>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retirement_date: Option<NaiveDate>,
    /// Valuation date for the date pair; never defaulted to a wall clock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    pub plan: RetirementPlan,
    /// Severance is exposed only when the plan pays on final-average wage.
    pub affects_average_wage: bool,
    pub tax_mode: TaxMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaiseToFundOutput {
    pub monthly_insurance_saving: Money,
    pub monthly_income_tax_saving: Money,
    pub annual_insurance_saving: Money,
    pub annual_income_tax_saving: Money,
    pub annual_saving_total: Money,
    pub severance_loss: Money,
    pub net_benefit_to_retirement: Money,
    /// Years of savings needed to recover the severance loss; `None` when
    /// there are no savings to recover it with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_even_years: Option<Years>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Trade a monthly wage-to-fund shift against its severance consequences.
///
/// The employee keeps the insurance and withholding no longer charged on the
/// shifted wage; a defined-benefit plan priced on final-average wage loses
/// severance in return.
pub fn simulate_raise_shift(
    input: &RaiseToFundInput,
) -> FundSimResult<ComputationOutput<RaiseToFundOutput>> {
    let start = Instant::now();
    let bundle = preset_bundle(input.year)?;
    let mut warnings: Vec<String> = Vec::new();

    let wage = non_negative(input.monthly_wage);
    let mut shift = non_negative(input.shift_monthly);
    if shift > wage {
        shift = wage;
        warnings.push("shift_monthly exceeds the wage; clamped to the full wage".into());
    }

    let current = net_pay(wage, &bundle, input.tax_mode)?;
    let shifted = net_pay(wage - shift, &bundle, input.tax_mode)?;

    let monthly_insurance_saving =
        current.insurance.employee.total - shifted.insurance.employee.total;
    let monthly_income_tax_saving = (current.income_tax + current.local_surtax)
        - (shifted.income_tax + shifted.local_surtax);
    let annual_insurance_saving = monthly_insurance_saving * MONTHS_PER_YEAR;
    let annual_income_tax_saving = monthly_income_tax_saving * MONTHS_PER_YEAR;
    let annual_saving_total = annual_insurance_saving + annual_income_tax_saving;

    let years_served = resolve_years(
        input.years_served,
        input.hire_date,
        input.as_of,
        "years_served",
    )?;
    let years_to_retirement = resolve_years(
        input.years_to_retirement,
        input.as_of,
        input.retirement_date,
        "years_to_retirement",
    )?;

    let severance_exposed = matches!(input.plan, RetirementPlan::DefinedBenefit)
        && input.affects_average_wage;
    let severance_loss = if severance_exposed {
        shift * (years_served + years_to_retirement)
    } else {
        Decimal::ZERO
    };

    let net_benefit_to_retirement = annual_saving_total * years_to_retirement - severance_loss;
    let break_even_years = if annual_saving_total > Decimal::ZERO {
        Some(severance_loss / annual_saving_total)
    } else {
        if severance_loss > Decimal::ZERO {
            warnings.push("no annual savings; the severance loss is never recovered".into());
        }
        None
    };

    let output = RaiseToFundOutput {
        monthly_insurance_saving,
        monthly_income_tax_saving,
        annual_insurance_saving,
        annual_income_tax_saving,
        annual_saving_total,
        severance_loss,
        net_benefit_to_retirement,
        break_even_years,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Raise-to-Fund Conversion Scenario",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Explicit years win; otherwise the span between the two dates.
fn resolve_years(
    explicit: Option<Years>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    field: &str,
) -> FundSimResult<Years> {
    if let Some(years) = explicit {
        return Ok(non_negative(years));
    }
    match (from, to) {
        (Some(from), Some(to)) => {
            let days = (to - from).num_days().max(0);
            Ok(Decimal::from(days) / DAYS_PER_YEAR)
        }
        _ => Err(FundSimError::InvalidInput {
            field: field.to_string(),
            reason: "provide the year count or both dates bounding it".to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
