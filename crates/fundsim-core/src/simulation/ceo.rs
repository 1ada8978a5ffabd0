use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::numeric::{at_least_one, clamp, non_negative, round_down_to_10};
use crate::presets::{preset_bundle, PresetBundle, ValuationPolicy, LOCAL_SURTAX_RATE};
use crate::risk::profile::{assess_risk, BalanceSheetRatios, RiskLevel, RiskProfile};
use crate::tax::bracket::progressive_tax;
use crate::tax::succession::special_tax;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::valuation::supplementary::{valuate_shares, ValuationInput, ValuationResult};
use crate::FundSimResult;

// Share of the gross benefit set aside against the diagnosed risk level.
const RISK_BUFFER_HIGH: Rate = dec!(0.15);
const RISK_BUFFER_MEDIUM: Rate = dec!(0.08);
const RISK_BUFFER_LOW: Rate = dec!(0.03);

/// Real-estate share of net assets at which the valuation tilts toward NAV.
const REAL_ESTATE_HEAVY_THRESHOLD: Decimal = dec!(0.5);

const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Who funds the welfare-fund contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributingActor {
    Corporation,
    Owner,
    ThirdParty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionAsset {
    Cash,
    TreasuryShares,
    RealEstate,
}

/// How the target shares change hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuccessionMode {
    Gift,
    Inheritance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CeoSimulationInput {
    pub year: u16,
    pub issued_shares: Decimal,
    pub net_asset: Money,
    /// Per-share earnings for the last three years, most recent first.
    pub eps: [Money; 3],
    pub retained_earnings: Money,
    pub officer_loans: Money,
    pub nominee_shares_value: Money,
    pub treasury_shares_value: Money,
    pub real_estate_book_value: Money,
    pub real_estate_market_value: Money,
    pub succession_mode: SuccessionMode,
    pub succession_shares: Decimal,
    pub family_business_relief: bool,
    /// Overrides the preset relief deduction when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relief_cap: Option<Money>,
    /// Owner's annual personal tax base before any contribution deduction.
    pub owner_tax_base: Money,
    pub contribution_actor: ContributingActor,
    pub contribution_asset: ContributionAsset,
    pub contribution: Money,
    pub corp_effective_tax_rate: Rate,
    /// Share of the contribution deductible on the owner's return.
    pub deductibility_rate: Rate,
    /// Discount for staged or non-cash pay-out modes.
    pub pay_mode_factor: Rate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valuation_policy: Option<ValuationPolicy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeoSimulationOutput {
    pub valuation_before: ValuationResult,
    pub valuation_after: ValuationResult,
    pub corp_tax_saving_annual: Money,
    pub owner_income_tax_saving_annual: Money,
    pub owner_income_tax_saving_monthly: Money,
    pub succession_tax_before: Money,
    pub succession_tax_after: Money,
    pub succession_tax_saving: Money,
    pub gross_benefit_annual: Money,
    pub risk_buffer_annual: Money,
    pub total_benefit_annual: Money,
    pub risk_profile: RiskProfile,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simulate the monetary effect of a welfare-fund contribution around a
/// business succession.
///
/// One stateless call: the same sanitized input feeds the before/after
/// valuations, the three tax computations and the risk profile, so the
/// figures stay mutually consistent. Nothing is cached or mutated between
/// steps.
pub fn simulate_ceo(
    input: &CeoSimulationInput,
) -> FundSimResult<ComputationOutput<CeoSimulationOutput>> {
    let start = Instant::now();
    let bundle = preset_bundle(input.year)?;
    let (input, mut warnings) = sanitize(input.clone());

    let real_estate = input
        .real_estate_market_value
        .max(input.real_estate_book_value);
    let real_estate_heavy =
        real_estate / at_least_one(input.net_asset) >= REAL_ESTATE_HEAVY_THRESHOLD;

    let before_input = ValuationInput {
        issued_shares: input.issued_shares,
        net_asset: input.net_asset,
        eps: input.eps,
        real_estate_heavy,
        shares_transferred: input.succession_shares,
        policy: input.valuation_policy,
    };
    let valuation_before = valuate_shares(&before_input, &bundle.valuation);

    // Only the corporation's own contribution moves the corporate books; an
    // owner or third-party gift leaves net assets and EPS untouched.
    let corporate_contribution =
        matches!(input.contribution_actor, ContributingActor::Corporation);
    let after_input = if corporate_contribution && input.contribution > Decimal::ZERO {
        if input.contribution > input.net_asset {
            warnings
                .push("contribution exceeds net assets; post-contribution value floors at zero".into());
        }
        let per_share_hit = input.contribution / at_least_one(input.issued_shares);
        ValuationInput {
            net_asset: non_negative(input.net_asset - input.contribution),
            eps: [
                input.eps[0] - per_share_hit,
                input.eps[1] - per_share_hit,
                input.eps[2] - per_share_hit,
            ],
            ..before_input.clone()
        }
    } else {
        if input.contribution > Decimal::ZERO {
            warnings.push(
                "contributing actor is not the corporation; corporate net assets and EPS are unchanged"
                    .into(),
            );
        }
        before_input.clone()
    };
    let valuation_after = valuate_shares(&after_input, &bundle.valuation);

    if input.contribution > Decimal::ZERO
        && !matches!(input.contribution_asset, ContributionAsset::Cash)
    {
        warnings.push("in-kind contribution valued at its stated amount".into());
    }

    // A corporate deductible expense; no corporate saving on anyone else's gift.
    let corp_tax_saving_annual = if corporate_contribution {
        input.contribution * input.corp_effective_tax_rate
    } else {
        Decimal::ZERO
    };

    let deductible = input.contribution * input.deductibility_rate * input.pay_mode_factor;
    let reduced_base = non_negative(input.owner_tax_base - deductible);
    let tax_delta = progressive_tax(input.owner_tax_base, &bundle.income_tax)
        - progressive_tax(reduced_base, &bundle.income_tax);
    let owner_income_tax_saving_annual = tax_delta * (Decimal::ONE + LOCAL_SURTAX_RATE);
    let owner_income_tax_saving_monthly =
        round_down_to_10(owner_income_tax_saving_annual / MONTHS_PER_YEAR);

    let succession_tax_before = succession_tax(
        valuation_before.per_share_final * input.succession_shares,
        &input,
        &bundle,
    );
    let succession_tax_after = succession_tax(
        valuation_after.per_share_final * input.succession_shares,
        &input,
        &bundle,
    );
    let succession_tax_saving = succession_tax_before - succession_tax_after;

    let ratios = BalanceSheetRatios::from_balances(
        input.net_asset,
        input.retained_earnings,
        input.officer_loans,
        input.nominee_shares_value,
        real_estate,
    );
    let risk_profile = assess_risk(&ratios);

    let gross_benefit_annual =
        corp_tax_saving_annual + owner_income_tax_saving_annual + succession_tax_saving;
    let buffer_rate = match risk_profile.level {
        RiskLevel::High => RISK_BUFFER_HIGH,
        RiskLevel::Medium => RISK_BUFFER_MEDIUM,
        RiskLevel::Low => RISK_BUFFER_LOW,
    };
    let risk_buffer_annual = gross_benefit_annual * buffer_rate;
    let total_benefit_annual = gross_benefit_annual - risk_buffer_annual;

    let output = CeoSimulationOutput {
        valuation_before,
        valuation_after,
        corp_tax_saving_annual,
        owner_income_tax_saving_annual,
        owner_income_tax_saving_monthly,
        succession_tax_before,
        succession_tax_after,
        succession_tax_saving,
        gross_benefit_annual,
        risk_buffer_annual,
        total_benefit_annual,
        risk_profile,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "CEO Welfare-Fund Contribution Simulation",
        &input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Transfer tax on the succession stake: the two-tier preferential schedule
/// when relief is elected, otherwise the ordinary progressive schedule after
/// the mode's basic deduction.
fn succession_tax(share_value: Money, input: &CeoSimulationInput, bundle: &PresetBundle) -> Money {
    let value = non_negative(share_value);
    let s = &bundle.succession;
    if input.family_business_relief {
        let deduction = input.relief_cap.unwrap_or(s.relief_deduction);
        special_tax(value, deduction, s.tier_threshold, s.tier1_rate, s.tier2_rate)
    } else {
        let basic_deduction = match input.succession_mode {
            SuccessionMode::Gift => s.gift_basic_deduction,
            SuccessionMode::Inheritance => s.inheritance_basic_deduction,
        };
        progressive_tax(non_negative(value - basic_deduction), &bundle.transfer_tax)
    }
}

/// Clamp the input into its documented domain, reporting every correction.
fn sanitize(mut input: CeoSimulationInput) -> (CeoSimulationInput, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut clamped: Vec<&str> = Vec::new();

    {
        let mut money = |value: &mut Money, name: &'static str| {
            if *value < Decimal::ZERO {
                *value = Decimal::ZERO;
                clamped.push(name);
            }
        };
        money(&mut input.net_asset, "net_asset");
        money(&mut input.retained_earnings, "retained_earnings");
        money(&mut input.officer_loans, "officer_loans");
        money(&mut input.nominee_shares_value, "nominee_shares_value");
        money(&mut input.treasury_shares_value, "treasury_shares_value");
        money(&mut input.real_estate_book_value, "real_estate_book_value");
        money(&mut input.real_estate_market_value, "real_estate_market_value");
        money(&mut input.owner_tax_base, "owner_tax_base");
        money(&mut input.contribution, "contribution");
    }
    if !clamped.is_empty() {
        warnings.push(format!(
            "negative monetary inputs clamped to zero: {}",
            clamped.join(", ")
        ));
    }

    if input.issued_shares < Decimal::ONE {
        input.issued_shares = Decimal::ONE;
        warnings.push("issued_shares below 1; clamped to 1 as denominator".into());
    }
    input.succession_shares = non_negative(input.succession_shares);

    let mut rate = |value: &mut Rate, name: &'static str| {
        if *value < Decimal::ZERO || *value > Decimal::ONE {
            *value = clamp(*value, Decimal::ZERO, Decimal::ONE);
            warnings.push(format!("{name} clamped into [0, 1]"));
        }
    };
    rate(&mut input.corp_effective_tax_rate, "corp_effective_tax_rate");
    rate(&mut input.deductibility_rate, "deductibility_rate");
    rate(&mut input.pay_mode_factor, "pay_mode_factor");

    (input, warnings)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
