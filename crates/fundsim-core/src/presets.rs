use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FundSimError;
use crate::tax::bracket::TaxBracket;
use crate::types::{Money, Multiple, Rate};
use crate::FundSimResult;

/// Local income tax rides on the national income tax amount at a flat 10%.
pub const LOCAL_SURTAX_RATE: Rate = dec!(0.10);

// ---------------------------------------------------------------------------
// Preset types
// ---------------------------------------------------------------------------

/// Social-insurance rates and caps for one year.
///
/// Health and long-term-care caps apply to the premium itself; the pension
/// cap applies to the contribution base. All rates are the employee share
/// unless named otherwise (the employer mirrors health, care and pension).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsurancePreset {
    pub year: u16,
    pub health_rate: Rate,
    pub health_premium_min: Money,
    pub health_premium_max: Money,
    /// Applied to the health premium, not the wage.
    pub long_term_care_rate: Rate,
    pub pension_rate: Rate,
    pub pension_base_min: Money,
    pub pension_base_max: Money,
    pub employment_rate_employee: Rate,
    pub employment_rate_employer: Rate,
    /// Employer-only, industry-average rate.
    pub occupational_accident_rate: Rate,
}

/// Which blending rule turns NAV and earnings value into the final figure.
///
/// Two formulas coexist in practice; neither is silently picked, the caller
/// selects one by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightScheme {
    /// Preset NAV/earnings weights; real-estate-heavy firms get the NAV
    /// weight nudged up, capped by the preset.
    PresetWeights,
    /// Statutory 3:2 earnings-to-NAV blend, swapped to 2:3 when
    /// real-estate-heavy.
    StatutoryBlend,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationPolicy {
    pub scheme: WeightScheme,
    /// Floors the blended value at this fraction of per-share NAV when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_floor: Option<Rate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationPreset {
    pub year: u16,
    pub nav_weight: Rate,
    pub earnings_weight: Rate,
    /// Converts weighted EPS into a capitalized per-share value (1 / cap rate).
    pub earnings_multiple: Multiple,
    /// Weights for the last three years of EPS, most recent first.
    pub eps_weights: (Rate, Rate, Rate),
    /// Ceiling on the NAV weight when nudged up for real-estate-heavy firms.
    pub real_estate_nav_weight_cap: Rate,
    pub default_policy: ValuationPolicy,
}

/// Two-tier preferential schedule for family-business succession, plus the
/// ordinary basic deductions used when relief is not elected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessionPreset {
    pub year: u16,
    /// Default relief deduction when the input does not carry its own cap.
    pub relief_deduction: Money,
    pub tier_threshold: Money,
    pub tier1_rate: Rate,
    pub tier2_rate: Rate,
    /// Basic deduction for an ordinary gift to an adult child.
    pub gift_basic_deduction: Money,
    /// Lump-sum basic deduction for an ordinary inheritance.
    pub inheritance_basic_deduction: Money,
}

/// Every statutory table the calculators need for one year, selected per
/// call. Swapping the year swaps the numbers without touching any
/// calculator code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetBundle {
    pub year: u16,
    pub income_tax: Vec<TaxBracket>,
    /// Gift and inheritance share one progressive schedule.
    pub transfer_tax: Vec<TaxBracket>,
    pub insurance: InsurancePreset,
    pub valuation: ValuationPreset,
    pub succession: SuccessionPreset,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Years with published preset tables.
pub const SUPPORTED_YEARS: &[u16] = &[2023, 2024, 2025];

/// Look up the preset bundle for a year.
///
/// An unsupported year is fatal; falling back to another year's tables
/// would produce materially wrong figures.
pub fn preset_bundle(year: u16) -> FundSimResult<PresetBundle> {
    match year {
        2023 => Ok(bundle_2023()),
        2024 => Ok(bundle_2024()),
        2025 => Ok(bundle_2025()),
        _ => Err(FundSimError::PresetNotFound { year }),
    }
}

fn band(upper_bound: Option<Decimal>, rate: Rate, base_tax_at_start: Money) -> TaxBracket {
    TaxBracket {
        upper_bound,
        rate,
        base_tax_at_start,
    }
}

/// Personal income tax schedule, unchanged across 2023-2025.
fn income_tax_table() -> Vec<TaxBracket> {
    vec![
        band(Some(dec!(14000000)), dec!(0.06), dec!(0)),
        band(Some(dec!(50000000)), dec!(0.15), dec!(840000)),
        band(Some(dec!(88000000)), dec!(0.24), dec!(6240000)),
        band(Some(dec!(150000000)), dec!(0.35), dec!(15360000)),
        band(Some(dec!(300000000)), dec!(0.38), dec!(37060000)),
        band(Some(dec!(500000000)), dec!(0.40), dec!(94060000)),
        band(Some(dec!(1000000000)), dec!(0.42), dec!(174060000)),
        band(None, dec!(0.45), dec!(384060000)),
    ]
}

/// Gift and inheritance tax schedule, unchanged across 2023-2025.
fn transfer_tax_table() -> Vec<TaxBracket> {
    vec![
        band(Some(dec!(100000000)), dec!(0.10), dec!(0)),
        band(Some(dec!(500000000)), dec!(0.20), dec!(10000000)),
        band(Some(dec!(1000000000)), dec!(0.30), dec!(90000000)),
        band(Some(dec!(3000000000)), dec!(0.40), dec!(240000000)),
        band(None, dec!(0.50), dec!(1040000000)),
    ]
}

fn valuation_preset(year: u16) -> ValuationPreset {
    ValuationPreset {
        year,
        nav_weight: dec!(0.4),
        earnings_weight: dec!(0.6),
        earnings_multiple: dec!(10),
        eps_weights: (dec!(3), dec!(2), dec!(1)),
        real_estate_nav_weight_cap: dec!(0.7),
        default_policy: ValuationPolicy {
            scheme: WeightScheme::PresetWeights,
            nav_floor: None,
        },
    }
}

fn bundle_2023() -> PresetBundle {
    PresetBundle {
        year: 2023,
        income_tax: income_tax_table(),
        transfer_tax: transfer_tax_table(),
        insurance: InsurancePreset {
            year: 2023,
            health_rate: dec!(0.03545),
            health_premium_min: dec!(9570),
            health_premium_max: dec!(3911280),
            long_term_care_rate: dec!(0.1281),
            pension_rate: dec!(0.045),
            pension_base_min: dec!(370000),
            pension_base_max: dec!(5900000),
            employment_rate_employee: dec!(0.009),
            employment_rate_employer: dec!(0.0115),
            occupational_accident_rate: dec!(0.0153),
        },
        valuation: valuation_preset(2023),
        succession: SuccessionPreset {
            year: 2023,
            relief_deduction: dec!(1000000000),
            tier_threshold: dec!(6000000000),
            tier1_rate: dec!(0.10),
            tier2_rate: dec!(0.20),
            gift_basic_deduction: dec!(50000000),
            inheritance_basic_deduction: dec!(500000000),
        },
    }
}

fn bundle_2024() -> PresetBundle {
    PresetBundle {
        year: 2024,
        income_tax: income_tax_table(),
        transfer_tax: transfer_tax_table(),
        insurance: InsurancePreset {
            year: 2024,
            health_rate: dec!(0.03545),
            health_premium_min: dec!(9750),
            health_premium_max: dec!(4240710),
            long_term_care_rate: dec!(0.1295),
            pension_rate: dec!(0.045),
            pension_base_min: dec!(390000),
            pension_base_max: dec!(6170000),
            employment_rate_employee: dec!(0.009),
            employment_rate_employer: dec!(0.0115),
            occupational_accident_rate: dec!(0.0147),
        },
        valuation: valuation_preset(2024),
        succession: SuccessionPreset {
            year: 2024,
            relief_deduction: dec!(1000000000),
            // Low-rate tier widened from 6B to 12B in 2024.
            tier_threshold: dec!(12000000000),
            tier1_rate: dec!(0.10),
            tier2_rate: dec!(0.20),
            gift_basic_deduction: dec!(50000000),
            inheritance_basic_deduction: dec!(500000000),
        },
    }
}

fn bundle_2025() -> PresetBundle {
    PresetBundle {
        year: 2025,
        income_tax: income_tax_table(),
        transfer_tax: transfer_tax_table(),
        insurance: InsurancePreset {
            year: 2025,
            health_rate: dec!(0.03545),
            health_premium_min: dec!(9890),
            health_premium_max: dec!(4504170),
            long_term_care_rate: dec!(0.1295),
            pension_rate: dec!(0.045),
            pension_base_min: dec!(400000),
            pension_base_max: dec!(6370000),
            employment_rate_employee: dec!(0.009),
            employment_rate_employer: dec!(0.0115),
            occupational_accident_rate: dec!(0.0147),
        },
        valuation: valuation_preset(2025),
        succession: SuccessionPreset {
            year: 2025,
            relief_deduction: dec!(1000000000),
            tier_threshold: dec!(12000000000),
            tier1_rate: dec!(0.10),
            tier2_rate: dec!(0.20),
            gift_basic_deduction: dec!(50000000),
            inheritance_basic_deduction: dec!(500000000),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
