use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::{clamp, non_negative, round_down_to_10};
use crate::presets::InsurancePreset;
use crate::types::Money;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    pub health: Money,
    pub long_term_care: Money,
    pub pension: Money,
    pub employment: Money,
    /// Employer-only; always zero on the employee side.
    pub occupational_accident: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsurancePremiums {
    pub employee: PremiumBreakdown,
    pub employer: PremiumBreakdown,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly social-insurance premiums for a wage under a year preset.
///
/// Each premium rounds down to 10 won immediately after its own rate
/// multiplication; totals are sums of already-rounded figures, matching the
/// statutory billing amounts. Long-term care is derived from the health
/// premium, not the wage. The employer mirrors health, care and pension and
/// adds its own employment and occupational-accident rates.
pub fn premiums(monthly_wage: Money, preset: &InsurancePreset) -> InsurancePremiums {
    let wage = non_negative(monthly_wage);

    let health = round_down_to_10(clamp(
        wage * preset.health_rate,
        preset.health_premium_min,
        preset.health_premium_max,
    ));
    let long_term_care = round_down_to_10(health * preset.long_term_care_rate);
    let pension = round_down_to_10(
        clamp(wage, preset.pension_base_min, preset.pension_base_max) * preset.pension_rate,
    );
    let employment_employee = round_down_to_10(wage * preset.employment_rate_employee);
    let employment_employer = round_down_to_10(wage * preset.employment_rate_employer);
    let occupational_accident = round_down_to_10(wage * preset.occupational_accident_rate);

    let employee = PremiumBreakdown {
        health,
        long_term_care,
        pension,
        employment: employment_employee,
        occupational_accident: Decimal::ZERO,
        total: health + long_term_care + pension + employment_employee,
    };
    let employer = PremiumBreakdown {
        health,
        long_term_care,
        pension,
        employment: employment_employer,
        occupational_accident,
        total: health + long_term_care + pension + employment_employer + occupational_accident,
    };

    InsurancePremiums { employee, employer }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::preset_bundle;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn preset_2025() -> InsurancePreset {
        preset_bundle(2025).unwrap().insurance
    }

    #[test]
    fn test_reference_wage_3m() {
        let p = premiums(dec!(3000000), &preset_2025());

        // health: 3,000,000 * 3.545% = 106,350
        assert_eq!(p.employee.health, dec!(106350));
        // care: 106,350 * 12.95% = 13,772.3 -> 13,770
        assert_eq!(p.employee.long_term_care, dec!(13770));
        // pension: 3,000,000 * 4.5% = 135,000
        assert_eq!(p.employee.pension, dec!(135000));
        // employment: 3,000,000 * 0.9% = 27,000
        assert_eq!(p.employee.employment, dec!(27000));
        assert_eq!(p.employee.total, dec!(282120));

        // employer adds 1.15% employment and 1.47% accident
        assert_eq!(p.employer.employment, dec!(34500));
        assert_eq!(p.employer.occupational_accident, dec!(44100));
        assert_eq!(p.employer.total, dec!(333720));
    }

    #[test]
    fn test_pension_base_capped() {
        let preset = preset_2025();
        let p = premiums(dec!(20000000), &preset);
        // base capped at 6,370,000 -> 286,650
        assert_eq!(p.employee.pension, dec!(286650));
    }

    #[test]
    fn test_pension_base_floored() {
        let preset = preset_2025();
        let p = premiums(dec!(100000), &preset);
        // base floored at 400,000 -> 18,000
        assert_eq!(p.employee.pension, dec!(18000));
    }

    #[test]
    fn test_health_premium_capped() {
        let preset = preset_2025();
        let p = premiums(dec!(200000000), &preset);
        assert_eq!(p.employee.health, round_down_to_10(preset.health_premium_max));
    }

    #[test]
    fn test_minimum_health_premium_at_zero_wage() {
        let preset = preset_2025();
        let p = premiums(Decimal::ZERO, &preset);
        assert_eq!(p.employee.health, round_down_to_10(preset.health_premium_min));
        assert_eq!(p.employee.employment, Decimal::ZERO);
    }

    #[test]
    fn test_all_premiums_are_multiples_of_10() {
        let preset = preset_2025();
        let mut wage = Decimal::ZERO;
        for _ in 0..100 {
            wage += dec!(123457);
            let p = premiums(wage, &preset);
            for side in [&p.employee, &p.employer] {
                for amount in [
                    side.health,
                    side.long_term_care,
                    side.pension,
                    side.employment,
                    side.occupational_accident,
                ] {
                    assert!(amount >= Decimal::ZERO);
                    assert_eq!(amount % dec!(10), Decimal::ZERO, "{amount} at wage {wage}");
                }
            }
        }
    }

    #[test]
    fn test_employer_bears_more_than_employee() {
        let p = premiums(dec!(4500000), &preset_2025());
        assert!(p.employer.total > p.employee.total);
    }

    #[test]
    fn test_negative_wage_clamps() {
        let preset = preset_2025();
        assert_eq!(premiums(dec!(-100), &preset), premiums(Decimal::ZERO, &preset));
    }
}
