use rust_decimal::Decimal;

use crate::numeric::non_negative;
use crate::types::{Money, Rate};

/// Two-tier preferential tax on a business-succession transfer.
///
/// The relief deduction comes off the eligible value first; whatever remains
/// is split at `tier_threshold` and taxed at the two reduced rates. Owes
/// nothing when the deduction covers the whole transfer.
pub fn special_tax(
    eligible_value: Money,
    deduction: Money,
    tier_threshold: Money,
    tier1_rate: Rate,
    tier2_rate: Rate,
) -> Money {
    let base = non_negative(non_negative(eligible_value) - non_negative(deduction));
    if base.is_zero() {
        return Decimal::ZERO;
    }

    let threshold = non_negative(tier_threshold);
    let tier1 = base.min(threshold);
    let tier2 = non_negative(base - threshold);

    tier1 * tier1_rate + tier2 * tier2_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const DEDUCTION: Decimal = dec!(1000000000);
    const THRESHOLD: Decimal = dec!(12000000000);
    const RATE1: Decimal = dec!(0.10);
    const RATE2: Decimal = dec!(0.20);

    #[test]
    fn test_zero_when_deduction_covers_value() {
        assert_eq!(
            special_tax(dec!(800000000), DEDUCTION, THRESHOLD, RATE1, RATE2),
            Decimal::ZERO
        );
        assert_eq!(
            special_tax(DEDUCTION, DEDUCTION, THRESHOLD, RATE1, RATE2),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_tier1_only() {
        // base = 13B - 1B = 12B, all in tier 1 at 10%
        assert_eq!(
            special_tax(dec!(13000000000), DEDUCTION, THRESHOLD, RATE1, RATE2),
            dec!(1200000000)
        );
    }

    #[test]
    fn test_both_tiers() {
        // base = 20B - 1B = 19B: 12B at 10% + 7B at 20% = 2.6B
        assert_eq!(
            special_tax(dec!(20000000000), DEDUCTION, THRESHOLD, RATE1, RATE2),
            dec!(2600000000)
        );
    }

    #[test]
    fn test_monotone_in_eligible_value() {
        let mut previous = Decimal::ZERO;
        let mut value = Decimal::ZERO;
        for _ in 0..50 {
            value += dec!(500000000);
            let tax = special_tax(value, DEDUCTION, THRESHOLD, RATE1, RATE2);
            assert!(tax >= previous, "special tax decreased at {value}");
            previous = tax;
        }
    }

    #[test]
    fn test_negative_inputs_clamp() {
        assert_eq!(
            special_tax(dec!(-5), DEDUCTION, THRESHOLD, RATE1, RATE2),
            Decimal::ZERO
        );
    }
}
