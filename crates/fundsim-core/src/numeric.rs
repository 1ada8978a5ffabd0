use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Clamp a value to zero or above.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Clamp a denominator to one or above so ratios never divide by zero.
pub fn at_least_one(value: Decimal) -> Decimal {
    value.max(Decimal::ONE)
}

/// Clamp a value into `[lo, hi]`.
pub fn clamp(value: Decimal, lo: Decimal, hi: Decimal) -> Decimal {
    value.max(lo).min(hi)
}

/// Drop sub-won fractions.
pub fn floor_to_won(value: Decimal) -> Decimal {
    value.floor()
}

/// Round down to the next lower multiple of 10 won.
///
/// Statutory premium and withholding amounts drop the last digit; negative
/// inputs clamp to zero since no premium is ever negative.
pub fn round_down_to_10(value: Decimal) -> Decimal {
    (non_negative(value) / dec!(10)).floor() * dec!(10)
}
