use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::non_negative;
use crate::types::{Money, Rate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One band of a progressive tax schedule.
///
/// Tables are ascending and continuous: `base_tax_at_start` of band *n* must
/// equal the tax at band *n-1*'s upper bound. The calculator relies on that
/// precondition and does not self-check it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of the band; `None` marks the open-ended top band.
    pub upper_bound: Option<Money>,
    /// Marginal rate inside the band.
    pub rate: Rate,
    /// Cumulative tax at the band's lower edge.
    pub base_tax_at_start: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Tax due on `income` under a progressive schedule.
///
/// Income below zero clamps to zero; an empty table owes nothing. The same
/// function serves personal income tax and gift/inheritance tax, the only
/// difference being the table handed in.
pub fn progressive_tax(income: Money, brackets: &[TaxBracket]) -> Money {
    let income = non_negative(income);
    if income.is_zero() || brackets.is_empty() {
        return Decimal::ZERO;
    }

    let mut previous_upper = Decimal::ZERO;
    let mut tax = Decimal::ZERO;
    for bracket in brackets {
        tax = bracket.base_tax_at_start + (income - previous_upper) * bracket.rate;
        match bracket.upper_bound {
            Some(upper) if income > upper => previous_upper = upper,
            _ => break,
        }
    }
    // Falls through only when income exceeds a bounded table, in which case
    // the top band's slope is extended.
    tax
}

/// Marginal rate of the band containing `income`.
pub fn marginal_rate(income: Money, brackets: &[TaxBracket]) -> Rate {
    let income = non_negative(income);
    let mut rate = Decimal::ZERO;
    for bracket in brackets {
        rate = bracket.rate;
        match bracket.upper_bound {
            Some(upper) if income > upper => {}
            _ => break,
        }
    }
    rate
}

/// Average rate actually borne at `income`, zero on a zero base.
pub fn effective_rate(income: Money, brackets: &[TaxBracket]) -> Rate {
    let income = non_negative(income);
    if income.is_zero() {
        return Decimal::ZERO;
    }
    progressive_tax(income, brackets) / income
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
