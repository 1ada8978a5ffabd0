use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::numeric::{at_least_one, non_negative};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FundSimResult;

// ---------------------------------------------------------------------------
// Thresholds and points
// ---------------------------------------------------------------------------

// Officer loans and nominee shares carry the most audit exposure and score
// heaviest. A ratio past the high threshold scores the high points only.
const OFFICER_LOAN_HIGH: Decimal = dec!(0.20);
const OFFICER_LOAN_MEDIUM: Decimal = dec!(0.10);
const OFFICER_LOAN_HIGH_POINTS: u32 = 30;
const OFFICER_LOAN_MEDIUM_POINTS: u32 = 15;

const NOMINEE_HIGH: Decimal = dec!(0.10);
const NOMINEE_MEDIUM: Decimal = dec!(0.05);
const NOMINEE_HIGH_POINTS: u32 = 25;
const NOMINEE_MEDIUM_POINTS: u32 = 12;

const RETAINED_HIGH: Decimal = dec!(0.80);
const RETAINED_MEDIUM: Decimal = dec!(0.50);
const RETAINED_HIGH_POINTS: u32 = 20;
const RETAINED_MEDIUM_POINTS: u32 = 10;

const REAL_ESTATE_HIGH: Decimal = dec!(0.60);
const REAL_ESTATE_MEDIUM: Decimal = dec!(0.40);
const REAL_ESTATE_HIGH_POINTS: u32 = 15;
const REAL_ESTATE_MEDIUM_POINTS: u32 = 8;

const HIGH_LEVEL_SCORE: u32 = 60;
const MEDIUM_LEVEL_SCORE: u32 = 30;

const MAX_FLAGS: usize = 3;
const MAX_ACTIONS: usize = 3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Balance-sheet red-flag ratios, each against net assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetRatios {
    pub retained_earnings_ratio: Decimal,
    pub officer_loan_ratio: Decimal,
    pub nominee_share_ratio: Decimal,
    pub real_estate_ratio: Decimal,
}

impl BalanceSheetRatios {
    /// Build ratios from raw balances; the net-asset denominator is clamped
    /// so a hollow balance sheet still yields numbers instead of NaN.
    pub fn from_balances(
        net_asset: Money,
        retained_earnings: Money,
        officer_loans: Money,
        nominee_shares: Money,
        real_estate: Money,
    ) -> Self {
        let base = at_least_one(non_negative(net_asset));
        BalanceSheetRatios {
            retained_earnings_ratio: non_negative(retained_earnings) / base,
            officer_loan_ratio: non_negative(officer_loans) / base,
            nominee_share_ratio: non_negative(nominee_shares) / base,
            real_estate_ratio: non_negative(real_estate) / base,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub score: u32,
    pub level: RiskLevel,
    /// At most three, in audit-exposure priority order.
    pub flags: Vec<String>,
    pub actions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score balance-sheet red flags into a level plus narrative.
pub fn assess_risk(ratios: &BalanceSheetRatios) -> RiskProfile {
    let mut score = 0u32;
    let mut flags: Vec<String> = Vec::new();
    let mut actions: Vec<String> = Vec::new();

    let mut fire = |points: u32, flag: &str, action: &str| {
        score += points;
        flags.push(flag.to_string());
        actions.push(action.to_string());
    };

    if ratios.officer_loan_ratio > OFFICER_LOAN_HIGH {
        fire(
            OFFICER_LOAN_HIGH_POINTS,
            "Officer loans exceed 20% of net assets",
            "Put a documented repayment schedule on officer loans before the next audit",
        );
    } else if ratios.officer_loan_ratio > OFFICER_LOAN_MEDIUM {
        fire(
            OFFICER_LOAN_MEDIUM_POINTS,
            "Officer loans exceed 10% of net assets",
            "Start winding down officer loan balances",
        );
    }

    if ratios.nominee_share_ratio > NOMINEE_HIGH {
        fire(
            NOMINEE_HIGH_POINTS,
            "Nominee-held shares exceed 10% of net assets",
            "Convert nominee holdings into registered ownership",
        );
    } else if ratios.nominee_share_ratio > NOMINEE_MEDIUM {
        fire(
            NOMINEE_MEDIUM_POINTS,
            "Nominee-held shares exceed 5% of net assets",
            "Inventory nominee arrangements and plan their unwind",
        );
    }

    if ratios.retained_earnings_ratio > RETAINED_HIGH {
        fire(
            RETAINED_HIGH_POINTS,
            "Retained earnings exceed 80% of net assets",
            "Work down retained earnings through staged dividends or fund contributions",
        );
    } else if ratios.retained_earnings_ratio > RETAINED_MEDIUM {
        fire(
            RETAINED_MEDIUM_POINTS,
            "Retained earnings exceed 50% of net assets",
            "Review the dividend policy against the retained-earnings build-up",
        );
    }

    if ratios.real_estate_ratio > REAL_ESTATE_HIGH {
        fire(
            REAL_ESTATE_HIGH_POINTS,
            "Real estate concentration above 60% of net assets",
            "Reweigh the asset mix ahead of a supplementary valuation",
        );
    } else if ratios.real_estate_ratio > REAL_ESTATE_MEDIUM {
        fire(
            REAL_ESTATE_MEDIUM_POINTS,
            "Real estate concentration above 40% of net assets",
            "Track the real-estate share against the valuation weighting threshold",
        );
    }

    flags.truncate(MAX_FLAGS);
    actions.truncate(MAX_ACTIONS);

    if actions.is_empty() {
        actions.push("Maintain the current dividend and compensation mix".to_string());
        actions.push("Re-run the assessment after the next closing".to_string());
    }

    let level = if score >= HIGH_LEVEL_SCORE {
        RiskLevel::High
    } else if score >= MEDIUM_LEVEL_SCORE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    RiskProfile {
        score,
        level,
        flags,
        actions,
    }
}

/// Envelope wrapper around [`assess_risk`] for hosts.
pub fn calculate_risk(
    ratios: &BalanceSheetRatios,
) -> FundSimResult<ComputationOutput<RiskProfile>> {
    let start = Instant::now();
    let result = assess_risk(ratios);
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Balance-Sheet Risk Profile",
        ratios,
        Vec::new(),
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
