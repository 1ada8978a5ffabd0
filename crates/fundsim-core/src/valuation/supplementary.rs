use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::numeric::{at_least_one, non_negative};
use crate::presets::{ValuationPolicy, ValuationPreset, WeightScheme};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FundSimResult;

/// Added to the preset NAV weight for real-estate-heavy firms, before the
/// preset cap. Mirrors the 0.4 -> 0.6 statutory swap in magnitude.
const REAL_ESTATE_NAV_NUDGE: Decimal = dec!(0.2);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationInput {
    pub issued_shares: Decimal,
    pub net_asset: Money,
    /// Per-share earnings for the last three years, most recent first.
    pub eps: [Money; 3],
    /// Real-estate share of assets crosses the statutory threshold.
    pub real_estate_heavy: bool,
    pub shares_transferred: Decimal,
    /// Overrides the year preset's default policy when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<ValuationPolicy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub per_share_nav: Money,
    pub weighted_eps: Money,
    pub per_share_earnings: Money,
    pub per_share_final: Money,
    pub target_share_value: Money,
    pub nav_weight_used: Rate,
    pub earnings_weight_used: Rate,
    pub floor_applied: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Supplementary per-share valuation for non-listed equity.
///
/// NAV per share and capitalized weighted earnings per share are blended by
/// the selected scheme; an optional NAV floor backstops the blend. The raw
/// function is reused by the simulation orchestrator for before/after pairs.
pub fn valuate_shares(input: &ValuationInput, preset: &ValuationPreset) -> ValuationResult {
    let policy = input.policy.unwrap_or(preset.default_policy);

    let shares = at_least_one(input.issued_shares);
    let per_share_nav = non_negative(input.net_asset) / shares;

    let (w1, w2, w3) = preset.eps_weights;
    let weight_sum = at_least_one(w1 + w2 + w3);
    let weighted_eps = (input.eps[0] * w1 + input.eps[1] * w2 + input.eps[2] * w3) / weight_sum;
    let per_share_earnings = weighted_eps * preset.earnings_multiple;

    let (nav_weight, earnings_weight) = blend_weights(&policy, preset, input.real_estate_heavy);

    let blended = per_share_nav * nav_weight + per_share_earnings * earnings_weight;
    let (per_share_final, floor_applied) = match policy.nav_floor {
        Some(floor) => {
            let floor_value = per_share_nav * floor;
            if blended < floor_value {
                (floor_value, true)
            } else {
                (blended, false)
            }
        }
        None => (blended, false),
    };
    let per_share_final = non_negative(per_share_final);

    ValuationResult {
        per_share_nav,
        weighted_eps,
        per_share_earnings,
        per_share_final,
        target_share_value: per_share_final * non_negative(input.shares_transferred),
        nav_weight_used: nav_weight,
        earnings_weight_used: earnings_weight,
        floor_applied,
    }
}

fn blend_weights(
    policy: &ValuationPolicy,
    preset: &ValuationPreset,
    real_estate_heavy: bool,
) -> (Rate, Rate) {
    match policy.scheme {
        WeightScheme::PresetWeights => {
            if real_estate_heavy {
                let nudged = (preset.nav_weight + REAL_ESTATE_NAV_NUDGE)
                    .min(preset.real_estate_nav_weight_cap);
                (nudged, Decimal::ONE - nudged)
            } else {
                (preset.nav_weight, preset.earnings_weight)
            }
        }
        WeightScheme::StatutoryBlend => {
            if real_estate_heavy {
                (dec!(0.6), dec!(0.4))
            } else {
                (dec!(0.4), dec!(0.6))
            }
        }
    }
}

/// Envelope wrapper around [`valuate_shares`] for hosts.
pub fn calculate_valuation(
    input: &ValuationInput,
    preset: &ValuationPreset,
) -> FundSimResult<ComputationOutput<ValuationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.issued_shares < Decimal::ONE {
        warnings.push("issued_shares below 1; clamped to 1 as denominator".into());
    }
    if input.net_asset < Decimal::ZERO {
        warnings.push("negative net_asset clamped to zero".into());
    }

    let result = valuate_shares(input, preset);

    if result.weighted_eps < Decimal::ZERO {
        warnings.push("weighted EPS is negative; earnings value drags the blend down".into());
    }
    if result.floor_applied {
        warnings.push("NAV floor engaged; blended value was below the floor".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Supplementary Share Valuation",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
