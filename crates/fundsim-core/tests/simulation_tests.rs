use fundsim_core::payroll::solver::TaxMode;
use fundsim_core::risk::profile::RiskLevel;
use fundsim_core::simulation::ceo::{
    simulate_ceo, CeoSimulationInput, ContributingActor, ContributionAsset, SuccessionMode,
};
use fundsim_core::simulation::raise_to_fund::{
    simulate_raise_shift, RaiseToFundInput, RetirementPlan,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn ceo_input() -> CeoSimulationInput {
    CeoSimulationInput {
        year: 2025,
        issued_shares: dec!(100000),
        net_asset: dec!(500000000),
        eps: [dec!(20000), dec!(18000), dec!(16000)],
        retained_earnings: dec!(250000000),
        officer_loans: dec!(125000000),
        nominee_shares_value: dec!(0),
        treasury_shares_value: dec!(0),
        real_estate_book_value: dec!(100000000),
        real_estate_market_value: dec!(120000000),
        succession_mode: SuccessionMode::Gift,
        succession_shares: dec!(60000),
        family_business_relief: true,
        relief_cap: None,
        owner_tax_base: dec!(300000000),
        contribution_actor: ContributingActor::Corporation,
        contribution_asset: ContributionAsset::Cash,
        contribution: dec!(200000000),
        corp_effective_tax_rate: dec!(0.22),
        deductibility_rate: dec!(1),
        pay_mode_factor: dec!(1),
        valuation_policy: None,
    }
}

// ===========================================================================
// CEO simulation tests
// ===========================================================================

#[test]
fn test_corp_saving_is_contribution_times_effective_rate() {
    let output = simulate_ceo(&ceo_input()).unwrap().result;
    assert_eq!(output.corp_tax_saving_annual, dec!(44000000));
}

#[test]
fn test_zero_contribution_idempotence() {
    let mut input = ceo_input();
    input.contribution = Decimal::ZERO;
    let output = simulate_ceo(&input).unwrap().result;
    assert_eq!(output.valuation_before, output.valuation_after);
    assert_eq!(output.succession_tax_before, output.succession_tax_after);
    assert_eq!(output.gross_benefit_annual, Decimal::ZERO);
    assert_eq!(output.total_benefit_annual, Decimal::ZERO);
}

#[test]
fn test_total_benefit_identity() {
    let output = simulate_ceo(&ceo_input()).unwrap().result;
    assert_eq!(
        output.gross_benefit_annual,
        output.corp_tax_saving_annual
            + output.owner_income_tax_saving_annual
            + output.succession_tax_saving
    );
    assert_eq!(
        output.total_benefit_annual,
        output.gross_benefit_annual - output.risk_buffer_annual
    );
    assert!(output.risk_buffer_annual > Decimal::ZERO);
}

#[test]
fn test_contribution_reduces_succession_tax() {
    let output = simulate_ceo(&ceo_input()).unwrap().result;
    assert!(output.succession_tax_after < output.succession_tax_before);
    assert!(output.succession_tax_saving > Decimal::ZERO);
}

#[test]
fn test_pay_mode_factor_scales_owner_saving() {
    let full = simulate_ceo(&ceo_input()).unwrap().result;
    let mut staged = ceo_input();
    staged.pay_mode_factor = dec!(0.5);
    let staged_result = simulate_ceo(&staged).unwrap().result;
    assert!(
        staged_result.owner_income_tax_saving_annual < full.owner_income_tax_saving_annual
    );
}

#[test]
fn test_deductibility_zero_kills_owner_saving() {
    let mut input = ceo_input();
    input.deductibility_rate = Decimal::ZERO;
    let output = simulate_ceo(&input).unwrap().result;
    assert_eq!(output.owner_income_tax_saving_annual, Decimal::ZERO);
    assert_eq!(output.owner_income_tax_saving_monthly, Decimal::ZERO);
}

#[test]
fn test_officer_loan_quarter_of_net_assets_flags_30_points() {
    // 125M over 500M = 0.25: the high officer-loan rule alone fires here
    // with retained earnings held at 50%.
    let mut input = ceo_input();
    input.retained_earnings = dec!(250000000);
    input.nominee_shares_value = Decimal::ZERO;
    input.real_estate_book_value = Decimal::ZERO;
    input.real_estate_market_value = Decimal::ZERO;
    let output = simulate_ceo(&input).unwrap().result;
    assert_eq!(output.risk_profile.score, 30);
    assert!(output
        .risk_profile
        .flags
        .iter()
        .any(|f| f.contains("Officer loans")));
}

#[test]
fn test_risk_buffer_rate_matches_level() {
    let output = simulate_ceo(&ceo_input()).unwrap().result;
    let expected_rate = match output.risk_profile.level {
        RiskLevel::High => dec!(0.15),
        RiskLevel::Medium => dec!(0.08),
        RiskLevel::Low => dec!(0.03),
    };
    assert_eq!(
        output.risk_buffer_annual,
        output.gross_benefit_annual * expected_rate
    );
}

#[test]
fn test_real_estate_heavy_balance_tilts_valuation() {
    let mut input = ceo_input();
    input.real_estate_book_value = dec!(300000000);
    input.real_estate_market_value = dec!(350000000);
    let tilted = simulate_ceo(&input).unwrap().result;
    let plain = simulate_ceo(&ceo_input()).unwrap().result;
    // 350M / 500M crosses the 50% threshold and shifts weight onto NAV.
    assert_eq!(tilted.valuation_before.nav_weight_used, dec!(0.6));
    assert_eq!(plain.valuation_before.nav_weight_used, dec!(0.4));
}

#[test]
fn test_owner_contribution_still_earns_personal_deduction() {
    let mut input = ceo_input();
    input.contribution_actor = ContributingActor::Owner;
    let output = simulate_ceo(&input).unwrap().result;
    assert_eq!(output.corp_tax_saving_annual, Decimal::ZERO);
    assert!(output.owner_income_tax_saving_annual > Decimal::ZERO);
    assert_eq!(output.valuation_before, output.valuation_after);
}

#[test]
fn test_unsupported_year_rejected() {
    let mut input = ceo_input();
    input.year = 1999;
    assert!(simulate_ceo(&input).is_err());
}

// ===========================================================================
// Raise-to-fund tests
// ===========================================================================

fn raise_input() -> RaiseToFundInput {
    RaiseToFundInput {
        year: 2025,
        monthly_wage: dec!(4000000),
        shift_monthly: dec!(500000),
        years_served: Some(dec!(10)),
        years_to_retirement: Some(dec!(5)),
        hire_date: None,
        retirement_date: None,
        as_of: None,
        plan: RetirementPlan::DefinedBenefit,
        affects_average_wage: true,
        tax_mode: TaxMode::Progressive,
    }
}

#[test]
fn test_raise_shift_savings_and_loss() {
    let output = simulate_raise_shift(&raise_input()).unwrap().result;
    assert_eq!(output.annual_saving_total, dec!(1461120));
    assert_eq!(output.severance_loss, dec!(7500000));
    assert_eq!(output.net_benefit_to_retirement, dec!(-194400));
}

#[test]
fn test_raise_shift_dc_plan_is_pure_gain() {
    let mut input = raise_input();
    input.plan = RetirementPlan::DefinedContribution;
    let output = simulate_raise_shift(&input).unwrap().result;
    assert_eq!(output.severance_loss, Decimal::ZERO);
    assert_eq!(
        output.net_benefit_to_retirement,
        output.annual_saving_total * dec!(5)
    );
}

#[test]
fn test_raise_shift_break_even_consistency() {
    let output = simulate_raise_shift(&raise_input()).unwrap().result;
    let break_even = output.break_even_years.unwrap();
    // Recovering the loss takes break_even years of total savings.
    let recovered = output.annual_saving_total * break_even;
    assert!((recovered - output.severance_loss).abs() < dec!(1));
}

#[test]
fn test_zero_shift_changes_nothing() {
    let mut input = raise_input();
    input.shift_monthly = Decimal::ZERO;
    let output = simulate_raise_shift(&input).unwrap().result;
    assert_eq!(output.annual_saving_total, Decimal::ZERO);
    assert_eq!(output.severance_loss, Decimal::ZERO);
    assert_eq!(output.net_benefit_to_retirement, Decimal::ZERO);
}
