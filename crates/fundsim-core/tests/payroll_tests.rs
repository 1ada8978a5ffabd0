use fundsim_core::payroll::insurance::premiums;
use fundsim_core::payroll::solver::{net_pay, solve_gross, TaxMode};
use fundsim_core::presets::{preset_bundle, SUPPORTED_YEARS};
use fundsim_core::tax::bracket::progressive_tax;
use fundsim_core::FundSimError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Insurance premium tests
// ===========================================================================

#[test]
fn test_premiums_are_rounded_multiples_of_10_for_every_year() {
    for &year in SUPPORTED_YEARS {
        let preset = preset_bundle(year).unwrap().insurance;
        let mut wage = dec!(500000);
        for _ in 0..40 {
            wage += dec!(777777);
            let p = premiums(wage, &preset);
            for amount in [
                p.employee.health,
                p.employee.long_term_care,
                p.employee.pension,
                p.employee.employment,
                p.employer.employment,
                p.employer.occupational_accident,
            ] {
                assert!(amount >= Decimal::ZERO);
                assert_eq!(
                    amount % dec!(10),
                    Decimal::ZERO,
                    "{year}: {amount} not a multiple of 10 at wage {wage}"
                );
            }
        }
    }
}

#[test]
fn test_long_term_care_follows_health_premium_cap() {
    // Far above the cap the health premium freezes, so care must freeze too.
    let preset = preset_bundle(2025).unwrap().insurance;
    let p1 = premiums(dec!(150000000), &preset);
    let p2 = premiums(dec!(300000000), &preset);
    assert_eq!(p1.employee.health, p2.employee.health);
    assert_eq!(p1.employee.long_term_care, p2.employee.long_term_care);
    // Employment insurance has no cap and keeps growing.
    assert!(p2.employee.employment > p1.employee.employment);
}

#[test]
fn test_premiums_monotone_in_wage() {
    let preset = preset_bundle(2024).unwrap().insurance;
    let mut previous_total = Decimal::ZERO;
    let mut wage = Decimal::ZERO;
    for _ in 0..60 {
        wage += dec!(350000);
        let total = premiums(wage, &preset).employee.total;
        assert!(
            total >= previous_total,
            "employee total fell at wage {wage}"
        );
        previous_total = total;
    }
}

// ===========================================================================
// Net-to-gross solver tests
// ===========================================================================

#[test]
fn test_solver_round_trip_meets_target() {
    let bundle = preset_bundle(2025).unwrap();
    for target in [
        dec!(1500000),
        dec!(2384940),
        dec!(3700000),
        dec!(7000000),
        dec!(20000000),
        dec!(100000000),
    ] {
        let solution = solve_gross(target, &bundle, TaxMode::Progressive).unwrap();
        assert!(
            solution.breakdown.net >= target,
            "target {target}: net {} fell short",
            solution.breakdown.net
        );
        // The breakdown is the forward computation at the solved gross.
        let forward = net_pay(solution.gross, &bundle, TaxMode::Progressive).unwrap();
        assert_eq!(forward, solution.breakdown);
        // One percent less gross misses the target.
        let undershoot =
            net_pay(solution.gross * dec!(0.99), &bundle, TaxMode::Progressive).unwrap();
        assert!(undershoot.net < target);
    }
}

#[test]
fn test_solver_gross_monotone_in_target() {
    let bundle = preset_bundle(2025).unwrap();
    let mut previous = Decimal::ZERO;
    for target in [dec!(1000000), dec!(3000000), dec!(9000000), dec!(27000000)] {
        let gross = solve_gross(target, &bundle, TaxMode::Progressive)
            .unwrap()
            .gross;
        assert!(gross > previous);
        previous = gross;
    }
}

#[test]
fn test_flat_zero_rate_needs_less_gross() {
    let bundle = preset_bundle(2025).unwrap();
    let progressive = solve_gross(dec!(3000000), &bundle, TaxMode::Progressive).unwrap();
    let flat = solve_gross(dec!(3000000), &bundle, TaxMode::Flat(dec!(0))).unwrap();
    // With no income tax the required gross is strictly smaller.
    assert!(flat.gross < progressive.gross);
    assert_eq!(flat.breakdown.income_tax, Decimal::ZERO);
}

#[test]
fn test_withholding_tracks_bracket_table() {
    // The solver's tax leg is the bracket calculator, not a private copy.
    let bundle = preset_bundle(2025).unwrap();
    let bd = net_pay(dec!(3000000), &bundle, TaxMode::Progressive).unwrap();
    let annual_taxable = (dec!(3000000) - bd.insurance.employee.total) * dec!(12);
    let annual_tax = progressive_tax(annual_taxable, &bundle.income_tax);
    assert!(bd.income_tax <= annual_tax / dec!(12));
    assert!(bd.income_tax > annual_tax / dec!(12) - dec!(10));
}

#[test]
fn test_unsupported_year_surfaces_preset_error() {
    let err = preset_bundle(2019).unwrap_err();
    assert!(matches!(err, FundSimError::PresetNotFound { year: 2019 }));
}
