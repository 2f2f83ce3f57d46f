//! End-to-end scenarios across the engine: forward computation, inversion,
//! aggregation and settlement working together.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use pit_core::{
    AggregationContext, InsuranceOptions, MonthlyIncome, NetTaxInput, Regime, Region,
    SettlementType, TaxInput, aggregate_months, compute_tax, gross_from_net, reconcile,
};

fn june_2025() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn input_30m(regime: Regime) -> TaxInput {
    TaxInput {
        gross_income: dec!(30_000_000),
        declared_salary: None,
        dependents: 0,
        other_deductions: dec!(0),
        insurance: InsuranceOptions::all_enabled(),
        region: Region::I,
        regime,
        as_of: june_2025(),
    }
}

#[test]
fn reference_scenario_under_both_regimes() {
    let old = compute_tax(&input_30m(Regime::Old));
    assert_eq!(old.tax, dec!(1_627_500));
    assert_eq!(old.net_income, dec!(25_222_500));

    let new = compute_tax(&input_30m(Regime::New));
    assert_eq!(new.tax, dec!(635_000));
    assert_eq!(new.net_income, dec!(26_215_000));

    assert!(new.tax < old.tax);
}

#[test]
fn forward_then_inverse_recovers_gross() {
    let forward = compute_tax(&input_30m(Regime::Old));

    let params = NetTaxInput {
        declared_salary: None,
        dependents: 0,
        other_deductions: dec!(0),
        insurance: InsuranceOptions::all_enabled(),
        region: Region::I,
        regime: Regime::Old,
        as_of: june_2025(),
    };
    let inverse = gross_from_net(forward.net_income, &params);

    assert!(!inverse.approximate);
    assert!((inverse.result.gross_income - dec!(30_000_000)).abs() < dec!(10));
    // The inverse hands back the full breakdown at the converged point.
    assert!(!inverse.result.breakdown.is_empty());
}

#[test]
fn transition_year_settlement_sums_two_sub_periods() {
    let entries = MonthlyIncome::filled_year(dec!(30_000_000));
    let context = AggregationContext {
        year: 2026,
        region: Region::I,
        insurance: InsuranceOptions::all_enabled(),
    };

    let totals = aggregate_months(&entries, &[], &context);
    let settlement = reconcile(&totals, None);

    // Monthly withholding was estimated with each month's own regime, so
    // the annual due equals the sum of withholding and the year settles even.
    assert_eq!(settlement.periods.len(), 2);
    assert_eq!(settlement.periods[0].tax_due, dec!(9_765_000));
    assert_eq!(settlement.periods[1].tax_due, dec!(3_810_000));
    assert_eq!(settlement.annual_tax_due, dec!(13_575_000));
    assert_eq!(settlement.settlement_type, SettlementType::Even);
}

#[test]
fn under_withheld_transition_year_settles_as_pay() {
    let mut entries = MonthlyIncome::filled_year(dec!(30_000_000));
    // Employer withheld nothing in January.
    entries[0].tax_paid = Some(dec!(0));

    let context = AggregationContext {
        year: 2026,
        region: Region::I,
        insurance: InsuranceOptions::all_enabled(),
    };
    let totals = aggregate_months(&entries, &[], &context);
    let settlement = reconcile(&totals, None);

    assert_eq!(settlement.difference, dec!(1_627_500));
    assert_eq!(settlement.settlement_type, SettlementType::Pay);
}

#[test]
fn dependents_registered_mid_year_lower_the_settlement() {
    use pit_core::DependentWindow;

    let entries = MonthlyIncome::filled_year(dec!(30_000_000));
    let context = AggregationContext {
        year: 2025,
        region: Region::I,
        insurance: InsuranceOptions::all_enabled(),
    };

    let without = reconcile(&aggregate_months(&entries, &[], &context), None);
    let windows = [DependentWindow { from_month: 7, to_month: 12 }];
    let with = reconcile(&aggregate_months(&entries, &windows, &context), None);

    assert!(with.annual_tax_due < without.annual_tax_due);
    assert!(with.assessable_income < without.assessable_income);
}
