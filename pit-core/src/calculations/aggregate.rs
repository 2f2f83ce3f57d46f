//! Aggregation of monthly income entries into annual settlement totals.
//!
//! Each month is assigned to the regime in force for its nominal position
//! in the settlement year, and its dependent count is resolved from the
//! registration windows covering that month. Withholding is estimated with
//! the forward engine per month unless a manual `tax_paid` override is
//! present, in which case the override is trusted as-is. Nothing is cached
//! across months: dependent windows and the regime boundary make both the
//! deduction and the brackets a function of the month, not just the salary.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::forward::{TaxInput, compute_tax};
use crate::models::{DependentWindow, InsuranceOptions, MonthlyIncome, Regime, Region};

/// Year-wide settings shared by every month of an aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationContext {
    pub year: i32,
    pub region: Region,
    pub insurance: InsuranceOptions,
}

/// Totals for one regime sub-period of the settlement year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub regime: Regime,
    /// Regular months (1–12) assigned to this period; bonus slots add
    /// income here but do not extend the count.
    pub month_count: u32,
    pub gross: Decimal,
    /// Sum of the per-month taxable incomes (already net of deductions).
    pub assessable_income: Decimal,
    pub tax_paid: Decimal,
}

impl PeriodTotals {
    fn new(regime: Regime) -> Self {
        Self {
            regime,
            month_count: 0,
            gross: Decimal::ZERO,
            assessable_income: Decimal::ZERO,
            tax_paid: Decimal::ZERO,
        }
    }
}

/// Annual accumulation across all monthly entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualTotals {
    pub year: i32,
    pub total_gross: Decimal,
    pub total_bonus: Decimal,
    pub total_taxable: Decimal,
    pub total_insurance: Decimal,
    pub total_personal_deduction: Decimal,
    pub total_dependent_deduction: Decimal,
    pub total_tax_paid: Decimal,
    /// One entry per regime span, in old-then-new order.
    pub periods: Vec<PeriodTotals>,
}

/// First day of a settlement month, with bonus slots anchored to December.
fn month_anchor(
    year: i32,
    month: u32,
) -> NaiveDate {
    // The clamp keeps the month in 1..=12, so construction cannot fail.
    NaiveDate::from_ymd_opt(year, month.clamp(1, 12), 1).unwrap_or(NaiveDate::MIN)
}

/// Dependent count in effect for a month.
fn dependents_for_month(
    windows: &[DependentWindow],
    month: u32,
) -> u32 {
    windows.iter().filter(|window| window.contains(month)).count() as u32
}

/// Aggregates a year of monthly entries into settlement totals.
///
/// Every month is computed with its own regime and dependent count; the
/// per-regime sub-totals feed the settlement reconciler for transition
/// years.
pub fn aggregate_months(
    entries: &[MonthlyIncome],
    dependent_windows: &[DependentWindow],
    context: &AggregationContext,
) -> AnnualTotals {
    let mut totals = AnnualTotals {
        year: context.year,
        total_gross: Decimal::ZERO,
        total_bonus: Decimal::ZERO,
        total_taxable: Decimal::ZERO,
        total_insurance: Decimal::ZERO,
        total_personal_deduction: Decimal::ZERO,
        total_dependent_deduction: Decimal::ZERO,
        total_tax_paid: Decimal::ZERO,
        periods: Vec::new(),
    };
    let mut old_period = PeriodTotals::new(Regime::Old);
    let mut new_period = PeriodTotals::new(Regime::New);

    for entry in entries {
        let regime = Regime::for_month(context.year, entry.month);
        let dependents = dependents_for_month(dependent_windows, entry.month);
        let income = entry.gross_salary + entry.bonus;

        let estimate = compute_tax(&TaxInput {
            gross_income: income,
            declared_salary: None,
            dependents,
            other_deductions: Decimal::ZERO,
            insurance: context.insurance,
            region: context.region,
            regime,
            as_of: month_anchor(context.year, entry.month),
        });
        let tax_paid = entry.tax_paid.unwrap_or(estimate.tax);

        totals.total_gross += income;
        totals.total_bonus += entry.bonus;
        totals.total_taxable += estimate.taxable_income;
        totals.total_insurance += estimate.insurance.total;
        totals.total_personal_deduction += estimate.deductions.personal;
        totals.total_dependent_deduction += estimate.deductions.dependent;
        totals.total_tax_paid += tax_paid;

        let period = match regime {
            Regime::Old => &mut old_period,
            Regime::New => &mut new_period,
        };
        if entry.month <= 12 {
            period.month_count += 1;
        }
        period.gross += income;
        period.assessable_income += estimate.taxable_income;
        period.tax_paid += tax_paid;
    }

    for period in [old_period, new_period] {
        if period.month_count > 0 || period.gross != Decimal::ZERO {
            totals.periods.push(period);
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn context(year: i32) -> AggregationContext {
        AggregationContext {
            year,
            region: Region::I,
            insurance: InsuranceOptions::all_enabled(),
        }
    }

    #[test]
    fn pre_transition_year_has_a_single_old_period() {
        let entries = MonthlyIncome::filled_year(dec!(30_000_000));

        let totals = aggregate_months(&entries, &[], &context(2025));

        assert_eq!(totals.periods.len(), 1);
        assert_eq!(totals.periods[0].regime, Regime::Old);
        assert_eq!(totals.periods[0].month_count, 12);
        assert_eq!(totals.total_gross, dec!(360_000_000));
        // 15.85M monthly taxable, estimated withholding 1,627,500 monthly.
        assert_eq!(totals.total_taxable, dec!(190_200_000));
        assert_eq!(totals.total_tax_paid, dec!(19_530_000));
    }

    #[test]
    fn transition_year_splits_months_between_regimes() {
        let entries = MonthlyIncome::filled_year(dec!(30_000_000));

        let totals = aggregate_months(&entries, &[], &context(2026));

        assert_eq!(totals.periods.len(), 2);
        let old = &totals.periods[0];
        let new = &totals.periods[1];
        assert_eq!((old.regime, old.month_count), (Regime::Old, 6));
        assert_eq!((new.regime, new.month_count), (Regime::New, 6));
        // Jan-Jun: taxable 15.85M/month; Jul-Dec: 11.35M/month.
        assert_eq!(old.assessable_income, dec!(95_100_000));
        assert_eq!(new.assessable_income, dec!(68_100_000));
        assert_eq!(totals.total_taxable, dec!(163_200_000));
    }

    #[test]
    fn dependent_windows_apply_per_month() {
        let entries = MonthlyIncome::filled_year(dec!(30_000_000));
        // One dependent registered from July onward.
        let windows = [DependentWindow { from_month: 7, to_month: 12 }];

        let totals = aggregate_months(&entries, &windows, &context(2025));

        // Jan-Jun taxable 15.85M; Jul-Dec taxable 15.85M - 4.4M = 11.45M.
        assert_eq!(totals.total_taxable, dec!(163_800_000));
        assert_eq!(totals.total_dependent_deduction, dec!(26_400_000));
    }

    #[test]
    fn manual_tax_paid_override_is_trusted_as_is() {
        let mut entries = MonthlyIncome::filled_year(dec!(30_000_000));
        entries[0].tax_paid = Some(dec!(2_000_000));

        let totals = aggregate_months(&entries, &[], &context(2025));

        // Eleven estimated months at 1,627,500 plus the override.
        assert_eq!(totals.total_tax_paid, dec!(19_902_500));
    }

    #[test]
    fn bonus_slot_counts_income_but_not_months() {
        let mut entries = MonthlyIncome::filled_year(dec!(30_000_000));
        entries.push(MonthlyIncome {
            month: 13,
            gross_salary: dec!(0),
            bonus: dec!(60_000_000),
            tax_paid: None,
        });

        let totals = aggregate_months(&entries, &[], &context(2026));

        let new = totals.periods.iter().find(|p| p.regime == Regime::New).unwrap();
        assert_eq!(new.month_count, 6);
        assert_eq!(new.gross, dec!(240_000_000));
        assert_eq!(totals.total_bonus, dec!(60_000_000));
    }

    #[test]
    fn bonus_is_added_to_its_months_income() {
        let mut entries = MonthlyIncome::filled_year(dec!(30_000_000));
        entries[2].bonus = dec!(10_000_000);

        let totals = aggregate_months(&entries, &[], &context(2025));

        assert_eq!(totals.total_gross, dec!(370_000_000));
        assert_eq!(totals.total_bonus, dec!(10_000_000));
        // March taxable rises by the bonus net of its insurance:
        // 10M - 1.05M = 8.95M on top of the 190.2M base.
        assert_eq!(totals.total_taxable, dec!(199_150_000));
    }

    #[test]
    fn empty_entries_produce_zero_totals_and_no_periods() {
        let totals = aggregate_months(&[], &[], &context(2025));

        assert_eq!(totals.total_gross, dec!(0));
        assert_eq!(totals.total_tax_paid, dec!(0));
        assert_eq!(totals.periods, vec![]);
    }

    #[test]
    fn overlapping_windows_stack_dependent_counts() {
        let entries = vec![MonthlyIncome::new(1, dec!(40_000_000))];
        let windows =
            [DependentWindow::full_year(), DependentWindow { from_month: 1, to_month: 3 }];

        let totals = aggregate_months(&entries, &windows, &context(2025));

        // Two dependents in January: 40M - 4.2M - 11M - 8.8M = 16M.
        assert_eq!(totals.total_taxable, dec!(16_000_000));
    }
}
