//! Year-end settlement reconciliation.
//!
//! Each regime sub-period is taxed independently under its own law: the
//! period's assessable income is averaged over its months, taxed with the
//! monthly brackets and scaled back up. The statutory annual table is the
//! monthly table times twelve, so a non-transition year degenerates to a
//! single annual bracket application, while a transition year is the sum of
//! two sub-period liabilities rather than one full-year pass.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::aggregate::AnnualTotals;
use crate::calculations::bracket_tax::BracketTax;
use crate::models::Regime;
use crate::tables::brackets::regime_config;

/// Outcome classification of a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementType {
    Pay,
    Refund,
    Even,
}

impl SettlementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pay => "pay",
            Self::Refund => "refund",
            Self::Even => "even",
        }
    }

    fn from_difference(difference: Decimal) -> Self {
        if difference > Decimal::ZERO {
            Self::Pay
        } else if difference < Decimal::ZERO {
            Self::Refund
        } else {
            Self::Even
        }
    }
}

/// Liability of one regime sub-period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSettlement {
    pub regime: Regime,
    pub month_count: u32,
    pub assessable_income: Decimal,
    pub tax_due: Decimal,
}

/// Final annual reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    pub assessable_income: Decimal,
    pub annual_tax_due: Decimal,
    pub total_tax_paid: Decimal,
    /// `annual_tax_due - total_tax_paid`; positive means tax is owed.
    pub difference: Decimal,
    pub settlement_type: SettlementType,
    /// One entry per regime span of the year.
    pub periods: Vec<PeriodSettlement>,
}

/// Reconciles aggregated annual totals into the final settlement.
///
/// `manual_tax_paid`, when present, replaces the summed monthly
/// withholding.
pub fn reconcile(
    totals: &AnnualTotals,
    manual_tax_paid: Option<Decimal>,
) -> SettlementResult {
    let mut annual_tax_due = Decimal::ZERO;
    let mut periods = Vec::with_capacity(totals.periods.len());

    for period in &totals.periods {
        let tax_due = period_tax_due(period.regime, period.assessable_income, period.month_count);
        annual_tax_due += tax_due;
        periods.push(PeriodSettlement {
            regime: period.regime,
            month_count: period.month_count,
            assessable_income: period.assessable_income,
            tax_due,
        });
    }

    let total_tax_paid = manual_tax_paid.unwrap_or(totals.total_tax_paid);
    let difference = annual_tax_due - total_tax_paid;

    SettlementResult {
        assessable_income: totals.total_taxable,
        annual_tax_due,
        total_tax_paid,
        difference,
        settlement_type: SettlementType::from_difference(difference),
        periods,
    }
}

/// Sub-period liability: monthly-average income taxed under the period's
/// own brackets, scaled by the month count.
///
/// A period holding only bonus slots has no regular months; its income is
/// then taxed as a single month.
fn period_tax_due(
    regime: Regime,
    assessable_income: Decimal,
    month_count: u32,
) -> Decimal {
    let months = Decimal::from(month_count.max(1));
    let monthly_average = assessable_income / months;
    BracketTax::new(regime_config(regime).brackets).quick(monthly_average) * months
}
