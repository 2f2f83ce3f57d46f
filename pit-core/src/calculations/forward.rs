//! Forward tax engine: gross/declared income to a full tax result.
//!
//! Composes the insurance calculator, deduction resolver and bracket tax
//! into one pass. The dual-basis rule is the subtle part: when a declared
//! salary is present it is the basis for *both* insurance and tax, while
//! net income is always reported against the real gross salary.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::bracket_tax::{BracketLine, BracketTax};
use crate::calculations::common::clamp_non_negative;
use crate::calculations::deductions::{DeductionDetail, resolve_deductions};
use crate::calculations::insurance::{InsuranceDetail, compute_insurance};
use crate::models::{InsuranceOptions, Regime, Region};
use crate::tables::brackets::regime_config;

/// Inputs for one forward tax computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    /// Actual monthly gross salary; basis for net-income reporting.
    pub gross_income: Decimal,

    /// Salary registered with the authorities, when it differs from the
    /// actual gross. Basis for insurance and tax when present.
    pub declared_salary: Option<Decimal>,

    /// Number of registered dependents.
    pub dependents: u32,

    /// Extra deductions (charity, capped voluntary pension, ...), already
    /// capped by the caller where a cap applies.
    pub other_deductions: Decimal,

    pub insurance: InsuranceOptions,
    pub region: Region,
    pub regime: Regime,

    /// Date used to resolve the insurance cap schedules.
    pub as_of: NaiveDate,
}

/// Full output of a forward computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross_income: Decimal,
    pub insurance: InsuranceDetail,
    pub deductions: DeductionDetail,
    /// Assessable income after insurance and deductions, clamped at zero.
    pub taxable_income: Decimal,
    pub tax: Decimal,
    pub net_income: Decimal,
    /// Tax as a percentage of gross income; zero when gross is zero.
    pub effective_rate: Decimal,
    pub breakdown: Vec<BracketLine>,
}

/// Computes withheld tax and net income for one month of income.
///
/// Total over all finite inputs: taxable income clamps at zero and no
/// branch can fail.
pub fn compute_tax(input: &TaxInput) -> TaxResult {
    let config = regime_config(input.regime);

    // Dual-basis rule: insurance and tax run on the declared figure,
    // net income on the real gross.
    let taxable_salary = input.declared_salary.unwrap_or(input.gross_income);

    let insurance = compute_insurance(taxable_salary, input.region, input.as_of, input.insurance);
    let deductions = resolve_deductions(input.regime, input.dependents, input.other_deductions);

    let taxable_income = clamp_non_negative(taxable_salary - insurance.total - deductions.total);

    let bracket_result = BracketTax::new(config.brackets).progressive(taxable_income);

    let net_income = input.gross_income - insurance.total - bracket_result.tax;
    let effective_rate = if input.gross_income > Decimal::ZERO {
        bracket_result.tax / input.gross_income * dec!(100)
    } else {
        Decimal::ZERO
    };

    TaxResult {
        gross_income: input.gross_income,
        insurance,
        deductions,
        taxable_income,
        tax: bracket_result.tax,
        net_income,
        effective_rate,
        breakdown: bracket_result.breakdown,
    }
}
