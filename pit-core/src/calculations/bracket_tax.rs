//! Progressive bracket tax with per-bracket breakdown.
//!
//! Two equivalent methods are provided: a progressive walk that records the
//! slice of income taxed in each bracket, and an O(1) quick formula
//! (`income * rate - quick_deduction`) for callers that only need the
//! scalar tax. The quick-deduction constants are derived exactly from the
//! progressive method, so the two agree bit-for-bit; table validation in
//! [`crate::tables::brackets`] enforces that derivation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::min;
use crate::models::TaxBracket;

/// One row of the per-bracket breakdown.
///
/// `to` is always finite: for the unbounded top bracket it is reported as
/// `from + taxable_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketLine {
    /// Zero-based index of the bracket in its table.
    pub bracket: usize,
    pub from: Decimal,
    pub to: Decimal,
    pub rate: Decimal,
    /// Slice of taxable income falling inside this bracket.
    pub taxable_amount: Decimal,
    pub tax_amount: Decimal,
}

/// Total tax plus the ordered breakdown of brackets touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTaxResult {
    pub tax: Decimal,
    pub breakdown: Vec<BracketLine>,
}

/// Progressive tax calculator over one regime's bracket table.
#[derive(Debug, Clone)]
pub struct BracketTax<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> BracketTax<'a> {
    /// Creates a calculator over a bracket table.
    ///
    /// The table must be sorted, contiguous and end with an unbounded
    /// bracket; see [`crate::tables::brackets::validate_brackets`].
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Progressive marginal application with per-bracket breakdown.
    ///
    /// Non-positive taxable income yields zero tax and an empty breakdown;
    /// this is a total function over its domain.
    pub fn progressive(
        &self,
        taxable_income: Decimal,
    ) -> BracketTaxResult {
        let mut tax = Decimal::ZERO;
        let mut breakdown = Vec::new();
        let mut remaining = taxable_income;

        for (index, bracket) in self.brackets.iter().enumerate() {
            if remaining <= Decimal::ZERO {
                break;
            }

            let slice = match bracket.width() {
                Some(width) => min(remaining, width),
                None => remaining,
            };
            let tax_amount = slice * bracket.rate;
            tax += tax_amount;

            let to = match bracket.max_income {
                Some(max) => max,
                None => bracket.min_income + slice,
            };
            breakdown.push(BracketLine {
                bracket: index,
                from: bracket.min_income,
                to,
                rate: bracket.rate,
                taxable_amount: slice,
                tax_amount,
            });

            remaining -= slice;
        }

        BracketTaxResult { tax, breakdown }
    }

    /// O(1) quick formula, for callers that only need the scalar tax.
    pub fn quick(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        // Highest bracket whose lower bound lies below the income.
        let bracket = self
            .brackets
            .iter()
            .rev()
            .find(|b| b.min_income < taxable_income);

        match bracket {
            Some(b) => taxable_income * b.rate - b.quick_deduction,
            None => Decimal::ZERO,
        }
    }
}
