use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One month of declared income in a settlement year.
///
/// `month` is 1–12 for regular salary months; values above 12 are bonus
/// slots carrying extra income events (13th-month salary, Tet bonus paid
/// outside a salary month). `tax_paid`, when present, is a manual override:
/// the aggregator trusts it as-is instead of estimating withholding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyIncome {
    pub month: u32,
    pub gross_salary: Decimal,
    pub bonus: Decimal,
    pub tax_paid: Option<Decimal>,
}

impl MonthlyIncome {
    pub fn new(
        month: u32,
        gross_salary: Decimal,
    ) -> Self {
        Self { month, gross_salary, bonus: Decimal::ZERO, tax_paid: None }
    }

    /// Twelve identical months at an average salary ("average salary mode").
    pub fn filled_year(average_salary: Decimal) -> Vec<Self> {
        (1..=12).map(|month| Self::new(month, average_salary)).collect()
    }
}

/// Months during which one dependent is registered, inclusive on both ends.
///
/// The dependent count for a month is the number of windows containing it,
/// so the count may vary month to month within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentWindow {
    pub from_month: u32,
    pub to_month: u32,
}

impl DependentWindow {
    pub fn full_year() -> Self {
        Self { from_month: 1, to_month: 12 }
    }

    pub fn contains(
        &self,
        month: u32,
    ) -> bool {
        month >= self.from_month && month <= self.to_month
    }
}
