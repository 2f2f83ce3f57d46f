use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One progressive tax bracket.
///
/// Brackets for a regime are contiguous, sorted ascending, start at zero
/// and end with an unbounded bracket (`max_income = None`).
/// `quick_deduction` is the precomputed constant making
/// `income * rate - quick_deduction` equal the progressive total for any
/// income inside the bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
    pub quick_deduction: Decimal,
}

impl TaxBracket {
    /// Width of the bracket, or `None` for the unbounded top bracket.
    pub fn width(&self) -> Option<Decimal> {
        self.max_income.map(|max| max - self.min_income)
    }
}
