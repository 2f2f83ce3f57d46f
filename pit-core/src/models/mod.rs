mod insurance;
mod monthly;
mod regime;
mod tax_bracket;

pub use insurance::{InsuranceOptions, Region};
pub use monthly::{DependentWindow, MonthlyIncome};
pub use regime::{Regime, TRANSITION_MONTH, TRANSITION_YEAR};
pub use tax_bracket::TaxBracket;
