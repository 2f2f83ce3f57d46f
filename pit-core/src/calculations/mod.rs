//! Calculation modules for the PIT engine.
//!
//! Leaf-first: bracket tax, insurance and deductions feed the forward
//! engine; the inverse engine bisects over it; aggregation and settlement
//! combine monthly results into the year-end reconciliation.

pub mod aggregate;
pub mod bracket_tax;
pub mod common;
pub mod deductions;
pub mod forward;
pub mod insurance;
pub mod inverse;
pub mod settlement;

pub use aggregate::{AggregationContext, AnnualTotals, PeriodTotals, aggregate_months};
pub use bracket_tax::{BracketLine, BracketTax, BracketTaxResult};
pub use deductions::{DeductionDetail, cap_voluntary_pension, resolve_deductions};
pub use forward::{TaxInput, TaxResult, compute_tax};
pub use insurance::{InsuranceDetail, compute_insurance};
pub use inverse::{InverseResult, NetTaxInput, gross_from_net};
pub use settlement::{PeriodSettlement, SettlementResult, SettlementType, reconcile};
