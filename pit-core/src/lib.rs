//! Core computation engine for Vietnamese personal income tax (PIT).
//!
//! This crate implements the pure numeric routines behind the tax
//! calculators: progressive bracket tax, capped mandatory-insurance
//! contributions, statutory deductions, gross↔net conversion, monthly
//! aggregation and year-end settlement across the mid-2026 law change.
//!
//! Everything here is a stateless, synchronous function over immutable
//! inputs. Date-dependent configuration (bracket tables, base salary,
//! regional minimum wages) lives in [`tables`] as effective-dated data.

pub mod calculations;
pub mod models;
pub mod tables;

pub use calculations::aggregate::{AggregationContext, AnnualTotals, PeriodTotals, aggregate_months};
pub use calculations::bracket_tax::{BracketLine, BracketTax, BracketTaxResult};
pub use calculations::deductions::{DeductionDetail, cap_voluntary_pension, resolve_deductions};
pub use calculations::forward::{TaxInput, TaxResult, compute_tax};
pub use calculations::insurance::{InsuranceDetail, compute_insurance};
pub use calculations::inverse::{InverseResult, NetTaxInput, gross_from_net};
pub use calculations::settlement::{
    PeriodSettlement, SettlementResult, SettlementType, reconcile,
};
pub use models::*;
