//! Statutory deductions per regime.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::min;
use crate::models::Regime;
use crate::tables::brackets::regime_config;

/// Statutory monthly cap on the deductible voluntary pension contribution.
pub const VOLUNTARY_PENSION_MONTHLY_CAP: Decimal = dec!(1_000_000);

/// Resolved deduction amounts for one computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionDetail {
    pub personal: Decimal,
    pub dependent: Decimal,
    /// Caller-supplied extra deductions, passed through unchanged.
    pub other: Decimal,
    pub total: Decimal,
}

/// Resolves the statutory deductions for a regime and dependent count.
///
/// `other_deductions` passes through without additional logic; capping
/// policy (e.g. the voluntary-pension cap) is applied by the caller before
/// this resolver is invoked.
pub fn resolve_deductions(
    regime: Regime,
    dependents: u32,
    other_deductions: Decimal,
) -> DeductionDetail {
    let config = regime_config(regime);
    let personal = config.personal_deduction;
    let dependent = config.dependent_deduction * Decimal::from(dependents);

    DeductionDetail {
        personal,
        dependent,
        other: other_deductions,
        total: personal + dependent + other_deductions,
    }
}

/// Caps a monthly voluntary pension contribution at the deductible maximum.
///
/// Convenience for callers assembling `other_deductions`; never applied
/// implicitly by the resolver.
pub fn cap_voluntary_pension(contribution: Decimal) -> Decimal {
    min(contribution, VOLUNTARY_PENSION_MONTHLY_CAP)
}
