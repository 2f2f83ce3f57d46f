//! Net-to-gross inversion by monotonic bisection.
//!
//! The forward mapping has no closed-form inverse (caps and bracket
//! boundaries), but net income is non-decreasing in gross income:
//! incremental insurance plus marginal tax never exceeds the incremental
//! gross. Bisection over that monotone function is therefore exact up to
//! the configured tolerance.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::{clamp_non_negative, min};
use crate::calculations::forward::{TaxInput, TaxResult, compute_tax};
use crate::models::{InsuranceOptions, Regime, Region};

/// Iteration budget for the bisection.
pub const MAX_ITERATIONS: u32 = 100;

/// Sub-currency-unit convergence tolerance on net income, in VND.
pub const CONVERGENCE_TOLERANCE: Decimal = dec!(1);

/// Geometric growth factor while bracketing the target from above.
pub const UPPER_BOUND_GROWTH: Decimal = dec!(1.5);

/// Hard ceiling on the gross search space, in VND per month.
pub const GROSS_SAFETY_CEILING: Decimal = dec!(1_000_000_000);

/// Forward-engine parameters minus the gross income being solved for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetTaxInput {
    pub declared_salary: Option<Decimal>,
    pub dependents: u32,
    pub other_deductions: Decimal,
    pub insurance: InsuranceOptions,
    pub region: Region,
    pub regime: Regime,
    pub as_of: NaiveDate,
}

impl NetTaxInput {
    fn with_gross(
        &self,
        gross_income: Decimal,
    ) -> TaxInput {
        TaxInput {
            gross_income,
            declared_salary: self.declared_salary,
            dependents: self.dependents,
            other_deductions: self.other_deductions,
            insurance: self.insurance,
            region: self.region,
            regime: self.regime,
            as_of: self.as_of,
        }
    }
}

/// Converged (or best-effort) inversion outcome.
///
/// `approximate` is set when the search ends without meeting the tolerance,
/// which can only happen for targets unreachable within
/// [`GROSS_SAFETY_CEILING`]. The result is still the best evaluation found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InverseResult {
    pub result: TaxResult,
    pub approximate: bool,
    pub iterations: u32,
}

/// Solves for the gross income whose net take-home equals `target_net`.
///
/// Returns the full [`TaxResult`] at the converged gross so callers get the
/// breakdown without a second forward call.
pub fn gross_from_net(
    target_net: Decimal,
    params: &NetTaxInput,
) -> InverseResult {
    // Net never exceeds gross, so the target itself is a valid lower bound.
    let mut low = min(clamp_non_negative(target_net), GROSS_SAFETY_CEILING);
    let mut high = grow_upper_bound(target_net, params);

    let mut best = compute_tax(&params.with_gross(low));
    let mut iterations = 0;

    while iterations < MAX_ITERATIONS {
        iterations += 1;
        let mid = (low + high) / dec!(2);
        best = compute_tax(&params.with_gross(mid));

        if (best.net_income - target_net).abs() < CONVERGENCE_TOLERANCE {
            return InverseResult { result: best, approximate: false, iterations };
        }
        if best.net_income < target_net {
            low = mid;
        } else {
            high = mid;
        }
    }

    warn!(
        target_net = %target_net,
        reached_net = %best.net_income,
        "net-to-gross search did not converge within the iteration budget; \
         returning best-effort result"
    );
    InverseResult { result: best, approximate: true, iterations }
}

/// Grows the upper bound geometrically until it brackets the target.
///
/// If the ceiling is hit first the search proceeds with the widest interval
/// available and the caller sees an approximate result.
fn grow_upper_bound(
    target_net: Decimal,
    params: &NetTaxInput,
) -> Decimal {
    let mut high = min(clamp_non_negative(target_net) * dec!(2), GROSS_SAFETY_CEILING);

    loop {
        let net = compute_tax(&params.with_gross(high)).net_income;
        if net >= target_net || high >= GROSS_SAFETY_CEILING {
            return high;
        }
        high = min(high * UPPER_BOUND_GROWTH, GROSS_SAFETY_CEILING);
    }
}
