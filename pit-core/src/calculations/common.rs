//! Shared helpers for the calculation modules.

use rust_decimal::Decimal;

/// Clamps a value to zero when negative.
///
/// Taxable income and settlement intermediates never go below zero; the
/// engine clamps instead of erroring.
pub fn clamp_non_negative(value: Decimal) -> Decimal {
    if value < Decimal::ZERO { Decimal::ZERO } else { value }
}

/// Returns the smaller of two decimal values.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}
