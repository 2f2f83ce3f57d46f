//! Mandatory insurance contributions with salary caps.
//!
//! Social insurance (BHXH, 8%) and health insurance (BHYT, 1.5%) share one
//! national cap of 20× the statutory base salary; unemployment insurance
//! (BHTN, 1%) is capped at 20× the regional minimum wage. Both caps are
//! date-dependent, resolved through [`crate::tables::wages`].
//!
//! No rounding happens here; rounding to display precision is a formatting
//! concern outside the engine.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::min;
use crate::models::{InsuranceOptions, Region};
use crate::tables::wages;

/// Employee share of the social insurance contribution.
pub const SOCIAL_INSURANCE_RATE: Decimal = dec!(0.08);

/// Employee share of the health insurance contribution.
pub const HEALTH_INSURANCE_RATE: Decimal = dec!(0.015);

/// Employee share of the unemployment insurance contribution.
pub const UNEMPLOYMENT_INSURANCE_RATE: Decimal = dec!(0.01);

/// Per-line insurance contributions and their total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceDetail {
    pub social: Decimal,
    pub health: Decimal,
    pub unemployment: Decimal,
    pub total: Decimal,
}

impl InsuranceDetail {
    pub fn zero() -> Self {
        Self {
            social: Decimal::ZERO,
            health: Decimal::ZERO,
            unemployment: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Computes the insurance contributions on a salary base.
///
/// Each enabled line is `min(base, cap) * rate`; disabled lines are zero.
/// Disabling all three flags yields a total of exactly zero, equivalent to
/// the product's "no insurance" input.
pub fn compute_insurance(
    base: Decimal,
    region: Region,
    date: NaiveDate,
    options: InsuranceOptions,
) -> InsuranceDetail {
    compute_insurance_for_month(base, region, date.year(), date.month(), options)
}

/// Month-keyed variant used by the period aggregator.
pub fn compute_insurance_for_month(
    base: Decimal,
    region: Region,
    year: i32,
    month: u32,
    options: InsuranceOptions,
) -> InsuranceDetail {
    let social_base = min(base, wages::social_insurance_cap_for_month(year, month));
    let unemployment_base =
        min(base, wages::unemployment_insurance_cap_for_month(region, year, month));

    let social = line(options.social, social_base, SOCIAL_INSURANCE_RATE);
    let health = line(options.health, social_base, HEALTH_INSURANCE_RATE);
    let unemployment = line(options.unemployment, unemployment_base, UNEMPLOYMENT_INSURANCE_RATE);

    InsuranceDetail {
        social,
        health,
        unemployment,
        total: social + health + unemployment,
    }
}

fn line(
    enabled: bool,
    base: Decimal,
    rate: Decimal,
) -> Decimal {
    if enabled { base * rate } else { Decimal::ZERO }
}
