//! Effective-dated statutory wage schedules and insurance caps.
//!
//! Social and health insurance share one national cap of 20× the statutory
//! base salary; unemployment insurance is capped at 20× the regional
//! minimum wage. Both underlying figures change over time, so each is an
//! ordered `(effective_from, value)` schedule resolved by a
//! latest-entry-not-after-date lookup. Schedule changes are month-aligned,
//! so entries are keyed by `(year, month)`.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::Region;

/// Multiple of the reference wage that caps an insurance base.
const CAP_MULTIPLE: Decimal = dec!(20);

/// Statutory base salary ("lương cơ sở") schedule, monthly VND.
static BASE_SALARY: [((i32, u32), Decimal); 3] = [
    ((2019, 7), dec!(1_490_000)),
    ((2023, 7), dec!(1_800_000)),
    ((2024, 7), dec!(2_340_000)),
];

/// Regional minimum wage schedule, monthly VND, regions I–IV.
static REGIONAL_MINIMUM_WAGE: [((i32, u32), [Decimal; 4]); 3] = [
    ((2022, 7), [dec!(4_680_000), dec!(4_160_000), dec!(3_640_000), dec!(3_250_000)]),
    ((2024, 7), [dec!(4_960_000), dec!(4_410_000), dec!(3_860_000), dec!(3_450_000)]),
    ((2026, 1), [dec!(5_310_000), dec!(4_730_000), dec!(4_140_000), dec!(3_700_000)]),
];

/// Latest schedule entry in effect at `(year, month)`.
///
/// Queries earlier than the first entry fall back to the first entry, so
/// the lookup stays total over any date.
fn schedule_at<T>(
    entries: &'static [((i32, u32), T)],
    year: i32,
    month: u32,
) -> &'static T {
    let mut current = &entries[0].1;
    for (effective_from, value) in entries {
        if *effective_from <= (year, month) {
            current = value;
        } else {
            break;
        }
    }
    current
}

/// Statutory base salary in effect for the given settlement month.
pub fn base_salary_for_month(
    year: i32,
    month: u32,
) -> Decimal {
    *schedule_at(&BASE_SALARY, year, month)
}

/// Regional minimum wage in effect for the given settlement month.
pub fn minimum_wage_for_month(
    region: Region,
    year: i32,
    month: u32,
) -> Decimal {
    schedule_at(&REGIONAL_MINIMUM_WAGE, year, month)[region.index()]
}

/// National salary cap for social and health insurance on a date.
pub fn social_insurance_cap(date: NaiveDate) -> Decimal {
    social_insurance_cap_for_month(date.year(), date.month())
}

pub fn social_insurance_cap_for_month(
    year: i32,
    month: u32,
) -> Decimal {
    base_salary_for_month(year, month) * CAP_MULTIPLE
}

/// Per-region salary cap for unemployment insurance on a date.
pub fn unemployment_insurance_cap(
    date: NaiveDate,
    region: Region,
) -> Decimal {
    unemployment_insurance_cap_for_month(region, date.year(), date.month())
}

pub fn unemployment_insurance_cap_for_month(
    region: Region,
    year: i32,
    month: u32,
) -> Decimal {
    minimum_wage_for_month(region, year, month) * CAP_MULTIPLE
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn base_salary_picks_latest_entry_not_after_month() {
        assert_eq!(base_salary_for_month(2023, 6), dec!(1_490_000));
        assert_eq!(base_salary_for_month(2023, 7), dec!(1_800_000));
        assert_eq!(base_salary_for_month(2024, 6), dec!(1_800_000));
        assert_eq!(base_salary_for_month(2024, 7), dec!(2_340_000));
        assert_eq!(base_salary_for_month(2026, 1), dec!(2_340_000));
    }

    #[test]
    fn queries_before_first_entry_use_first_entry() {
        assert_eq!(base_salary_for_month(2018, 1), dec!(1_490_000));
        assert_eq!(minimum_wage_for_month(Region::I, 2020, 1), dec!(4_680_000));
    }

    #[test]
    fn minimum_wage_varies_by_region_and_date() {
        assert_eq!(minimum_wage_for_month(Region::I, 2025, 1), dec!(4_960_000));
        assert_eq!(minimum_wage_for_month(Region::IV, 2025, 1), dec!(3_450_000));
        assert_eq!(minimum_wage_for_month(Region::I, 2026, 1), dec!(5_310_000));
    }

    #[test]
    fn social_cap_is_twenty_times_base_salary() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(social_insurance_cap(date), dec!(46_800_000));
    }

    #[test]
    fn unemployment_cap_is_twenty_times_regional_minimum() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(unemployment_insurance_cap(date, Region::I), dec!(99_200_000));
        assert_eq!(unemployment_insurance_cap(date, Region::IV), dec!(69_000_000));
    }
}
