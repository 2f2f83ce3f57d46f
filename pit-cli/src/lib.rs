//! Input parsing and display helpers for the `pit` command-line tool.
//!
//! The engine itself never parses or formats anything; this crate owns the
//! CSV month-file format, the dependent-window argument syntax and VND
//! display formatting.

use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use pit_core::{DependentWindow, MonthlyIncome};

/// Errors that can occur when reading settlement inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonthFileError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("month {0} is out of range (expected 1-12 or a bonus slot above 12)")]
    InvalidMonth(u32),

    #[error("invalid dependent window '{0}' (expected FROM-TO, e.g. 1-12)")]
    InvalidWindow(String),
}

impl From<csv::Error> for MonthFileError {
    fn from(err: csv::Error) -> Self {
        MonthFileError::CsvParse(err.to_string())
    }
}

/// A single row of the month file.
///
/// Columns:
/// - `month`: 1-12, or above 12 for a bonus slot
/// - `gross_salary`: monthly gross in VND
/// - `bonus`: extra income paid that month (empty for none)
/// - `tax_paid`: manual withholding override (empty to estimate)
#[derive(Debug, Clone, Deserialize, PartialEq)]
struct MonthRecord {
    month: u32,
    gross_salary: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    bonus: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    tax_paid: Option<Decimal>,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Parses a month file into engine entries.
pub fn parse_months<R: Read>(reader: R) -> Result<Vec<MonthlyIncome>, MonthFileError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();

    for record in csv_reader.deserialize::<MonthRecord>() {
        let record = record?;
        if record.month == 0 {
            return Err(MonthFileError::InvalidMonth(record.month));
        }
        entries.push(MonthlyIncome {
            month: record.month,
            gross_salary: record.gross_salary,
            bonus: record.bonus.unwrap_or(Decimal::ZERO),
            tax_paid: record.tax_paid,
        });
    }

    Ok(entries)
}

/// Parses a dependent-window argument: `FROM-TO` (inclusive) or a single
/// month meaning a one-month window.
pub fn parse_dependent_window(s: &str) -> Result<DependentWindow, MonthFileError> {
    let invalid = || MonthFileError::InvalidWindow(s.to_string());

    let (from, to) = match s.split_once('-') {
        Some((from, to)) => (
            from.trim().parse::<u32>().map_err(|_| invalid())?,
            to.trim().parse::<u32>().map_err(|_| invalid())?,
        ),
        None => {
            let month = s.trim().parse::<u32>().map_err(|_| invalid())?;
            (month, month)
        }
    };

    if from == 0 || to < from {
        return Err(invalid());
    }
    Ok(DependentWindow { from_month: from, to_month: to })
}

/// Formats a VND amount with thousands separators, rounded to whole dong.
pub fn format_vnd(amount: Decimal) -> String {
    let rounded =
        amount.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    let raw = rounded.abs().to_string();
    let digits = raw.split('.').next().unwrap_or(&raw);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (position, ch) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < Decimal::ZERO {
        format!("-{grouped} VND")
    } else {
        format!("{grouped} VND")
    }
}
