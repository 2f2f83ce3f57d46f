use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// First calendar year affected by the new PIT law.
pub const TRANSITION_YEAR: i32 = 2026;

/// First month of [`TRANSITION_YEAR`] taxed under the new law.
pub const TRANSITION_MONTH: u32 = 7;

/// One of the two mutually exclusive PIT regimes.
///
/// The regimes differ only in bracket tables and statutory deduction
/// constants; both are carried as data in [`crate::tables::brackets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// 7-bracket law in force before July 2026.
    Old,
    /// 5-bracket law effective 2026-07-01.
    New,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "old" => Some(Self::Old),
            "new" => Some(Self::New),
            _ => None,
        }
    }

    /// Regime in force for a given settlement month.
    ///
    /// Months beyond 12 are bonus slots; their nominal month is compared
    /// against the transition boundary as-is.
    pub fn for_month(
        year: i32,
        month: u32,
    ) -> Self {
        if year > TRANSITION_YEAR || (year == TRANSITION_YEAR && month >= TRANSITION_MONTH) {
            Self::New
        } else {
            Self::Old
        }
    }

    /// Regime in force on a given calendar date.
    pub fn for_date(date: NaiveDate) -> Self {
        Self::for_month(date.year(), date.month())
    }
}
