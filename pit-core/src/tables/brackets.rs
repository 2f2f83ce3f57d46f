//! Progressive bracket tables and statutory deduction constants per regime.
//!
//! Amounts are monthly VND. The old law (7 brackets) applies through June
//! 2026; the new law (5 brackets) applies from 2026-07-01. Quick deductions
//! are the published constants making `income * rate - quick_deduction`
//! reproduce the progressive total; [`validate_brackets`] re-derives them
//! from the lower brackets so a typo in the table fails fast in tests
//! instead of skewing every calculation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::models::{Regime, TaxBracket};

/// Errors detected when validating a bracket table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table is empty")]
    Empty,

    #[error("first bracket must start at zero, starts at {0}")]
    NonZeroStart(Decimal),

    #[error("bracket {index} starts at {found}, previous bracket ends at {expected}")]
    Discontinuity {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {index} has rate {rate} outside (0, 1]")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("bracket {0} is unbounded but not the last bracket")]
    UnboundedInterior(usize),

    #[error("last bracket must be unbounded")]
    BoundedTop,

    #[error("bracket {index} quick deduction is {found}, progressive sum requires {expected}")]
    QuickDeductionMismatch {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },
}

/// Bracket table plus deduction constants for one regime.
///
/// Regimes are data, not behavior: the forward engine is a single
/// implementation parameterized by this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegimeConfig {
    pub regime: Regime,
    pub brackets: &'static [TaxBracket],
    /// Monthly personal deduction.
    pub personal_deduction: Decimal,
    /// Monthly deduction per registered dependent.
    pub dependent_deduction: Decimal,
}

static OLD_BRACKETS: [TaxBracket; 7] = [
    TaxBracket {
        min_income: dec!(0),
        max_income: Some(dec!(5_000_000)),
        rate: dec!(0.05),
        quick_deduction: dec!(0),
    },
    TaxBracket {
        min_income: dec!(5_000_000),
        max_income: Some(dec!(10_000_000)),
        rate: dec!(0.10),
        quick_deduction: dec!(250_000),
    },
    TaxBracket {
        min_income: dec!(10_000_000),
        max_income: Some(dec!(18_000_000)),
        rate: dec!(0.15),
        quick_deduction: dec!(750_000),
    },
    TaxBracket {
        min_income: dec!(18_000_000),
        max_income: Some(dec!(32_000_000)),
        rate: dec!(0.20),
        quick_deduction: dec!(1_650_000),
    },
    TaxBracket {
        min_income: dec!(32_000_000),
        max_income: Some(dec!(52_000_000)),
        rate: dec!(0.25),
        quick_deduction: dec!(3_250_000),
    },
    TaxBracket {
        min_income: dec!(52_000_000),
        max_income: Some(dec!(80_000_000)),
        rate: dec!(0.30),
        quick_deduction: dec!(5_850_000),
    },
    TaxBracket {
        min_income: dec!(80_000_000),
        max_income: None,
        rate: dec!(0.35),
        quick_deduction: dec!(9_850_000),
    },
];

static NEW_BRACKETS: [TaxBracket; 5] = [
    TaxBracket {
        min_income: dec!(0),
        max_income: Some(dec!(10_000_000)),
        rate: dec!(0.05),
        quick_deduction: dec!(0),
    },
    TaxBracket {
        min_income: dec!(10_000_000),
        max_income: Some(dec!(30_000_000)),
        rate: dec!(0.10),
        quick_deduction: dec!(500_000),
    },
    TaxBracket {
        min_income: dec!(30_000_000),
        max_income: Some(dec!(60_000_000)),
        rate: dec!(0.20),
        quick_deduction: dec!(3_500_000),
    },
    TaxBracket {
        min_income: dec!(60_000_000),
        max_income: Some(dec!(100_000_000)),
        rate: dec!(0.30),
        quick_deduction: dec!(9_500_000),
    },
    TaxBracket {
        min_income: dec!(100_000_000),
        max_income: None,
        rate: dec!(0.35),
        quick_deduction: dec!(14_500_000),
    },
];

static OLD_CONFIG: RegimeConfig = RegimeConfig {
    regime: Regime::Old,
    brackets: &OLD_BRACKETS,
    personal_deduction: dec!(11_000_000),
    dependent_deduction: dec!(4_400_000),
};

static NEW_CONFIG: RegimeConfig = RegimeConfig {
    regime: Regime::New,
    brackets: &NEW_BRACKETS,
    personal_deduction: dec!(15_500_000),
    dependent_deduction: dec!(6_200_000),
};

/// Bracket table and deduction constants for a regime.
pub fn regime_config(regime: Regime) -> &'static RegimeConfig {
    match regime {
        Regime::Old => &OLD_CONFIG,
        Regime::New => &NEW_CONFIG,
    }
}

/// Validates that a bracket table is sorted, contiguous, covers all income
/// and carries quick deductions consistent with the progressive method.
///
/// This runs at table-construction/test time, never per call: a malformed
/// table is a configuration bug, not a runtime condition.
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), BracketTableError> {
    if brackets.is_empty() {
        return Err(BracketTableError::Empty);
    }
    if brackets[0].min_income != Decimal::ZERO {
        return Err(BracketTableError::NonZeroStart(brackets[0].min_income));
    }

    let mut expected_min = Decimal::ZERO;
    let mut cumulative_tax = Decimal::ZERO;
    let last = brackets.len() - 1;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.min_income != expected_min {
            return Err(BracketTableError::Discontinuity {
                index,
                expected: expected_min,
                found: bracket.min_income,
            });
        }
        if bracket.rate <= Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(BracketTableError::InvalidRate {
                index,
                rate: bracket.rate,
            });
        }

        // quick_deduction = rate * min - cumulative tax at min
        let expected_quick = bracket.rate * bracket.min_income - cumulative_tax;
        if bracket.quick_deduction != expected_quick {
            return Err(BracketTableError::QuickDeductionMismatch {
                index,
                expected: expected_quick,
                found: bracket.quick_deduction,
            });
        }

        match bracket.max_income {
            Some(max) => {
                if index == last {
                    return Err(BracketTableError::BoundedTop);
                }
                cumulative_tax += (max - bracket.min_income) * bracket.rate;
                expected_min = max;
            }
            None => {
                if index != last {
                    return Err(BracketTableError::UnboundedInterior(index));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn old_regime_table_is_valid() {
        assert_eq!(validate_brackets(&OLD_BRACKETS), Ok(()));
    }

    #[test]
    fn new_regime_table_is_valid() {
        assert_eq!(validate_brackets(&NEW_BRACKETS), Ok(()));
    }

    #[test]
    fn tables_cover_income_without_gaps() {
        for regime in [Regime::Old, Regime::New] {
            let brackets = regime_config(regime).brackets;
            assert_eq!(brackets[0].min_income, Decimal::ZERO);
            assert_eq!(brackets[brackets.len() - 1].max_income, None);
            for pair in brackets.windows(2) {
                assert_eq!(pair[0].max_income, Some(pair[1].min_income));
            }
        }
    }

    #[test]
    fn old_regime_has_seven_brackets_new_has_five() {
        assert_eq!(regime_config(Regime::Old).brackets.len(), 7);
        assert_eq!(regime_config(Regime::New).brackets.len(), 5);
    }

    #[test]
    fn deduction_constants_per_regime() {
        let old = regime_config(Regime::Old);
        assert_eq!(old.personal_deduction, dec!(11_000_000));
        assert_eq!(old.dependent_deduction, dec!(4_400_000));

        let new = regime_config(Regime::New);
        assert_eq!(new.personal_deduction, dec!(15_500_000));
        assert_eq!(new.dependent_deduction, dec!(6_200_000));
    }

    #[test]
    fn validate_rejects_empty_table() {
        assert_eq!(validate_brackets(&[]), Err(BracketTableError::Empty));
    }

    #[test]
    fn validate_rejects_gap_between_brackets() {
        let brackets = [
            TaxBracket {
                min_income: dec!(0),
                max_income: Some(dec!(5_000_000)),
                rate: dec!(0.05),
                quick_deduction: dec!(0),
            },
            TaxBracket {
                min_income: dec!(6_000_000),
                max_income: None,
                rate: dec!(0.10),
                quick_deduction: dec!(350_000),
            },
        ];

        assert_eq!(
            validate_brackets(&brackets),
            Err(BracketTableError::Discontinuity {
                index: 1,
                expected: dec!(5_000_000),
                found: dec!(6_000_000),
            })
        );
    }

    #[test]
    fn validate_rejects_wrong_quick_deduction() {
        let brackets = [
            TaxBracket {
                min_income: dec!(0),
                max_income: Some(dec!(5_000_000)),
                rate: dec!(0.05),
                quick_deduction: dec!(0),
            },
            TaxBracket {
                min_income: dec!(5_000_000),
                max_income: None,
                rate: dec!(0.10),
                quick_deduction: dec!(100_000),
            },
        ];

        assert_eq!(
            validate_brackets(&brackets),
            Err(BracketTableError::QuickDeductionMismatch {
                index: 1,
                expected: dec!(250_000),
                found: dec!(100_000),
            })
        );
    }

    #[test]
    fn validate_rejects_bounded_top_bracket() {
        let brackets = [TaxBracket {
            min_income: dec!(0),
            max_income: Some(dec!(5_000_000)),
            rate: dec!(0.05),
            quick_deduction: dec!(0),
        }];

        assert_eq!(validate_brackets(&brackets), Err(BracketTableError::BoundedTop));
    }
}
