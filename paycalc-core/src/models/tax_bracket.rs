use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One marginal-rate band. `max_income` of `None` is the unbounded top band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            tax_rate,
        }
    }
}

/// Reasons a bracket list is rejected by [`BracketSchedule::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketError {
    #[error("bracket schedule is empty")]
    Empty,

    #[error("first bracket must start at 0, starts at {0}")]
    NonZeroStart(Decimal),

    #[error("bracket {index} has non-positive width ({min}..{max})")]
    NonPositiveWidth {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    #[error("bracket {index} starts at {found}, expected {expected}")]
    NotContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd(usize),

    #[error("last bracket must be unbounded")]
    BoundedTop,

    #[error("bracket {index} rate must be in [0, 1), got {rate}")]
    RateOutOfRange { index: usize, rate: Decimal },
}

/// A validated, ascending, gap-free list of brackets.
///
/// Construction is the only place bracket invariants are checked; every
/// calculator can rely on them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Validates `brackets` and wraps them.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError`] if the list is empty, does not start at zero,
    /// has gaps, overlaps or zero/negative-width bands, has an unbounded band
    /// anywhere but last, or any rate outside `[0, 1)`.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketError> {
        let first = brackets.first().ok_or(BracketError::Empty)?;
        if first.min_income != Decimal::ZERO {
            return Err(BracketError::NonZeroStart(first.min_income));
        }

        let last_index = brackets.len() - 1;
        let mut expected_min = Decimal::ZERO;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate >= Decimal::ONE {
                return Err(BracketError::RateOutOfRange {
                    index,
                    rate: bracket.tax_rate,
                });
            }
            if bracket.min_income != expected_min {
                return Err(BracketError::NotContiguous {
                    index,
                    expected: expected_min,
                    found: bracket.min_income,
                });
            }
            match bracket.max_income {
                Some(max) if max <= bracket.min_income => {
                    return Err(BracketError::NonPositiveWidth {
                        index,
                        min: bracket.min_income,
                        max,
                    });
                }
                Some(_) if index == last_index => return Err(BracketError::BoundedTop),
                Some(max) => expected_min = max,
                None if index != last_index => {
                    return Err(BracketError::UnboundedBeforeEnd(index));
                }
                None => {}
            }
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxBracket> {
        self.brackets.iter()
    }
}
