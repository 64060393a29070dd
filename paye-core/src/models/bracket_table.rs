use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TaxBracket;

/// Errors raised when a per-year bracket sequence violates the table shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BracketTableError {
    /// A tax year was registered with no brackets at all.
    #[error("tax year '{0}' has no brackets")]
    EmptyYear(String),

    /// A bracket's threshold does not strictly increase over its predecessor.
    #[error(
        "tax year '{year}': bracket {index} threshold {threshold} does not increase past {previous}"
    )]
    NonIncreasingThreshold {
        year: String,
        index: usize,
        threshold: Decimal,
        previous: Decimal,
    },

    /// An unbounded bracket appeared before the end of the sequence.
    #[error("tax year '{year}': bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeLast { year: String, index: usize },

    /// The last bracket has an upper threshold instead of being open-ended.
    #[error("tax year '{year}': the final bracket must be unbounded")]
    BoundedFinalBracket { year: String },

    /// A bracket carries a negative rate.
    #[error("tax year '{year}': bracket {index} has negative rate {rate}")]
    NegativeRate {
        year: String,
        index: usize,
        rate: Decimal,
    },
}

/// Graduated tax schedules keyed by tax year.
///
/// Built once at process start and treated as read-only afterwards. Each
/// year holds its brackets in ascending threshold order with exactly the
/// last bracket unbounded; [`BracketTable::insert_year`] rejects anything
/// else. Rates are conventionally non-decreasing across a year but that is
/// not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    years: BTreeMap<String, Vec<TaxBracket>>,
}

impl BracketTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the bracket sequence for a tax year, replacing any
    /// previously registered sequence for the same year.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] if the sequence is empty, thresholds
    /// are not strictly increasing, any bracket other than the last is
    /// unbounded, the last bracket is bounded, or any rate is negative.
    pub fn insert_year(
        &mut self,
        year: impl Into<String>,
        brackets: Vec<TaxBracket>,
    ) -> Result<(), BracketTableError> {
        let year = year.into();
        Self::validate(&year, &brackets)?;
        self.years.insert(year, brackets);
        Ok(())
    }

    /// Returns the bracket sequence for `year`, or `None` if the year is
    /// not covered by this table.
    pub fn brackets_for(&self, year: &str) -> Option<&[TaxBracket]> {
        self.years.get(year).map(Vec::as_slice)
    }

    /// Tax years covered by this table, in ascending key order.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.years.keys().map(String::as_str)
    }

    /// Whether the table covers any year at all.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    fn validate(
        year: &str,
        brackets: &[TaxBracket],
    ) -> Result<(), BracketTableError> {
        let Some(last_index) = brackets.len().checked_sub(1) else {
            return Err(BracketTableError::EmptyYear(year.to_string()));
        };

        let mut previous: Option<Decimal> = None;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO {
                return Err(BracketTableError::NegativeRate {
                    year: year.to_string(),
                    index,
                    rate: bracket.rate,
                });
            }

            match bracket.threshold {
                Some(threshold) => {
                    if index == last_index {
                        return Err(BracketTableError::BoundedFinalBracket {
                            year: year.to_string(),
                        });
                    }
                    if let Some(previous) = previous {
                        if threshold <= previous {
                            return Err(BracketTableError::NonIncreasingThreshold {
                                year: year.to_string(),
                                index,
                                threshold,
                                previous,
                            });
                        }
                    }
                    previous = Some(threshold);
                }
                None => {
                    if index != last_index {
                        return Err(BracketTableError::UnboundedBeforeLast {
                            year: year.to_string(),
                            index,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
