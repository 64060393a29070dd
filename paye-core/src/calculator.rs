//! Submission validation and orchestration.
//!
//! [`PayeCalculator`] is the entry point a host layer calls: it owns the
//! bracket table, checks one [`CalculationRequest`] against it, and runs
//! the worksheet. Every failing field is reported in the same pass as a
//! field-keyed message map; on any failure the computation does not run and
//! no partial result exists.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::PayeWorksheet;
use crate::models::{BracketTable, CalculationRequest, PayeBreakdown, PayeInput, TaxBracket};

/// Boundary fields a submission can fail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BasicIncome,
    Allowances,
    TaxRelief,
    TaxYear,
}

impl Field {
    /// Field name as the host layer knows it.
    pub fn name(self) -> &'static str {
        match self {
            Self::BasicIncome => "basicIncome",
            Self::Allowances => "allowances",
            Self::TaxRelief => "taxRelief",
            Self::TaxYear => "taxYear",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let label = match self {
            Self::BasicIncome => "Basic income",
            Self::Allowances => "Allowances",
            Self::TaxRelief => "Tax relief",
            Self::TaxYear => "Tax year",
        };
        f.write_str(label)
    }
}

/// A single rejected submission field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required amount was not supplied.
    #[error("{0} is required")]
    Missing(Field),

    /// A supplied amount does not parse as a decimal number.
    #[error("{0} is not a valid amount")]
    InvalidAmount(Field),

    /// A supplied amount is negative.
    #[error("{0} cannot be negative")]
    NegativeAmount(Field),

    /// No bracket table covers the requested year. Never silently
    /// defaulted to another year.
    #[error("No tax brackets defined for year '{0}'")]
    UnknownTaxYear(String),
}

impl ValidationError {
    /// The boundary field this error is keyed under.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing(field) | Self::InvalidAmount(field) | Self::NegativeAmount(field) => {
                field.name()
            }
            Self::UnknownTaxYear(_) => Field::TaxYear.name(),
        }
    }
}

/// All failures from one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    fn push(
        &mut self,
        error: ValidationError,
    ) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The individual errors, in the order the fields were checked.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Field-keyed messages for display next to each input, e.g.
    /// `"basicIncome" → "Basic income is required"`.
    pub fn field_messages(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|error| (error.field().to_string(), error.to_string()))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Stateless per-submission PAYE calculator over an immutable bracket
/// table.
///
/// One instance serves any number of independent calls; nothing is written
/// between submissions, so sharing it across threads needs no locking.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::{BracketTable, CalculationRequest, PayeCalculator, TaxBracket};
///
/// let mut table = BracketTable::new();
/// table
///     .insert_year(
///         "2024",
///         vec![
///             TaxBracket { threshold: Some(dec!(402)), rate: dec!(0) },
///             TaxBracket { threshold: Some(dec!(550)), rate: dec!(5) },
///             TaxBracket { threshold: None, rate: dec!(10) },
///         ],
///     )
///     .unwrap();
///
/// let calculator = PayeCalculator::new(table);
/// let request = CalculationRequest {
///     tax_year: "2024".to_string(),
///     basic_income: Some("1000".to_string()),
///     allowances: None,
///     tax_relief: None,
/// };
///
/// let breakdown = calculator.calculate(&request).unwrap();
/// assert_eq!(breakdown.ssnit_contribution, dec!(55.000));
/// ```
#[derive(Debug, Clone)]
pub struct PayeCalculator {
    table: BracketTable,
}

impl PayeCalculator {
    /// Creates a calculator over the given bracket table.
    pub fn new(table: BracketTable) -> Self {
        Self { table }
    }

    /// The bracket table this calculator answers from. Hosts use it to
    /// populate their year selector.
    pub fn table(&self) -> &BracketTable {
        &self.table
    }

    /// Validates one submission and, if it is clean, runs the worksheet.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] carrying every failing field if basic
    /// income is missing, any amount is non-numeric or negative, or the
    /// requested tax year has no bracket table.
    pub fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<PayeBreakdown, ValidationErrors> {
        let (input, brackets) = self.validate(request)?;

        debug!(
            tax_year = %request.tax_year,
            basic_income = %input.basic_income,
            "computing PAYE breakdown"
        );

        Ok(PayeWorksheet::new(brackets).calculate(&input))
    }

    fn validate<'a>(
        &'a self,
        request: &CalculationRequest,
    ) -> Result<(PayeInput, &'a [TaxBracket]), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let basic_income = match &request.basic_income {
            Some(raw) => parse_amount(raw, Field::BasicIncome, &mut errors),
            None => {
                errors.push(ValidationError::Missing(Field::BasicIncome));
                None
            }
        };
        let allowances = parse_optional_amount(&request.allowances, Field::Allowances, &mut errors);
        let tax_relief = parse_optional_amount(&request.tax_relief, Field::TaxRelief, &mut errors);

        let brackets = match self.table.brackets_for(&request.tax_year) {
            Some(brackets) => Some(brackets),
            None => {
                errors.push(ValidationError::UnknownTaxYear(request.tax_year.clone()));
                None
            }
        };

        match (basic_income, allowances, tax_relief, brackets) {
            (Some(basic_income), Some(allowances), Some(tax_relief), Some(brackets))
                if errors.is_empty() =>
            {
                Ok((
                    PayeInput {
                        basic_income,
                        allowances,
                        tax_relief,
                    },
                    brackets,
                ))
            }
            _ => Err(errors),
        }
    }
}

fn parse_amount(
    raw: &str,
    field: Field,
    errors: &mut ValidationErrors,
) -> Option<Decimal> {
    match raw.parse::<Decimal>() {
        Ok(value) if value < Decimal::ZERO => {
            errors.push(ValidationError::NegativeAmount(field));
            None
        }
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(ValidationError::InvalidAmount(field));
            None
        }
    }
}

/// Optional amounts default to zero when absent.
fn parse_optional_amount(
    raw: &Option<String>,
    field: Field,
    errors: &mut ValidationErrors,
) -> Option<Decimal> {
    match raw {
        Some(raw) => parse_amount(raw, field, errors),
        None => Some(Decimal::ZERO),
    }
}
