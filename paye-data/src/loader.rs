use std::collections::BTreeMap;
use std::io::Read;

use paye_core::{BracketTable, BracketTableError, TaxBracket};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading bracket data.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid bracket table: {0}")]
    Table(#[from] BracketTableError),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket CSV file.
///
/// The CSV format:
/// - `tax_year`: the tax year key (e.g., 2024)
/// - `threshold`: the cumulative upper bound of the band (empty for the
///   final unbounded band)
/// - `rate`: the marginal rate as a percentage (e.g., 17.5)
///
/// Rows for a year must appear in ascending threshold order with the
/// unbounded row last.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub threshold: Option<Decimal>,
    pub rate: Decimal,
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

/// Loader for bracket table data from CSV files.
///
/// Parsing and table construction are separate steps so callers can
/// inspect or report on the raw records before committing to a table.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file
    /// or a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a [`BracketTable`] from parsed records.
    ///
    /// Rows are grouped by tax year in file order; each year's sequence is
    /// then checked against the table invariants.
    ///
    /// # Errors
    ///
    /// Returns [`BracketLoaderError::Table`] if any year's sequence is
    /// malformed (out-of-order thresholds, a bounded final band, a
    /// negative rate).
    pub fn build(records: &[BracketRecord]) -> Result<BracketTable, BracketLoaderError> {
        let mut grouped: BTreeMap<&str, Vec<TaxBracket>> = BTreeMap::new();
        for record in records {
            grouped
                .entry(record.tax_year.as_str())
                .or_default()
                .push(TaxBracket {
                    threshold: record.threshold,
                    rate: record.rate,
                });
        }

        let mut table = BracketTable::new();
        for (year, brackets) in grouped {
            table.insert_year(year, brackets)?;
        }

        Ok(table)
    }
}
