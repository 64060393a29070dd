//! Bracket table configuration for the PAYE calculator.
//!
//! Bracket schedules are data, not code: they ship as CSV and are parsed
//! into a [`paye_core::BracketTable`] at startup. The statutory Ghana
//! schedule is embedded in the crate; hosts that need other years load
//! their own CSV through [`BracketLoader`].

pub mod loader;

pub use loader::{BracketLoader, BracketLoaderError, BracketRecord};

use paye_core::BracketTable;

const GHANA_BRACKETS_CSV: &str = include_str!("../data/ghana_paye_brackets.csv");

/// Builds the statutory Ghana bracket table shipped with the crate.
///
/// # Errors
///
/// Returns [`BracketLoaderError`] only if the embedded CSV is malformed,
/// which the crate's own tests rule out.
pub fn statutory_table() -> Result<BracketTable, BracketLoaderError> {
    let records = BracketLoader::parse(GHANA_BRACKETS_CSV.as_bytes())?;
    BracketLoader::build(&records)
}
