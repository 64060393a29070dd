mod bracket_table;
mod breakdown;
mod request;
mod tax_bracket;

pub use bracket_table::{BracketTable, BracketTableError};
pub use breakdown::PayeBreakdown;
pub use request::{CalculationRequest, PayeInput};
pub use tax_bracket::TaxBracket;
