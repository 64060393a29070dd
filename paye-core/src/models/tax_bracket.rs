use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal band of a graduated tax schedule.
///
/// `threshold` is the cumulative upper bound of the band; `None` marks the
/// final "and above" band. `rate` is a percentage (e.g. `17.5` for 17.5%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub threshold: Option<Decimal>,
    pub rate: Decimal,
}
