use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;

/// Derived monetary results of one submission.
///
/// All values are exact; nothing is rounded during the calculation. Hosts
/// display amounts at two decimal places, which [`PayeBreakdown::rounded`]
/// provides. A breakdown has no identity of its own and is replaced
/// wholesale by the next submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayeBreakdown {
    pub gross_income: Decimal,
    pub ssnit_contribution: Decimal,
    pub taxable_income: Decimal,
    pub paye_tax: Decimal,
    pub net_income: Decimal,
}

impl PayeBreakdown {
    /// Returns a copy with every amount rounded to two decimal places,
    /// half-up. Display convention only; keep the unrounded breakdown for
    /// any further arithmetic.
    pub fn rounded(&self) -> Self {
        Self {
            gross_income: round_half_up(self.gross_income),
            ssnit_contribution: round_half_up(self.ssnit_contribution),
            taxable_income: round_half_up(self.taxable_income),
            paye_tax: round_half_up(self.paye_tax),
            net_income: round_half_up(self.net_income),
        }
    }
}
