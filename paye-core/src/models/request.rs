use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// One form submission as received from the host layer.
///
/// Field names follow the documented boundary contract (camelCase on the
/// wire). Amount fields arrive as JSON numbers or as raw form strings; a
/// blank or whitespace-only string counts as not supplied. Parsing and
/// range checks happen in [`crate::calculator::PayeCalculator::calculate`],
/// so a request with garbage in an amount field still deserializes and is
/// rejected with a field-keyed message instead of a serde error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    pub tax_year: String,

    #[serde(default, deserialize_with = "deserialize_raw_amount")]
    pub basic_income: Option<String>,

    #[serde(default, deserialize_with = "deserialize_raw_amount")]
    pub allowances: Option<String>,

    #[serde(default, deserialize_with = "deserialize_raw_amount")]
    pub tax_relief: Option<String>,
}

/// Accepts a JSON number or string for an amount field.
///
/// Numbers are normalized through [`Decimal`] so the validation layer only
/// ever sees decimal text. Strings pass through trimmed and unparsed;
/// blank strings collapse to `None`.
fn deserialize_raw_amount<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(Decimal),
        Text(String),
    }

    let raw: Option<RawAmount> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawAmount::Number(value)) => Some(value.to_string()),
        Some(RawAmount::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => None,
    })
}

/// Validated numeric input for one computation.
///
/// Produced by the validation layer; the optional amounts have already
/// defaulted to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeInput {
    pub basic_income: Decimal,
    pub allowances: Decimal,
    pub tax_relief: Decimal,
}
