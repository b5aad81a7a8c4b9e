use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::number::{
    deserialize_decimal_string, deserialize_optional_decimal_string, deserialize_optional_f64,
    parse_decimal,
};

/// Backend identifier for a fund. Zero is never a valid id and is used by
/// callers to mean "not known yet".
pub type FundId = u64;

/// A fund as returned by `GET /api/v1/funds/` and `GET /api/v1/funds/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub id: FundId,
    pub name: String,
    /// Strategy slug, e.g. `sector_specific`.
    pub strategy: String,
    pub inception_date: String,
    #[serde(default)]
    pub manager_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Expense ratio as a percentage, as a decimal string.
    #[serde(default, deserialize_with = "deserialize_optional_decimal_string")]
    pub expense_ratio: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,

    /// Amount as string to avoid floating point precision issues
    #[serde(deserialize_with = "deserialize_decimal_string")]
    pub total_aum: String,
    #[serde(default, deserialize_with = "deserialize_optional_decimal_string")]
    pub current_value: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal_string")]
    pub unrealized_gain_loss: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal_string")]
    pub unrealized_gain_loss_percent: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub total_return_percent: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub daily_return_percent: Option<f64>,

    #[serde(default)]
    pub holdings_count: u64,
}

impl Fund {
    /// Parsed `total_aum`, or `None` if the backend sent something malformed.
    pub fn total_aum_value(&self) -> Option<Decimal> {
        parse_decimal(&self.total_aum)
    }

    /// Parsed `current_value` when present and well-formed.
    pub fn current_value_value(&self) -> Option<Decimal> {
        self.current_value.as_deref().and_then(parse_decimal)
    }

    /// Current market value, falling back to `total_aum` when the backend has
    /// no usable valuation.
    pub fn current_value_or_aum(&self) -> Option<Decimal> {
        self.current_value_value().or_else(|| self.total_aum_value())
    }

    pub fn unrealized_gain_loss_value(&self) -> Option<Decimal> {
        self.unrealized_gain_loss.as_deref().and_then(parse_decimal)
    }
}
