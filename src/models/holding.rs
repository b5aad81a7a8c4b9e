use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::number::{deserialize_decimal_string, deserialize_optional_decimal_string, parse_decimal};
use super::FundId;

/// A single security position owned by a fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: u64,
    pub fund_id: FundId,
    pub ticker: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub market_cap: Option<u64>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(deserialize_with = "deserialize_decimal_string")]
    pub shares: String,
    #[serde(deserialize_with = "deserialize_decimal_string")]
    pub purchase_price: String,
    #[serde(deserialize_with = "deserialize_decimal_string")]
    pub cost_basis: String,

    #[serde(default, deserialize_with = "deserialize_optional_decimal_string")]
    pub current_price: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal_string")]
    pub current_value: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal_string")]
    pub unrealized_gain_loss: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal_string")]
    pub unrealized_gain_loss_percent: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal_string")]
    pub weight_in_fund: Option<String>,
}

impl Holding {
    pub fn cost_basis_value(&self) -> Option<Decimal> {
        parse_decimal(&self.cost_basis)
    }

    /// Current market value, falling back to `cost_basis` when no quote is
    /// available.
    pub fn current_value_or_cost_basis(&self) -> Option<Decimal> {
        self.current_value
            .as_deref()
            .and_then(parse_decimal)
            .or_else(|| self.cost_basis_value())
    }

    pub fn shares_value(&self) -> Option<Decimal> {
        parse_decimal(&self.shares)
    }
}
