use serde::{Deserialize, Serialize};

use super::number::{deserialize_optional_decimal_string, deserialize_optional_f64};
use super::FundId;

/// A comparable fund in the same benchmark category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerComparisonData {
    pub fund_id: FundId,
    pub fund_name: String,
    pub benchmark_category: String,
    #[serde(default, deserialize_with = "deserialize_optional_decimal_string")]
    pub total_aum: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal_string")]
    pub expense_ratio: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub total_return: Option<f64>,
}

/// Response of `GET /api/v1/funds/{id}/peers`.
///
/// Peers are not ranked by the client; display helpers decide how many to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerComparisonResponse {
    pub fund_id: FundId,
    pub fund_name: String,
    pub fund_strategy: String,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub fund_performance: Option<f64>,
    #[serde(default)]
    pub peers: Vec<PeerComparisonData>,
}
