use serde::{Deserialize, Serialize};

use super::number::{deserialize_decimal_string, deserialize_optional_decimal_string, deserialize_optional_f64};
use super::FundId;

/// One NAV observation in a fund's performance series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundPerformanceData {
    pub date: String,
    #[serde(deserialize_with = "deserialize_decimal_string")]
    pub nav_price: String,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub total_return: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub daily_return: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal_string")]
    pub assets_under_management: Option<String>,
}

/// Response of `GET /api/v1/funds/{id}/performance`.
///
/// `performance_data` keeps the order the backend sent (oldest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundPerformanceResponse {
    pub fund_id: FundId,
    pub fund_name: String,
    #[serde(default)]
    pub performance_data: Vec<FundPerformanceData>,
    /// Echo of the requested window.
    pub period_days: u32,
}
