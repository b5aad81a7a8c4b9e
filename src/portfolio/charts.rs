//! Chart series derived from performance and peer responses.

use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::format::format_short_date;
use crate::models::number::parse_decimal;
use crate::models::{FundPerformanceData, PeerComparisonData};

/// Number of peers plotted next to the current fund.
pub const PEER_CHART_LIMIT: usize = 4;

/// Chart labels longer than this are shortened.
pub const CHART_LABEL_MAX_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformancePoint {
    /// Short axis label, e.g. `Jan 5`.
    pub label: String,
    pub nav_price: f64,
    pub total_return: f64,
    pub daily_return: f64,
}

/// One point per row in the order given; missing values plot as zero.
pub fn performance_series(data: &[FundPerformanceData]) -> Vec<PerformancePoint> {
    data.iter()
        .map(|row| PerformancePoint {
            label: format_short_date(&row.date),
            nav_price: parse_decimal(&row.nav_price)
                .and_then(|d| d.to_f64())
                .unwrap_or(0.0),
            total_return: row.total_return.unwrap_or(0.0),
            daily_return: row.daily_return.unwrap_or(0.0),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerBar {
    pub label: String,
    pub performance: f64,
    pub is_current_fund: bool,
}

/// Shorten `name` to 17 characters plus `...` when it exceeds the label width.
pub fn truncate_label(name: &str) -> String {
    if name.chars().count() > CHART_LABEL_MAX_CHARS {
        let head: String = name.chars().take(CHART_LABEL_MAX_CHARS - 3).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

/// Bars for the peer comparison chart: the current fund first, then the
/// first [`PEER_CHART_LIMIT`] peers as sent.
///
/// Returns an empty series when there are no peers, so renderers can show
/// their "no data" state.
pub fn peer_comparison_series(
    fund_name: &str,
    fund_performance: Option<f64>,
    peers: &[PeerComparisonData],
) -> Vec<PeerBar> {
    if peers.is_empty() {
        return Vec::new();
    }

    std::iter::once(PeerBar {
        label: truncate_label(fund_name),
        performance: fund_performance.unwrap_or(0.0),
        is_current_fund: true,
    })
    .chain(peers.iter().take(PEER_CHART_LIMIT).map(|peer| PeerBar {
        label: truncate_label(&peer.fund_name),
        performance: peer.total_return.unwrap_or(0.0),
        is_current_fund: false,
    }))
    .collect()
}
