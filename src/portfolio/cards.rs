//! Display-ready records for the dashboard, fund detail page and preview.
//!
//! Everything here is already formatted; renderers only lay it out.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::format::{
    category_label, format_currency, format_date, format_percent, format_percent_str,
    format_price, format_quantity, strategy_label, NOT_AVAILABLE,
};
use crate::models::number::parse_decimal;
use crate::models::{Fund, FundId, Holding, PeerComparisonData};

use super::PortfolioTotals;

/// Peers listed under the comparison chart.
pub const PEER_HIGHLIGHT_LIMIT: usize = 3;

/// Holdings shown in the fund preview.
pub const PREVIEW_HOLDINGS_LIMIT: usize = 6;

fn currency_or_na(value: Option<Decimal>) -> String {
    value
        .map(|v| format_currency(v))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Expense ratio as `0.75%`; a missing ratio shows as `0.00%`.
pub fn format_expense_ratio(value: Option<&str>) -> String {
    let ratio = value
        .and_then(parse_decimal)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let s = ratio.to_string();
    let (int_part, frac) = s.split_once('.').unwrap_or((s.as_str(), ""));
    format!("{int_part}.{frac:0<2}%")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundCard {
    pub id: FundId,
    pub name: String,
    pub strategy: String,
    pub current_value: String,
    pub total_aum: String,
    pub total_return: String,
    pub daily_return: String,
    pub holdings_count: u64,
}

impl FundCard {
    pub fn from_fund(fund: &Fund) -> Self {
        Self {
            id: fund.id,
            name: fund.name.clone(),
            strategy: strategy_label(&fund.strategy),
            current_value: currency_or_na(fund.current_value_or_aum()),
            total_aum: format_currency(fund.total_aum.as_str()),
            total_return: format_percent(fund.total_return_percent),
            daily_return: format_percent(fund.daily_return_percent),
            holdings_count: fund.holdings_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_aum: String,
    pub current_value: String,
    pub total_funds: usize,
    pub total_holdings: u64,
    pub portfolio_return: String,
    pub funds: Vec<FundCard>,
}

impl DashboardSummary {
    pub fn from_funds(funds: &[Fund]) -> Self {
        let totals = PortfolioTotals::from_funds(funds);
        Self {
            total_aum: format_currency(totals.total_aum),
            current_value: format_currency(totals.current_value),
            total_funds: totals.total_funds,
            total_holdings: totals.total_holdings,
            portfolio_return: format_percent(Some(totals.return_percent_f64())),
            funds: funds.iter().map(FundCard::from_fund).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingRow {
    pub ticker: String,
    pub company_name: Option<String>,
    pub shares: String,
    pub purchase_price: String,
    pub cost_basis: String,
    pub current_value: String,
    pub sector: Option<String>,
}

impl HoldingRow {
    pub fn from_holding(holding: &Holding) -> Self {
        Self {
            ticker: holding.ticker.clone(),
            company_name: holding.company_name.clone(),
            shares: format_quantity(holding.shares.as_str()),
            purchase_price: format_price(holding.purchase_price.as_str()),
            cost_basis: format_currency(holding.cost_basis.as_str()),
            current_value: currency_or_na(holding.current_value_or_cost_basis()),
            sector: holding.sector.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerHighlight {
    pub fund_id: FundId,
    pub fund_name: String,
    pub category: String,
    pub total_aum: String,
    pub total_return: String,
}

/// The first [`PEER_HIGHLIGHT_LIMIT`] peers, formatted for a list.
pub fn peer_highlights(peers: &[PeerComparisonData]) -> Vec<PeerHighlight> {
    peers
        .iter()
        .take(PEER_HIGHLIGHT_LIMIT)
        .map(|peer| PeerHighlight {
            fund_id: peer.fund_id,
            fund_name: peer.fund_name.clone(),
            category: category_label(&peer.benchmark_category),
            total_aum: currency_or_na(peer.total_aum.as_deref().and_then(parse_decimal)),
            total_return: format_percent(peer.total_return),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundDetail {
    pub card: FundCard,
    pub manager_name: Option<String>,
    pub description: Option<String>,
    pub inception_date: String,
    pub expense_ratio: String,
    pub unrealized_gain_loss: String,
    pub unrealized_gain_loss_percent: String,
    pub holdings: Vec<HoldingRow>,
}

impl FundDetail {
    pub fn new(fund: &Fund, holdings: &[Holding]) -> Self {
        Self {
            card: FundCard::from_fund(fund),
            manager_name: fund.manager_name.clone(),
            description: fund.description.clone(),
            inception_date: format_date(&fund.inception_date),
            expense_ratio: format_expense_ratio(fund.expense_ratio.as_deref()),
            unrealized_gain_loss: currency_or_na(fund.unrealized_gain_loss_value()),
            unrealized_gain_loss_percent: format_percent_str(
                fund.unrealized_gain_loss_percent.as_deref(),
            ),
            holdings: holdings.iter().map(HoldingRow::from_holding).collect(),
        }
    }
}

/// Compact view of a fund shown before navigating to its detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundPreview {
    pub card: FundCard,
    pub manager_name: Option<String>,
    pub inception_date: String,
    pub expense_ratio: String,
    pub top_holdings: Vec<HoldingRow>,
}

impl FundPreview {
    pub fn new(fund: &Fund, holdings: &[Holding]) -> Self {
        Self {
            card: FundCard::from_fund(fund),
            manager_name: fund.manager_name.clone(),
            inception_date: format_date(&fund.inception_date),
            expense_ratio: format_expense_ratio(fund.expense_ratio.as_deref()),
            top_holdings: holdings
                .iter()
                .take(PREVIEW_HOLDINGS_LIMIT)
                .map(HoldingRow::from_holding)
                .collect(),
        }
    }
}
