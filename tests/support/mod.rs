#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fundboard::api::{ApiError, FundDataSource};
use fundboard::models::{
    Fund, FundId, FundPerformanceData, FundPerformanceResponse, Holding, PeerComparisonData,
    PeerComparisonResponse,
};
use tokio::sync::Notify;

pub fn fund(id: FundId, total_aum: &str, current_value: Option<&str>) -> Fund {
    Fund {
        id,
        name: format!("Fund {id}"),
        strategy: "growth".to_string(),
        inception_date: "2020-01-15".to_string(),
        manager_name: Some("J. Chen".to_string()),
        description: None,
        expense_ratio: Some("0.65".to_string()),
        created_at: None,
        updated_at: None,
        total_aum: total_aum.to_string(),
        current_value: current_value.map(str::to_string),
        unrealized_gain_loss: None,
        unrealized_gain_loss_percent: None,
        total_return_percent: Some(5.0),
        daily_return_percent: None,
        holdings_count: 2,
    }
}

pub fn holding(id: u64, fund_id: FundId, ticker: &str) -> Holding {
    Holding {
        id,
        fund_id,
        ticker: ticker.to_string(),
        company_name: None,
        sector: Some("Technology".to_string()),
        market_cap: None,
        purchase_date: Some("2021-03-01".to_string()),
        created_at: None,
        updated_at: None,
        shares: "10".to_string(),
        purchase_price: "100".to_string(),
        cost_basis: "1000".to_string(),
        current_price: None,
        current_value: None,
        unrealized_gain_loss: None,
        unrealized_gain_loss_percent: None,
        weight_in_fund: None,
    }
}

pub fn performance(fund_id: FundId, days: u32) -> FundPerformanceResponse {
    FundPerformanceResponse {
        fund_id,
        fund_name: format!("Fund {fund_id}"),
        performance_data: (1..=days.min(3))
            .map(|day| FundPerformanceData {
                date: format!("2024-02-{day:02}"),
                nav_price: format!("{}.00", 10 + day),
                total_return: Some(day as f64),
                daily_return: None,
                assets_under_management: None,
            })
            .collect(),
        period_days: days,
    }
}

pub fn peers(fund_id: FundId) -> PeerComparisonResponse {
    PeerComparisonResponse {
        fund_id,
        fund_name: format!("Fund {fund_id}"),
        fund_strategy: "growth".to_string(),
        fund_performance: Some(5.0),
        peers: vec![PeerComparisonData {
            fund_id: 100,
            fund_name: "Peer Fund".to_string(),
            benchmark_category: "large_cap_growth".to_string(),
            total_aum: Some("750000".to_string()),
            expense_ratio: None,
            total_return: Some(3.5),
        }],
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "Fund not found".to_string(),
    }
}

/// In-memory data source with per-fund gates to control when fetches resolve.
#[derive(Default)]
pub struct MockFundSource {
    pub funds: Mutex<Vec<Fund>>,
    pub holdings: Mutex<Vec<Holding>>,
    pub fail_funds: Mutex<Option<ApiError>>,
    gates: Mutex<HashMap<FundId, Arc<Notify>>>,
    calls: Mutex<Vec<String>>,
}

impl MockFundSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_funds(self, funds: Vec<Fund>) -> Self {
        *self.funds.lock().unwrap() = funds;
        self
    }

    pub fn with_holdings(self, holdings: Vec<Holding>) -> Self {
        *self.holdings.lock().unwrap() = holdings;
        self
    }

    /// Hold fetches for `fund_id` until the returned gate is notified.
    pub fn gate(&self, fund_id: FundId) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(fund_id, Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait_gate(&self, fund_id: FundId) {
        let gate = self.gates.lock().unwrap().get(&fund_id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn find_fund(&self, fund_id: FundId) -> Result<Fund, ApiError> {
        self.funds
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id == fund_id)
            .cloned()
            .ok_or_else(not_found)
    }
}

#[async_trait]
impl FundDataSource for MockFundSource {
    async fn list_funds(&self) -> Result<Vec<Fund>, ApiError> {
        self.record("list_funds".to_string());
        if let Some(err) = self.fail_funds.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.funds.lock().unwrap().clone())
    }

    async fn get_fund(&self, fund_id: FundId) -> Result<Fund, ApiError> {
        self.record(format!("get_fund:{fund_id}"));
        self.wait_gate(fund_id).await;
        self.find_fund(fund_id)
    }

    async fn get_fund_performance(
        &self,
        fund_id: FundId,
        days: u32,
    ) -> Result<FundPerformanceResponse, ApiError> {
        self.record(format!("get_fund_performance:{fund_id}:{days}"));
        self.find_fund(fund_id)?;
        Ok(performance(fund_id, days))
    }

    async fn get_fund_peers(&self, fund_id: FundId) -> Result<PeerComparisonResponse, ApiError> {
        self.record(format!("get_fund_peers:{fund_id}"));
        self.find_fund(fund_id)?;
        Ok(peers(fund_id))
    }

    async fn get_holdings(&self, fund_id: Option<FundId>) -> Result<Vec<Holding>, ApiError> {
        self.record(format!("get_holdings:{fund_id:?}"));
        Ok(self
            .holdings
            .lock()
            .unwrap()
            .iter()
            .filter(|h| fund_id.map_or(true, |id| h.fund_id == id))
            .cloned()
            .collect())
    }
}
