use crate::models::{Fund, FundId, FundPerformanceResponse, Holding, PeerComparisonResponse};

use super::ApiError;

/// Read operations the dashboard queries depend on.
///
/// [`FundApiClient`](super::FundApiClient) is the production implementation;
/// tests drive queries with an in-memory source.
#[async_trait::async_trait]
pub trait FundDataSource: Send + Sync {
    async fn list_funds(&self) -> Result<Vec<Fund>, ApiError>;

    async fn get_fund(&self, fund_id: FundId) -> Result<Fund, ApiError>;

    async fn get_fund_performance(
        &self,
        fund_id: FundId,
        days: u32,
    ) -> Result<FundPerformanceResponse, ApiError>;

    async fn get_fund_peers(&self, fund_id: FundId) -> Result<PeerComparisonResponse, ApiError>;

    /// All holdings, or only those of `fund_id` when given.
    async fn get_holdings(&self, fund_id: Option<FundId>) -> Result<Vec<Holding>, ApiError>;
}
