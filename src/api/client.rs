//! HTTP client for the fund dashboard backend.
//!
//! Every call is an unauthenticated GET under `/api/v1`. Responses go through
//! [`handle_response`] so status and content-type handling is identical for
//! all endpoints.

use anyhow::{Context, Result};
use reqwest::Client;

use crate::config::ApiConfig;
use crate::models::{Fund, FundId, FundPerformanceResponse, Holding, PeerComparisonResponse};

use super::response::{handle_response, ResponseBody};
use super::{ApiError, FundDataSource};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Window used by the performance endpoint when the caller has no preference.
pub const DEFAULT_PERFORMANCE_DAYS: u32 = 30;

pub const DEFAULT_TOP_HOLDINGS_LIMIT: u32 = 10;

/// Fund dashboard API client.
#[derive(Debug, Clone)]
pub struct FundApiClient {
    client: Client,
    base_url: String,
}

impl FundApiClient {
    /// Creates a client for the default local backend.
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Creates a client with a custom reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Overrides the backend base URL (tests point this at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builds a client from resolved configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self::with_client(client).with_base_url(config.base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ResponseBody, ApiError> {
        let url = format!("{}/api/v1{path}", self.base_url);
        tracing::debug!(url = %url, ?query, "GET");

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        handle_response(response).await
    }

    /// Aggregate statistics for a fund. The backend does not declare a
    /// schema for this endpoint, so the body is returned as-is.
    pub async fn get_fund_stats(&self, fund_id: FundId) -> Result<ResponseBody, ApiError> {
        self.get(&format!("/funds/{fund_id}/stats"), &[]).await
    }

    /// Holdings summary for a fund; opaque like [`Self::get_fund_stats`].
    pub async fn get_fund_holdings_summary(
        &self,
        fund_id: FundId,
    ) -> Result<ResponseBody, ApiError> {
        self.get(&format!("/holdings/fund/{fund_id}/summary"), &[])
            .await
    }

    /// Largest positions of a fund, at most `limit` of them.
    pub async fn get_fund_top_holdings(
        &self,
        fund_id: FundId,
        limit: u32,
    ) -> Result<Vec<Holding>, ApiError> {
        self.get(
            &format!("/holdings/fund/{fund_id}/top"),
            &[("limit", limit.to_string())],
        )
        .await?
        .into_typed()
    }
}

impl Default for FundApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FundDataSource for FundApiClient {
    async fn list_funds(&self) -> Result<Vec<Fund>, ApiError> {
        self.get("/funds/", &[]).await?.into_typed()
    }

    async fn get_fund(&self, fund_id: FundId) -> Result<Fund, ApiError> {
        self.get(&format!("/funds/{fund_id}"), &[]).await?.into_typed()
    }

    async fn get_fund_performance(
        &self,
        fund_id: FundId,
        days: u32,
    ) -> Result<FundPerformanceResponse, ApiError> {
        self.get(
            &format!("/funds/{fund_id}/performance"),
            &[("days", days.to_string())],
        )
        .await?
        .into_typed()
    }

    async fn get_fund_peers(&self, fund_id: FundId) -> Result<PeerComparisonResponse, ApiError> {
        self.get(&format!("/funds/{fund_id}/peers"), &[])
            .await?
            .into_typed()
    }

    async fn get_holdings(&self, fund_id: Option<FundId>) -> Result<Vec<Holding>, ApiError> {
        // An id of zero means "not known yet", same as no filter.
        let query = match fund_id {
            Some(id) if id != 0 => vec![("fund_id", id.to_string())],
            _ => Vec::new(),
        };
        self.get("/holdings/", &query).await?.into_typed()
    }
}
