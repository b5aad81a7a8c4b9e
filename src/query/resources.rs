//! One query per backend resource the dashboard pages read.

use std::sync::Arc;

use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::api::FundDataSource;
use crate::models::{Fund, FundId, FundPerformanceResponse, Holding, PeerComparisonResponse};

use super::{PerformanceKey, Query};

pub type FundsQuery = Query<(), Vec<Fund>>;
pub type FundQuery = Query<FundId, Option<Fund>>;
pub type FundPerformanceQuery = Query<PerformanceKey, Option<FundPerformanceResponse>>;
pub type FundPeersQuery = Query<FundId, Option<PeerComparisonResponse>>;
pub type FundHoldingsQuery = Query<FundId, Vec<Holding>>;

/// All funds. Call `set_key(())` once to load.
pub fn funds_query(source: Arc<dyn FundDataSource>) -> FundsQuery {
    Query::new(
        "funds",
        Vec::new(),
        Arc::new(move |()| {
            let source = Arc::clone(&source);
            async move { source.list_funds().await }.boxed()
        }),
    )
}

pub fn fund_query(source: Arc<dyn FundDataSource>) -> FundQuery {
    Query::new(
        "fund",
        None,
        Arc::new(move |fund_id: FundId| {
            let source = Arc::clone(&source);
            async move { source.get_fund(fund_id).await.map(Some) }.boxed()
        }),
    )
}

pub fn fund_performance_query(source: Arc<dyn FundDataSource>) -> FundPerformanceQuery {
    Query::new(
        "fund_performance",
        None,
        Arc::new(move |key: PerformanceKey| {
            let source = Arc::clone(&source);
            async move {
                source
                    .get_fund_performance(key.fund_id, key.days)
                    .await
                    .map(Some)
            }
            .boxed()
        }),
    )
}

pub fn fund_peers_query(source: Arc<dyn FundDataSource>) -> FundPeersQuery {
    Query::new(
        "fund_peers",
        None,
        Arc::new(move |fund_id: FundId| {
            let source = Arc::clone(&source);
            async move { source.get_fund_peers(fund_id).await.map(Some) }.boxed()
        }),
    )
}

pub fn fund_holdings_query(source: Arc<dyn FundDataSource>) -> FundHoldingsQuery {
    Query::new(
        "fund_holdings",
        Vec::new(),
        Arc::new(move |fund_id: FundId| {
            let source = Arc::clone(&source);
            async move { source.get_holdings(Some(fund_id)).await }.boxed()
        }),
    )
}

/// The queries behind a fund detail page, driven by one fund id.
pub struct FundDetailQueries {
    pub fund: FundQuery,
    pub performance: FundPerformanceQuery,
    pub peers: FundPeersQuery,
    pub holdings: FundHoldingsQuery,
}

impl FundDetailQueries {
    pub fn new(source: Arc<dyn FundDataSource>) -> Self {
        Self {
            fund: fund_query(Arc::clone(&source)),
            performance: fund_performance_query(Arc::clone(&source)),
            peers: fund_peers_query(Arc::clone(&source)),
            holdings: fund_holdings_query(source),
        }
    }

    /// Point every query at `fund_id`; fetches run concurrently.
    ///
    /// Returns the handles of the fetches that were started.
    pub fn load(&mut self, fund_id: FundId, days: u32) -> Vec<JoinHandle<()>> {
        [
            self.fund.set_key(fund_id),
            self.performance.set_key(PerformanceKey::new(fund_id, days)),
            self.peers.set_key(fund_id),
            self.holdings.set_key(fund_id),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Change only the performance window.
    pub fn set_days(&mut self, days: u32) -> Option<JoinHandle<()>> {
        let fund_id = self.fund.key().copied().unwrap_or(0);
        self.performance.set_key(PerformanceKey::new(fund_id, days))
    }
}
