//! Data-fetching queries.
//!
//! Each query owns a [`QueryState`] for one backend resource and refetches
//! when its key changes. Errors end up as a message in the state; they are
//! never returned to the caller.

mod resources;
mod runner;
mod state;

pub use resources::{
    fund_holdings_query, fund_peers_query, fund_performance_query, fund_query, funds_query,
    FundDetailQueries, FundHoldingsQuery, FundPeersQuery, FundPerformanceQuery, FundQuery,
    FundsQuery,
};
pub use runner::{Fetcher, PerformanceKey, Query, QueryKey};
pub use state::QueryState;
