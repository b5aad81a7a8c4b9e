mod support;

use std::sync::Arc;

use anyhow::Result;
use fundboard::api::{ApiError, FundDataSource};
use fundboard::query::{fund_query, funds_query, FundDetailQueries};
use support::{fund, holding, MockFundSource};

fn source_with_two_funds() -> Arc<MockFundSource> {
    Arc::new(
        MockFundSource::new()
            .with_funds(vec![
                fund(1, "100", None),
                fund(2, "200", Some("250")),
            ])
            .with_holdings(vec![
                holding(10, 1, "AAPL"),
                holding(11, 2, "MSFT"),
                holding(12, 2, "NVDA"),
            ]),
    )
}

#[tokio::test]
async fn stale_fund_result_is_discarded() -> Result<()> {
    let source = source_with_two_funds();
    let gate = source.gate(1);
    let mut query = fund_query(source.clone() as Arc<dyn FundDataSource>);

    let slow = query.set_key(1).expect("fetch for fund 1");
    let fast = query.set_key(2).expect("fetch for fund 2");
    fast.await?;
    assert_eq!(query.snapshot().data.map(|f| f.id), Some(2));

    gate.notify_one();
    slow.await?;

    let state = query.snapshot();
    assert_eq!(state.data.map(|f| f.id), Some(2));
    assert!(!state.loading);
    assert_eq!(state.error, None);
    Ok(())
}

#[tokio::test]
async fn previous_data_stays_visible_while_reloading() -> Result<()> {
    let source = source_with_two_funds();
    let mut query = fund_query(source.clone() as Arc<dyn FundDataSource>);

    query.set_key(2).expect("fetch").await?;
    let gate = source.gate(1);
    let pending = query.set_key(1).expect("fetch");

    let state = query.snapshot();
    assert!(state.loading);
    assert_eq!(state.data.as_ref().map(|f| f.id), Some(2));

    gate.notify_one();
    pending.await?;
    let state = query.snapshot();
    assert!(!state.loading);
    assert_eq!(state.data.map(|f| f.id), Some(1));
    Ok(())
}

#[tokio::test]
async fn subscribers_see_the_settled_state() -> Result<()> {
    let source = source_with_two_funds();
    let mut query = funds_query(source as Arc<dyn FundDataSource>);
    let mut rx = query.subscribe();

    query.set_key(()).expect("fetch");
    let state = rx.wait_for(|state| !state.loading).await?.clone();
    assert_eq!(state.data.len(), 2);
    Ok(())
}

#[tokio::test]
async fn failed_reload_keeps_previous_funds() -> Result<()> {
    let source = source_with_two_funds();
    let mut query = funds_query(source.clone() as Arc<dyn FundDataSource>);

    query.set_key(()).expect("fetch").await?;
    assert_eq!(query.snapshot().data.len(), 2);

    *source.fail_funds.lock().unwrap() = Some(ApiError::Transport("connection refused".into()));
    query.refetch().expect("refetch").await?;

    let state = query.snapshot();
    assert!(!state.loading);
    assert_eq!(state.data.len(), 2);
    assert_eq!(state.error.as_deref(), Some("connection refused"));
    Ok(())
}

#[tokio::test]
async fn missing_fund_reports_error_message() -> Result<()> {
    let source = source_with_two_funds();
    let mut query = fund_query(source as Arc<dyn FundDataSource>);

    query.set_key(42).expect("fetch").await?;

    let state = query.snapshot();
    assert!(!state.loading);
    assert_eq!(state.data, None);
    assert_eq!(state.error.as_deref(), Some("Fund not found"));
    Ok(())
}

#[tokio::test]
async fn detail_queries_load_every_section() -> Result<()> {
    let source = source_with_two_funds();
    let mut queries = FundDetailQueries::new(source.clone() as Arc<dyn FundDataSource>);

    let handles = queries.load(2, 30);
    assert_eq!(handles.len(), 4);
    for handle in handles {
        handle.await?;
    }

    assert_eq!(queries.fund.snapshot().data.map(|f| f.id), Some(2));
    let tickers: Vec<_> = queries
        .holdings
        .snapshot()
        .data
        .into_iter()
        .map(|h| h.ticker)
        .collect();
    assert_eq!(tickers, vec!["MSFT", "NVDA"]);
    assert_eq!(
        queries.performance.snapshot().data.map(|p| p.period_days),
        Some(30)
    );
    assert_eq!(
        queries.peers.snapshot().data.map(|p| p.peers.len()),
        Some(1)
    );

    let calls = source.calls();
    assert!(calls.contains(&"get_holdings:Some(2)".to_string()));
    assert!(calls.contains(&"get_fund_performance:2:30".to_string()));
    Ok(())
}

#[tokio::test]
async fn changing_days_refetches_only_performance() -> Result<()> {
    let source = source_with_two_funds();
    let mut queries = FundDetailQueries::new(source.clone() as Arc<dyn FundDataSource>);

    for handle in queries.load(1, 30) {
        handle.await?;
    }
    let before = source.calls().len();

    queries.set_days(90).expect("performance refetch").await?;
    assert!(queries.set_days(90).is_none());

    let calls = source.calls();
    assert_eq!(calls.len(), before + 1);
    assert_eq!(calls.last().map(String::as_str), Some("get_fund_performance:1:90"));
    assert_eq!(
        queries.performance.snapshot().data.map(|p| p.period_days),
        Some(90)
    );
    Ok(())
}

#[tokio::test]
async fn unknown_fund_id_issues_no_requests() -> Result<()> {
    let source = source_with_two_funds();
    let mut queries = FundDetailQueries::new(source.clone() as Arc<dyn FundDataSource>);

    assert!(queries.load(0, 30).is_empty());
    assert!(queries.set_days(90).is_none());
    assert!(source.calls().is_empty());

    let state = queries.fund.snapshot();
    assert!(state.loading);
    assert_eq!(state.data, None);
    Ok(())
}

#[tokio::test]
async fn clearing_the_id_mid_fetch_still_settles_loading() -> Result<()> {
    let source = source_with_two_funds();
    let gate = source.gate(1);
    let mut query = fund_query(source.clone() as Arc<dyn FundDataSource>);

    let in_flight = query.set_key(1).expect("fetch for fund 1");
    assert!(query.set_key(0).is_none());
    assert!(query.snapshot().loading);

    gate.notify_one();
    in_flight.await?;

    let state = query.snapshot();
    assert!(!state.loading);
    assert_eq!(state.data.map(|f| f.id), Some(1));
    assert_eq!(state.error, None);
    assert_eq!(source.calls(), vec!["get_fund:1".to_string()]);
    Ok(())
}
