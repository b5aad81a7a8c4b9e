use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fundboard::alert::{AlertBanner, ALERT_MESSAGE, ALERT_TITLE};
use fundboard::api::{FundApiClient, FundDataSource};
use fundboard::config::{default_config_path, ResolvedConfig};
use fundboard::models::FundId;
use fundboard::portfolio::{
    peer_comparison_series, peer_highlights, performance_series, DashboardSummary, FundDetail,
    FundPreview, HoldingRow,
};
use fundboard::preferences::JsonFilePreferenceStore;
use fundboard::query::{funds_query, FundDetailQueries, QueryState};

#[derive(Parser)]
#[command(name = "fundboard")]
#[command(about = "Fund portfolio dashboard client")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")"))]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Portfolio totals and one card per fund
    Dashboard,
    /// Fund detail page: summary, holdings, performance and peers
    Fund {
        id: FundId,
        /// Performance window in days (default 90)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Compact fund preview with its largest holdings
    Preview { id: FundId },
    /// Performance series for a fund
    Performance {
        id: FundId,
        #[arg(long)]
        days: Option<u32>,
    },
    /// Peer comparison for a fund
    Peers { id: FundId },
    /// List holdings, optionally for one fund
    Holdings {
        #[arg(long)]
        fund_id: Option<FundId>,
    },
    /// Largest holdings of a fund
    TopHoldings {
        id: FundId,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Raw fund statistics
    Stats { id: FundId },
    /// Raw holdings summary for a fund
    Summary { id: FundId },
    /// Show or dismiss the informational banner
    Alert {
        #[arg(long)]
        dismiss: bool,
    },
    /// Show current configuration
    Config,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

/// Await every started fetch. Query failures are recorded in state, so only
/// task panics surface here.
async fn settle(handles: Vec<tokio::task::JoinHandle<()>>) -> Result<()> {
    for handle in handles {
        handle.await.context("Query task failed")?;
    }
    Ok(())
}

fn page_error<T>(state: &QueryState<T>) -> Result<()> {
    match &state.error {
        Some(err) => anyhow::bail!("Error loading data: {err}"),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = ResolvedConfig::load_or_default(&config_path)?;
    let client = FundApiClient::from_config(&config.api)?;
    let source: Arc<dyn FundDataSource> = Arc::new(client.clone());

    match cli.command {
        Command::Dashboard => {
            let mut funds = funds_query(source);
            settle(funds.set_key(()).into_iter().collect()).await?;
            let state = funds.snapshot();
            page_error(&state)?;
            print_json(&DashboardSummary::from_funds(&state.data))?;
        }
        Command::Fund { id, days } => {
            let days = days.unwrap_or(config.display.detail_performance_days);
            let mut queries = FundDetailQueries::new(source);
            settle(queries.load(id, days)).await?;

            let fund = queries.fund.snapshot();
            page_error(&fund)?;
            let fund = fund.data.context("Fund not found")?;
            let holdings = queries.holdings.snapshot().data;

            // Sections that failed to load render as "no data" instead of an error.
            let performance = queries
                .performance
                .snapshot()
                .data
                .map(|p| performance_series(&p.performance_data));
            let peers = queries.peers.snapshot().data.map(|p| {
                json!({
                    "chart": peer_comparison_series(&fund.name, fund.total_return_percent, &p.peers),
                    "highlights": peer_highlights(&p.peers),
                })
            });

            print_json(&json!({
                "fund": FundDetail::new(&fund, &holdings),
                "performance": performance,
                "peers": peers,
            }))?;
        }
        Command::Preview { id } => {
            let fund = source.get_fund(id).await?;
            let holdings = source.get_holdings(Some(id)).await?;
            print_json(&FundPreview::new(&fund, &holdings))?;
        }
        Command::Performance { id, days } => {
            let days = days.unwrap_or(config.display.performance_days);
            let response = source.get_fund_performance(id, days).await?;
            print_json(&json!({
                "fund_id": response.fund_id,
                "fund_name": response.fund_name,
                "period_days": response.period_days,
                "series": performance_series(&response.performance_data),
            }))?;
        }
        Command::Peers { id } => {
            let response = source.get_fund_peers(id).await?;
            print_json(&json!({
                "fund_id": response.fund_id,
                "fund_name": response.fund_name,
                "chart": peer_comparison_series(
                    &response.fund_name,
                    response.fund_performance,
                    &response.peers,
                ),
                "highlights": peer_highlights(&response.peers),
            }))?;
        }
        Command::Holdings { fund_id } => {
            let holdings = source.get_holdings(fund_id).await?;
            let rows: Vec<_> = holdings.iter().map(HoldingRow::from_holding).collect();
            print_json(&rows)?;
        }
        Command::TopHoldings { id, limit } => {
            let limit = limit.unwrap_or(config.display.top_holdings_limit);
            let holdings = client.get_fund_top_holdings(id, limit).await?;
            let rows: Vec<_> = holdings.iter().map(HoldingRow::from_holding).collect();
            print_json(&rows)?;
        }
        Command::Stats { id } => {
            print_json(&client.get_fund_stats(id).await?)?;
        }
        Command::Summary { id } => {
            print_json(&client.get_fund_holdings_summary(id).await?)?;
        }
        Command::Alert { dismiss } => {
            let store = Arc::new(JsonFilePreferenceStore::new(&config.data_dir));
            let mut banner = AlertBanner::load(store).await?;
            if dismiss {
                banner.dismiss().await?;
            }
            print_json(&json!({
                "visible": banner.should_render(),
                "title": ALERT_TITLE,
                "message": ALERT_MESSAGE,
            }))?;
        }
        Command::Config => {
            println!("Config file: {}", config_path.display());
            println!("Data directory: {}", config.data_dir.display());
            println!("API base URL: {}", config.api.base_url);
            if let Some(timeout) = config.api.timeout {
                println!("Request timeout: {timeout:?}");
            }
        }
    }

    Ok(())
}
