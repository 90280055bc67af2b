//! Command line interface for the coin dashboard.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coinboard_api::{ApiServer, AppState, ServerConfig};
use coinboard_data::{DataConfig, DataMode, MarketDataService};
use coinboard_domain::Timeframe;
use coinboard_domain::chart::prepare_series;
use coinboard_polling::{HistorySelection, QueryStatus, coin_history_query, top_coins_query};
use dotenv::dotenv;
use std::net::SocketAddr;
use tracing::info;

mod render;

#[derive(Parser)]
#[command(name = "coinboard")]
#[command(about = "Crypto market dashboard backed by CoinGecko and Kraken", long_about = None)]
struct Cli {
    /// Data source, overriding COINBOARD_MODE: mock or live
    #[arg(long, global = true)]
    mode: Option<DataMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the top coins by market cap
    Top,
    /// Show one coin from the top list
    Coin {
        /// Coin symbol (e.g., BTC)
        symbol: String,
    },
    /// Show candle history for a coin
    History {
        /// Coin symbol (e.g., BTC)
        symbol: String,

        /// History window: 1h, 24h, 7d or 30d
        #[arg(short, long, default_value = "24h")]
        timeframe: Timeframe,
    },
    /// Poll continuously and reprint on every update
    Watch {
        /// Also poll history for this symbol
        #[arg(short, long)]
        symbol: Option<String>,

        /// History window: 1h, 24h, 7d or 30d
        #[arg(short, long, default_value = "24h")]
        timeframe: Timeframe,
    },
    /// Serve the JSON API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = DataConfig::from_env().context("invalid data configuration")?;
    if let Some(mode) = cli.mode {
        config = config.with_mode(mode);
    }
    let service = MarketDataService::from_config(&config)?;
    info!(source = service.source(), "Using market data source");

    match cli.command {
        Commands::Top => {
            let coins = service.top_coins().await;
            if coins.is_empty() {
                println!("No coins available.");
            } else {
                render::coins_table(&coins).printstd();
            }
        }
        Commands::Coin { symbol } => match service.find_coin(&symbol).await {
            Some(coin) => {
                render::coin_table(&coin).printstd();
            }
            None => println!("{} is not in the current top list.", symbol.to_uppercase()),
        },
        Commands::History { symbol, timeframe } => {
            let candles = prepare_series(service.coin_history(&symbol, timeframe).await);
            if candles.is_empty() {
                println!("No history for {} ({timeframe}).", symbol.to_uppercase());
            } else {
                println!(
                    "{} candles for {} ({timeframe}):",
                    candles.len(),
                    symbol.to_uppercase()
                );
                render::candles_table(&candles).printstd();
            }
        }
        Commands::Watch { symbol, timeframe } => {
            watch(service, symbol, timeframe).await;
        }
        Commands::Serve { addr } => {
            let state = AppState::new(service);
            ApiServer::new(ServerConfig { bind_addr: addr }, state)
                .run()
                .await
                .context("API server failed")?;
        }
    }

    Ok(())
}

/// Runs both polling queries and reprints whenever one of them updates.
async fn watch(service: MarketDataService, symbol: Option<String>, timeframe: Timeframe) {
    let selection = HistorySelection::new(symbol.unwrap_or_default(), timeframe);
    let top = top_coins_query(service.clone());
    let history = coin_history_query(service, selection.clone());

    let mut top_rx = top.subscribe();
    let mut history_rx = history.subscribe();

    loop {
        tokio::select! {
            changed = top_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = top_rx.borrow_and_update().clone();
                let stamp = snapshot.updated_at.map(|t| t.format("%H:%M:%S").to_string()).unwrap_or_default();
                match (snapshot.status, snapshot.data) {
                    (QueryStatus::Loading, _) => println!("Loading coins..."),
                    (QueryStatus::Error, _) => println!("[{stamp}] Coin list failed: {}", snapshot.error.unwrap_or_default()),
                    (QueryStatus::Success, Some(coins)) => {
                        println!("[{stamp}] Top coins");
                        render::coins_table(&coins).printstd();
                    }
                    (QueryStatus::Success, None) => {}
                }
            }
            changed = history_rx.changed(), if selection.is_active() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = history_rx.borrow_and_update().clone();
                if let Some(candles) = snapshot.data {
                    let candles = prepare_series(candles);
                    match candles.last() {
                        Some(last) => println!(
                            "{} {}: {} candles, last close {}",
                            selection.symbol.to_uppercase(),
                            selection.timeframe,
                            candles.len(),
                            render::price(last.close)
                        ),
                        None => println!("{} {}: no history", selection.symbol.to_uppercase(), selection.timeframe),
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping watch");
                break;
            }
        }
    }
}
