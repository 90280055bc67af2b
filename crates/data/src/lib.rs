//! Market data access for the coin dashboard.
//!
//! This crate provides:
//! - REST clients for CoinGecko (market snapshots) and Kraken (tickers, OHLC)
//! - Live aggregation of both providers into canonical coins and candles
//! - A mock generator used when no live source is configured
//! - A never-failing service facade for the view layer

/// Live aggregation layer.
pub mod aggregator;
/// Configuration.
pub mod config;
/// Error types.
pub mod error;
/// Mock data generator.
pub mod mock;
/// Provider trait.
pub mod provider;
/// Provider REST clients.
pub mod providers;
/// Service facade.
pub mod service;

#[cfg(test)]
mod test_support;

pub use aggregator::LiveMarketData;
pub use config::{DataConfig, DataMode};
pub use error::{DataError, Result};
pub use mock::MockMarketData;
pub use provider::MarketDataProvider;
pub use service::MarketDataService;
