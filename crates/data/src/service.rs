//! The market data interface consumed by the view layer.
//!
//! Every failure below this boundary (transport errors, provider-reported
//! errors, malformed bodies) is logged and collapsed into an empty result.
//! A failed cycle is indistinguishable from "no data"; the next poll is
//! expected to recover. The `try_*` variants expose the underlying error
//! for callers that want it.

use crate::aggregator::LiveMarketData;
use crate::config::{DataConfig, DataMode};
use crate::error::Result;
use crate::mock::MockMarketData;
use crate::provider::MarketDataProvider;
use coinboard_domain::entities::find_by_symbol;
use coinboard_domain::{Candle, Coin, Timeframe};
use std::sync::Arc;
use tracing::{error, info};

/// Never-failing facade over a [`MarketDataProvider`].
#[derive(Clone)]
pub struct MarketDataService {
    provider: Arc<dyn MarketDataProvider>,
}

impl std::fmt::Debug for MarketDataService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDataService")
            .field("source", &self.provider.name())
            .finish()
    }
}

impl MarketDataService {
    /// Wraps an existing provider.
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Builds the live or mock provider selected by `config.mode`.
    ///
    /// # Errors
    /// Returns an error if the live HTTP clients cannot be built.
    pub fn from_config(config: &DataConfig) -> Result<Self> {
        let provider: Arc<dyn MarketDataProvider> = match config.mode {
            DataMode::Live => Arc::new(LiveMarketData::from_config(config)?),
            DataMode::Mock => Arc::new(MockMarketData::new(config.mock_latency)),
        };
        info!(source = provider.name(), "Market data service ready");
        Ok(Self::new(provider))
    }

    /// Name of the backing provider.
    #[must_use]
    pub fn source(&self) -> &'static str {
        self.provider.name()
    }

    /// Top coins, or an empty list on any failure.
    pub async fn top_coins(&self) -> Vec<Coin> {
        self.try_top_coins().await.unwrap_or_else(|e| {
            error!(source = self.source(), error = %e, "Failed to fetch top coins");
            Vec::new()
        })
    }

    /// Candle history in provider order, or an empty list on any failure.
    pub async fn coin_history(&self, symbol: &str, timeframe: Timeframe) -> Vec<Candle> {
        self.try_coin_history(symbol, timeframe)
            .await
            .unwrap_or_else(|e| {
                error!(
                    source = self.source(),
                    symbol,
                    %timeframe,
                    error = %e,
                    "Failed to fetch coin history"
                );
                Vec::new()
            })
    }

    /// One coin from the current top list.
    pub async fn find_coin(&self, symbol: &str) -> Option<Coin> {
        let coins = self.top_coins().await;
        find_by_symbol(&coins, symbol).cloned()
    }

    /// Top coins with the underlying error preserved.
    ///
    /// # Errors
    /// Returns the provider's error.
    pub async fn try_top_coins(&self) -> Result<Vec<Coin>> {
        self.provider.top_coins().await
    }

    /// Candle history with the underlying error preserved.
    ///
    /// # Errors
    /// Returns the provider's error.
    pub async fn try_coin_history(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>> {
        self.provider.coin_history(symbol, timeframe).await
    }
}
