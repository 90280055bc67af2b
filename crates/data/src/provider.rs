//! The seam between the dashboard and its data sources.

use crate::error::Result;
use async_trait::async_trait;
use coinboard_domain::{Candle, Coin, Timeframe};

/// A source of ranked coins and price history.
///
/// Implementations report failures through `Result`; the
/// [`MarketDataService`](crate::service::MarketDataService) facade is what
/// turns them into empty results for the view layer.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Top coins by market capitalization, at most the configured limit.
    async fn top_coins(&self) -> Result<Vec<Coin>>;

    /// Candle history for `symbol` over `timeframe`, in provider order.
    async fn coin_history(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>>;
}
