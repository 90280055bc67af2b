//! Polling queries over the market data service.

use crate::poller::{Poller, QueryHandle};
use coinboard_data::MarketDataService;
use coinboard_domain::{Candle, Coin, Timeframe};
use serde::Serialize;
use std::convert::Infallible;
use std::time::Duration;

/// Refresh period of the coin list.
pub const TOP_COINS_INTERVAL: Duration = Duration::from_secs(30);
/// Refresh period of the selected coin's history.
pub const HISTORY_INTERVAL: Duration = Duration::from_secs(10);

/// Running coin list query.
pub type TopCoinsQuery = QueryHandle<(), Vec<Coin>>;
/// Running history query.
pub type CoinHistoryQuery = QueryHandle<HistorySelection, Vec<Candle>>;

/// The coin and window whose history is being polled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistorySelection {
    pub symbol: String,
    pub timeframe: Timeframe,
}

impl HistorySelection {
    /// Surrounding whitespace in `symbol` is dropped.
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe) -> Self {
        let symbol: String = symbol.into();
        Self {
            symbol: symbol.trim().to_string(),
            timeframe,
        }
    }

    /// True when a symbol is selected.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.symbol.trim().is_empty()
    }
}

/// Polls the top coin list every 30 seconds.
pub fn top_coins_query(service: MarketDataService) -> TopCoinsQuery {
    Poller::new("top_coins", TOP_COINS_INTERVAL, ()).spawn(move |()| {
        let service = service.clone();
        async move { Ok::<_, Infallible>(service.top_coins().await) }
    })
}

/// Polls the selected coin's history every 10 seconds while a symbol is selected.
pub fn coin_history_query(
    service: MarketDataService,
    selection: HistorySelection,
) -> CoinHistoryQuery {
    Poller::new("coin_history", HISTORY_INTERVAL, selection)
        .enabled_when(HistorySelection::is_active)
        .spawn(move |sel: HistorySelection| {
            let service = service.clone();
            async move {
                let candles = service.coin_history(sel.symbol.trim(), sel.timeframe).await;
                Ok::<_, Infallible>(candles)
            }
        })
}
