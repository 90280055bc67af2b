//! Live aggregation of CoinGecko snapshots and Kraken quotes.

use crate::config::DataConfig;
use crate::error::Result;
use crate::provider::MarketDataProvider;
use crate::providers::kraken::interval_minutes;
use crate::providers::{
    CoinGeckoClient, CoinGeckoMarket, KrakenClient, KrakenTicker, OhlcEntry, OhlcRow,
};
use async_trait::async_trait;
use coinboard_domain::symbols::{self, SymbolMapEntry};
use coinboard_domain::{Candle, Coin, Timeframe};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Merges CoinGecko market snapshots with Kraken live quotes.
#[derive(Debug, Clone)]
pub struct LiveMarketData {
    coingecko: CoinGeckoClient,
    kraken: KrakenClient,
    page_size: u32,
    limit: usize,
}

impl LiveMarketData {
    /// Creates an aggregator over existing clients with default sizing.
    pub fn new(coingecko: CoinGeckoClient, kraken: KrakenClient) -> Self {
        let defaults = DataConfig::default();
        Self {
            coingecko,
            kraken,
            page_size: defaults.market_page_size,
            limit: defaults.top_limit,
        }
    }

    /// Creates an aggregator and its clients from configuration.
    ///
    /// # Errors
    /// Returns an error if an HTTP client cannot be built.
    pub fn from_config(config: &DataConfig) -> Result<Self> {
        let coingecko = CoinGeckoClient::new(&config.coingecko_base_url, config.http_timeout)?;
        let kraken = KrakenClient::new(&config.kraken_base_url, config.http_timeout)?;
        Ok(Self {
            coingecko,
            kraken,
            page_size: config.market_page_size,
            limit: config.top_limit,
        })
    }
}

#[async_trait]
impl MarketDataProvider for LiveMarketData {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn top_coins(&self) -> Result<Vec<Coin>> {
        let markets = self.coingecko.markets(self.page_size, 1).await?;
        let fetched = markets.len();

        let selected = select_mapped(markets, self.limit);
        if selected.is_empty() {
            info!(fetched, "No mapped coins in market snapshot");
            return Ok(Vec::new());
        }

        let pairs: Vec<&str> = selected.iter().map(|(e, _)| e.kraken_pair).collect();
        // A Kraken-level error voids the whole batch.
        let tickers = self.kraken.ticker(&pairs).await?.into_result()?;

        debug!(
            fetched,
            selected = selected.len(),
            quoted = tickers.len(),
            "Merging market snapshot with tickers"
        );

        Ok(selected
            .into_iter()
            .map(|(entry, market)| merge_coin(entry, &market, tickers.get(entry.kraken_pair)))
            .collect())
    }

    async fn coin_history(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>> {
        let pair = symbols::to_kraken_pair(symbol);
        let interval = interval_minutes(timeframe);

        let mut result = self.kraken.ohlc(&pair, interval).await?.into_result()?;

        match result.remove(&pair) {
            Some(OhlcEntry::Rows(rows)) => {
                debug!(%pair, interval, rows = rows.len(), "Fetched OHLC");
                rows.iter().map(OhlcRow::to_candle).collect()
            }
            Some(OhlcEntry::Cursor(_)) | None => {
                debug!(%pair, interval, "No OHLC rows for pair");
                Ok(Vec::new())
            }
        }
    }
}

/// Keeps snapshots present in the mapping table, in rank order, one per symbol.
fn select_mapped(
    markets: Vec<CoinGeckoMarket>,
    limit: usize,
) -> Vec<(&'static SymbolMapEntry, CoinGeckoMarket)> {
    let mut seen = HashSet::new();
    markets
        .into_iter()
        .filter_map(|m| symbols::from_coingecko_id(&m.id).map(|e| (e, m)))
        .filter(|(e, _)| seen.insert(e.symbol))
        .take(limit)
        .collect()
}

/// Builds the canonical coin for one mapped snapshot.
///
/// Price and 24h change come from the Kraken ticker when one is present and
/// usable; otherwise both fall back to CoinGecko. Market cap, volume and
/// supply always come from CoinGecko.
pub fn merge_coin(
    entry: &SymbolMapEntry,
    market: &CoinGeckoMarket,
    ticker: Option<&KrakenTicker>,
) -> Coin {
    let quote = ticker.and_then(|t| match (t.last_trade_price(), t.today_open()) {
        (Ok(last), Ok(open)) if open > 0.0 => Some((last, (last - open) / open * 100.0)),
        (Ok(_), Ok(open)) => {
            warn!(symbol = entry.symbol, open, "Ticker open is not positive");
            None
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!(symbol = entry.symbol, error = %e, "Unusable ticker");
            None
        }
    });

    let (price, change_24h) = quote.unwrap_or_else(|| {
        (
            market.current_price.unwrap_or_default(),
            market.price_change_percentage_24h.unwrap_or_default(),
        )
    });

    Coin {
        symbol: entry.symbol.to_string(),
        name: market.name.clone(),
        price,
        change_24h,
        market_cap_usd: market.market_cap.unwrap_or_default(),
        volume_24h_usd: market.total_volume.unwrap_or_default(),
        circulating_supply: market.circulating_supply.unwrap_or_default(),
    }
}
