//! Synthetic market data used when no live source is configured.
//!
//! Shapes are fixed and values are randomized per call, so the dashboard
//! always has something to render. Market cap and volume are derived from
//! the seed price with fixed multipliers and are placeholders, not supply
//! data.

use crate::error::Result;
use crate::provider::MarketDataProvider;
use async_trait::async_trait;
use coinboard_domain::{Candle, Coin, Timeframe};
use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Seed row for the mock coin list.
#[derive(Debug, Clone, Copy)]
pub struct MockSeed {
    pub name: &'static str,
    pub symbol: &'static str,
    pub price: f64,
    pub change: f64,
}

const fn seed(name: &'static str, symbol: &'static str, price: f64, change: f64) -> MockSeed {
    MockSeed {
        name,
        symbol,
        price,
        change,
    }
}

/// The ten assets the mock list always returns.
pub const MOCK_SEEDS: [MockSeed; 10] = [
    seed("Bitcoin", "BTC", 65_000.0, 2.5),
    seed("Ethereum", "ETH", 3_500.0, 1.8),
    seed("Solana", "SOL", 145.0, 5.2),
    seed("Binance Coin", "BNB", 600.0, -0.5),
    seed("Cardano", "ADA", 0.45, 1.2),
    seed("Ripple", "XRP", 0.62, -1.1),
    seed("Dogecoin", "DOGE", 0.16, 8.5),
    seed("Polkadot", "DOT", 7.2, 0.8),
    seed("Avalanche", "AVAX", 35.0, 3.4),
    seed("Shiba Inu", "SHIB", 0.000_025, -2.1),
];

/// Relative price jitter applied to each seed (±1 %).
pub const PRICE_JITTER: f64 = 0.01;
/// Absolute change jitter in percentage points (±0.5).
pub const CHANGE_JITTER: f64 = 0.5;
/// Market cap multiplier applied to the seed price.
pub const MARKET_CAP_MULTIPLIER: f64 = 19_000_000.0;
/// Volume multiplier applied to the seed price.
pub const VOLUME_MULTIPLIER: f64 = 500_000.0;
/// Circulating supply reported for every mock coin.
pub const MOCK_CIRCULATING_SUPPLY: f64 = 19_000_000.0;
/// Starting price of the mock random walk.
pub const HISTORY_SEED_PRICE: f64 = 50_000.0;
/// Width of the per-step noise band relative to price.
pub const HISTORY_VOLATILITY: f64 = 0.02;

/// Spacing between mock candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Hourly,
    Daily,
}

impl Granularity {
    #[must_use]
    pub fn seconds(&self) -> i64 {
        match self {
            Self::Hourly => 3_600,
            Self::Daily => 86_400,
        }
    }
}

/// Number of intervals and their spacing used to mock a timeframe.
#[must_use]
pub fn mock_span(timeframe: Timeframe) -> (usize, Granularity) {
    match timeframe {
        Timeframe::OneHour => (1, Granularity::Hourly),
        Timeframe::TwentyFourHours => (24, Granularity::Hourly),
        Timeframe::SevenDays => (7, Granularity::Daily),
        Timeframe::ThirtyDays => (30, Granularity::Daily),
    }
}

/// Generates the mock coin list with fresh jitter.
pub fn generate_mock_coins<R: Rng>(rng: &mut R) -> Vec<Coin> {
    MOCK_SEEDS
        .iter()
        .map(|s| Coin {
            symbol: s.symbol.to_string(),
            name: s.name.to_string(),
            price: s.price * (1.0 + rng.random_range(-PRICE_JITTER..PRICE_JITTER)),
            change_24h: s.change + rng.random_range(-CHANGE_JITTER..CHANGE_JITTER),
            market_cap_usd: s.price * MARKET_CAP_MULTIPLIER,
            volume_24h_usd: s.price * VOLUME_MULTIPLIER,
            circulating_supply: MOCK_CIRCULATING_SUPPLY,
        })
        .collect()
}

/// Generates a random-walk candle sequence of `interval_count + 1` bars
/// ending at `now` (epoch seconds).
pub fn generate_mock_history<R: Rng>(
    interval_count: usize,
    granularity: Granularity,
    now: i64,
    rng: &mut R,
) -> Vec<Candle> {
    let step = granularity.seconds();
    let mut price = HISTORY_SEED_PRICE;

    (0..=interval_count)
        .rev()
        .map(|i| {
            let band = price * HISTORY_VOLATILITY;
            let open = price;
            let close = price + (rng.random::<f64>() * band - band / 2.0);
            let high = open.max(close) + rng.random::<f64>() * band * 0.5;
            let low = open.min(close) - rng.random::<f64>() * band * 0.5;
            price = close;
            Candle::new(now - i as i64 * step, open, high, low, close)
        })
        .collect()
}

/// Mock provider. Every call waits `latency` to mimic the network.
#[derive(Debug, Clone)]
pub struct MockMarketData {
    latency: Duration,
}

impl MockMarketData {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockMarketData {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

#[async_trait]
impl MarketDataProvider for MockMarketData {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn top_coins(&self) -> Result<Vec<Coin>> {
        self.simulate_latency().await;
        let coins = generate_mock_coins(&mut rand::rng());
        Ok(coins)
    }

    async fn coin_history(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>> {
        self.simulate_latency().await;
        let (count, granularity) = mock_span(timeframe);
        let now = chrono::Utc::now().timestamp();
        debug!(symbol, %timeframe, count, "Generating mock history");
        let candles = generate_mock_history(count, granularity, now, &mut rand::rng());
        Ok(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinboard_domain::chart::is_chart_ready;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_mock_coins_jitter_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let coins = generate_mock_coins(&mut rng);
            assert_eq!(coins.len(), MOCK_SEEDS.len());

            for (coin, seed) in coins.iter().zip(MOCK_SEEDS.iter()) {
                assert_eq!(coin.symbol, seed.symbol);
                assert!((coin.price - seed.price).abs() <= seed.price * PRICE_JITTER + 1e-12);
                assert!((coin.change_24h - seed.change).abs() <= CHANGE_JITTER + 1e-12);
                assert_eq!(coin.market_cap_usd, seed.price * MARKET_CAP_MULTIPLIER);
                assert_eq!(coin.volume_24h_usd, seed.price * VOLUME_MULTIPLIER);
            }
        }
    }

    #[test]
    fn test_mock_history_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = 1_700_000_000;

        let candles = generate_mock_history(24, Granularity::Hourly, now, &mut rng);
        assert_eq!(candles.len(), 25);
        assert_eq!(candles[0].open, HISTORY_SEED_PRICE);
        assert_eq!(candles.last().unwrap().time, now);
        assert_eq!(candles[0].time, now - 24 * 3_600);
        assert!(is_chart_ready(&candles));

        for pair in candles.windows(2) {
            assert_eq!(pair[1].open, pair[0].close);
        }
        for c in &candles {
            assert!(c.high >= c.open.max(c.close));
            assert!(c.low <= c.open.min(c.close));
            assert!((c.close - c.open).abs() <= c.open * HISTORY_VOLATILITY / 2.0 + 1e-9);
        }
    }

    #[test]
    fn test_mock_span_granularity() {
        assert_eq!(mock_span(Timeframe::OneHour), (1, Granularity::Hourly));
        assert_eq!(mock_span(Timeframe::TwentyFourHours), (24, Granularity::Hourly));
        assert_eq!(mock_span(Timeframe::SevenDays), (7, Granularity::Daily));
        assert_eq!(mock_span(Timeframe::ThirtyDays), (30, Granularity::Daily));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_provider_waits_latency() {
        let mock = MockMarketData::default();
        let started = tokio::time::Instant::now();

        let coins = mock.top_coins().await.unwrap();
        assert_eq!(coins.len(), 10);
        assert!(started.elapsed() >= Duration::from_millis(500));

        let candles = mock.coin_history("BTC", Timeframe::ThirtyDays).await.unwrap();
        assert_eq!(candles.len(), 31);
    }
}
