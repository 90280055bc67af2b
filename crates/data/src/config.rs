//! Data source configuration.

use crate::error::{DataError, Result};
use std::str::FromStr;
use std::time::Duration;

/// Default CoinGecko REST base URL.
pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";
/// Default Kraken REST base URL.
pub const DEFAULT_KRAKEN_BASE_URL: &str = "https://api.kraken.com";

/// Which data path backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataMode {
    /// Synthetic data, no network access.
    #[default]
    Mock,
    /// CoinGecko snapshots enriched with Kraken quotes.
    Live,
}

impl FromStr for DataMode {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mock" | "" => Ok(Self::Mock),
            "live" => Ok(Self::Live),
            other => Err(DataError::Config(format!("unknown data mode '{other}'"))),
        }
    }
}

/// Configuration for the market data layer.
#[derive(Debug, Clone)]
pub struct DataConfig {
    /// Mock or live data.
    pub mode: DataMode,
    /// CoinGecko base URL.
    pub coingecko_base_url: String,
    /// Kraken base URL.
    pub kraken_base_url: String,
    /// Transport timeout applied to every request.
    pub http_timeout: Duration,
    /// Number of CoinGecko snapshots requested before filtering.
    pub market_page_size: u32,
    /// Maximum coins returned by the top list.
    pub top_limit: usize,
    /// Artificial delay applied by the mock generator.
    pub mock_latency: Duration,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            mode: DataMode::Mock,
            coingecko_base_url: DEFAULT_COINGECKO_BASE_URL.to_string(),
            kraken_base_url: DEFAULT_KRAKEN_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(20),
            market_page_size: 100,
            top_limit: 10,
            mock_latency: Duration::from_millis(500),
        }
    }
}

impl DataConfig {
    /// Builds a configuration from process environment variables.
    ///
    /// # Errors
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// Recognized keys: `COINBOARD_MODE`, `COINGECKO_API_BASE_URL`,
    /// `KRAKEN_API_BASE_URL`, `COINBOARD_HTTP_TIMEOUT_SECS`,
    /// `COINBOARD_MOCK_LATENCY_MS`.
    ///
    /// # Errors
    /// Returns an error if a value is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = lookup("COINBOARD_MODE") {
            config.mode = mode.parse()?;
        }
        if let Some(url) = lookup("COINGECKO_API_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config.coingecko_base_url = url.trim().to_string();
        }
        if let Some(url) = lookup("KRAKEN_API_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config.kraken_base_url = url.trim().to_string();
        }
        if let Some(secs) = lookup("COINBOARD_HTTP_TIMEOUT_SECS") {
            config.http_timeout = Duration::from_secs(parse_number("COINBOARD_HTTP_TIMEOUT_SECS", &secs)?);
        }
        if let Some(ms) = lookup("COINBOARD_MOCK_LATENCY_MS") {
            config.mock_latency = Duration::from_millis(parse_number("COINBOARD_MOCK_LATENCY_MS", &ms)?);
        }

        Ok(config)
    }

    /// Sets the data mode.
    #[must_use]
    pub fn with_mode(mut self, mode: DataMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the mock latency.
    #[must_use]
    pub fn with_mock_latency(mut self, latency: Duration) -> Self {
        self.mock_latency = latency;
        self
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| DataError::Config(format!("{key} must be a non-negative integer, got '{value}'")))
}
