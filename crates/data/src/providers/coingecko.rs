//! CoinGecko market snapshot client.

use super::{build_http_client, get_json, join_url};
use crate::error::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const PROVIDER: &str = "coingecko";

/// One entry of `/coins/markets`. Only the fields the dashboard reads are kept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoinGeckoMarket {
    /// CoinGecko coin id, e.g. `bitcoin`.
    pub id: String,
    /// Lowercase ticker.
    pub symbol: String,
    /// Display name.
    pub name: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub total_volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub last_updated: Option<String>,
}

/// Client for the CoinGecko public REST API.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
}

impl CoinGeckoClient {
    /// Creates a client against `base_url` with the given transport timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: build_http_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    /// Fetches one page of USD market snapshots ordered by market cap, descending.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-2xx status or a malformed body.
    pub async fn markets(&self, per_page: u32, page: u32) -> Result<Vec<CoinGeckoMarket>> {
        let query = [
            ("vs_currency", "usd".to_string()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
            ("sparkline", "false".to_string()),
        ];
        get_json(
            &self.http,
            PROVIDER,
            &join_url(&self.base_url, "/coins/markets"),
            &query,
        )
        .await
    }

    /// Fetches USD market snapshots for specific coin ids.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-2xx status or a malformed body.
    pub async fn markets_by_ids(&self, ids: &[&str]) -> Result<Vec<CoinGeckoMarket>> {
        let query = [
            ("vs_currency", "usd".to_string()),
            ("ids", ids.join(",")),
            ("order", "market_cap_desc".to_string()),
            ("sparkline", "false".to_string()),
        ];
        get_json(
            &self.http,
            PROVIDER,
            &join_url(&self.base_url, "/coins/markets"),
            &query,
        )
        .await
    }
}
