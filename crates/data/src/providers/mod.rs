//! Thin REST clients for the two market data providers.
//!
//! Clients issue GET requests and return the typed response body. They do
//! not retry, cache or rate-limit; every failure is returned to the caller.

pub mod coingecko;
pub mod kraken;

pub use coingecko::{CoinGeckoClient, CoinGeckoMarket};
pub use kraken::{KrakenClient, KrakenResponse, KrakenTicker, OhlcEntry, OhlcRow};

use crate::error::{DataError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Builds the shared HTTP client used by a provider.
pub(crate) fn build_http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("coinboard/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Issues a GET and decodes a JSON body, mapping non-2xx statuses to errors.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    provider: &'static str,
    url: &str,
    query: &[(&str, String)],
) -> Result<T> {
    debug!(provider, url, ?query, "GET");
    let response = client.get(url).query(query).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(DataError::Status {
            provider,
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| DataError::Decode { provider, source })
}

/// Joins a base URL and a path without doubling slashes.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
