//! Kraken public market data client (ticker quotes and OHLC candles).

use super::{build_http_client, get_json, join_url};
use crate::error::{DataError, Result, parse_decimal};
use coinboard_domain::{Candle, Timeframe};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const PROVIDER: &str = "kraken";

/// Envelope shared by all Kraken public endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct KrakenResponse<T> {
    /// Application errors. Non-empty means the request failed.
    #[serde(default)]
    pub error: Vec<String>,
    /// Payload. Absent when `error` is populated.
    pub result: Option<T>,
}

impl<T: Default> KrakenResponse<T> {
    /// Converts the envelope into its payload, failing on reported errors.
    ///
    /// # Errors
    /// Returns [`DataError::Provider`] if the error list is non-empty.
    pub fn into_result(self) -> Result<T> {
        if !self.error.is_empty() {
            return Err(DataError::Provider {
                provider: PROVIDER,
                errors: self.error,
            });
        }
        Ok(self.result.unwrap_or_default())
    }
}

/// Ticker fields for one pair. Array fields are `[today, last 24 hours]`
/// unless noted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KrakenTicker {
    /// Ask `[price, whole lot volume, lot volume]`.
    #[serde(default)]
    pub a: Vec<String>,
    /// Bid `[price, whole lot volume, lot volume]`.
    #[serde(default)]
    pub b: Vec<String>,
    /// Last trade closed `[price, lot volume]`.
    #[serde(default)]
    pub c: Vec<String>,
    /// Volume.
    #[serde(default)]
    pub v: Vec<String>,
    /// Volume weighted average price.
    #[serde(default)]
    pub p: Vec<String>,
    /// Number of trades.
    #[serde(default)]
    pub t: Vec<u64>,
    /// Low.
    #[serde(default)]
    pub l: Vec<String>,
    /// High.
    #[serde(default)]
    pub h: Vec<String>,
    /// Today's opening price.
    #[serde(default)]
    pub o: String,
}

impl KrakenTicker {
    /// Last trade price.
    ///
    /// # Errors
    /// Returns an error if the field is missing or not numeric.
    pub fn last_trade_price(&self) -> Result<f64> {
        let raw = self.c.first().map(String::as_str).unwrap_or_default();
        parse_decimal("c", raw)
    }

    /// Today's opening price.
    ///
    /// # Errors
    /// Returns an error if the field is missing or not numeric.
    pub fn today_open(&self) -> Result<f64> {
        parse_decimal("o", &self.o)
    }
}

/// Raw OHLC row: `[time, open, high, low, close, vwap, volume, count]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OhlcRow(
    pub i64,
    pub String,
    pub String,
    pub String,
    pub String,
    pub String,
    pub String,
    pub i64,
);

impl OhlcRow {
    /// Converts the row into a candle, parsing the decimal strings.
    ///
    /// # Errors
    /// Returns an error if a price field is not numeric.
    pub fn to_candle(&self) -> Result<Candle> {
        Ok(Candle::new(
            self.0,
            parse_decimal("open", &self.1)?,
            parse_decimal("high", &self.2)?,
            parse_decimal("low", &self.3)?,
            parse_decimal("close", &self.4)?,
        ))
    }
}

/// Value under one key of the OHLC result map.
///
/// Kraken returns the candle rows under the pair key and a pagination
/// cursor under `last`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OhlcEntry {
    /// Candle rows for a pair.
    Rows(Vec<OhlcRow>),
    /// The `last` cursor.
    Cursor(i64),
}

/// Maps a timeframe to the Kraken OHLC interval in minutes.
#[must_use]
pub fn interval_minutes(timeframe: Timeframe) -> u32 {
    match timeframe {
        Timeframe::OneHour => 1,
        Timeframe::TwentyFourHours => 5,
        Timeframe::SevenDays => 60,
        Timeframe::ThirtyDays => 1440,
    }
}

/// Client for the Kraken public REST API.
#[derive(Debug, Clone)]
pub struct KrakenClient {
    http: Client,
    base_url: String,
}

impl KrakenClient {
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

    /// Fetches ticker quotes for a batch of pairs in one request.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-2xx status or a malformed
    /// body. Kraken-reported errors are left in the envelope.
    pub async fn ticker(
        &self,
        pairs: &[&str],
    ) -> Result<KrakenResponse<HashMap<String, KrakenTicker>>> {
        let query = [("pair", pairs.join(","))];
        get_json(
            &self.http,
            PROVIDER,
            &join_url(&self.base_url, "/0/public/Ticker"),
            &query,
        )
        .await
    }

    /// Fetches OHLC candles for one pair at `interval` minutes.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-2xx status or a malformed
    /// body. Kraken-reported errors are left in the envelope.
    pub async fn ohlc(
        &self,
        pair: &str,
        interval: u32,
    ) -> Result<KrakenResponse<HashMap<String, OhlcEntry>>> {
        let query = [("pair", pair.to_string()), ("interval", interval.to_string())];
        get_json(
            &self.http,
            PROVIDER,
            &join_url(&self.base_url, "/0/public/OHLC"),
            &query,
        )
        .await
    }
}
