//! Response bodies.

use coinboard_domain::{Candle, Timeframe};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// `live` or `mock`.
    pub source: String,
}

/// Query string of the history endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    pub timeframe: Option<String>,
}

/// Chart-ready history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub symbol: String,
    pub timeframe: Timeframe,
    /// Ascending by time, unique timestamps.
    pub candles: Vec<Candle>,
}
