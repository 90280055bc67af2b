//! Request handlers.

use crate::error::ApiError;
use crate::models::{HealthResponse, HistoryParams, HistoryResponse};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use coinboard_domain::chart::prepare_series;
use coinboard_domain::entities::find_by_symbol;
use coinboard_domain::{Coin, Timeframe};
use coinboard_polling::QuerySnapshot;
use tracing::debug;

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        source: state.service.source().to_string(),
    })
}

/// `GET /api/coins`: the latest coin list snapshot.
pub async fn list_coins(State(state): State<AppState>) -> Json<QuerySnapshot<Vec<Coin>>> {
    Json(state.top_coins.snapshot())
}

/// `GET /api/coins/{symbol}`
pub async fn get_coin(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Coin>, ApiError> {
    let snapshot = state.top_coins.snapshot();
    let coin = match snapshot.data.as_deref() {
        Some(coins) => find_by_symbol(coins, &symbol).cloned(),
        // The poller has not resolved yet.
        None => state.service.find_coin(&symbol).await,
    };

    coin.map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("coin {symbol}")))
}

/// `GET /api/coins/{symbol}/history?timeframe=24h`
pub async fn coin_history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let timeframe = match params.timeframe.as_deref() {
        Some(raw) => raw
            .parse::<Timeframe>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => Timeframe::default(),
    };

    let candles = prepare_series(state.service.coin_history(&symbol, timeframe).await);
    debug!(%symbol, %timeframe, candles = candles.len(), "Serving history");

    Ok(Json(HistoryResponse {
        symbol: symbol.to_uppercase(),
        timeframe,
        candles,
    }))
}
