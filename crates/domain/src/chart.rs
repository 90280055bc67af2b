//! Preparation of candle sequences before they are handed to a chart.

use crate::entities::Candle;

/// Sorts candles ascending by time and drops duplicate timestamps.
///
/// The sort is stable, so for a repeated timestamp the candle that came
/// first in the input is the one kept.
pub fn prepare_series(mut candles: Vec<Candle>) -> Vec<Candle> {
    candles.sort_by_key(|c| c.time);
    candles.dedup_by_key(|c| c.time);
    candles
}

/// Returns true if times are strictly ascending.
#[must_use]
pub fn is_chart_ready(candles: &[Candle]) -> bool {
    candles.windows(2).all(|w| w[0].time < w[1].time)
}
