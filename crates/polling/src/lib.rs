//! Polling data queries for the dashboard views.
//!
//! - A generic [`Poller`] exposing loading, error and data state
//! - The coin list query (30 s) and the history query (10 s)

/// Query hooks.
pub mod hooks;
/// Generic poller.
pub mod poller;

pub use hooks::{
    CoinHistoryQuery, HISTORY_INTERVAL, HistorySelection, TOP_COINS_INTERVAL, TopCoinsQuery,
    coin_history_query, top_coins_query,
};
pub use poller::{Poller, QueryHandle, QuerySnapshot, QueryStatus};
