//! Shared application state.

use coinboard_data::MarketDataService;
use coinboard_polling::{TopCoinsQuery, top_coins_query};
use std::sync::Arc;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Market data facade used for on-demand requests.
    pub service: MarketDataService,
    /// Background coin list query.
    pub top_coins: Arc<TopCoinsQuery>,
}

impl AppState {
    /// Creates state and starts the coin list poller.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(service: MarketDataService) -> Self {
        let top_coins = Arc::new(top_coins_query(service.clone()));
        Self { service, top_coins }
    }
}
