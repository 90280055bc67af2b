//! Read-only JSON API consumed by the dashboard views.
//!
//! - Coin list snapshot from the background poller
//! - Single coin lookup
//! - Chart-ready candle history

/// Error types.
pub mod error;
/// Request handlers.
pub mod handlers;
/// Response models.
pub mod models;
/// Route definitions.
pub mod routes;
/// Server configuration and startup.
pub mod server;
/// Application state.
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use server::{ApiServer, ServerConfig};
pub use state::AppState;
