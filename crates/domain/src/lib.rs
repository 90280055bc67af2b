//! Core types for the coin dashboard.
//!
//! - Canonical coin and candle records
//! - The static symbol mapping between CoinGecko ids and Kraken pairs
//! - History timeframes
//! - Chart series preparation

/// Chart series preparation.
pub mod chart;
/// Coin and candle records.
pub mod entities;
/// Enumerations.
pub mod enums;
/// Error types.
pub mod error;
/// Symbol mapping table.
pub mod symbols;

pub use entities::{Candle, Coin};
pub use enums::Timeframe;
pub use error::DomainError;
pub use symbols::SymbolMapEntry;
