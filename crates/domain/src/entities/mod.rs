pub mod candle;
pub mod coin;

// Re-export for easier access
pub use candle::Candle;
pub use coin::{Coin, find_by_symbol};
