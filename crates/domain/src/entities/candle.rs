use serde::{Deserialize, Serialize};

/// One OHLC bar. `time` is the bar open in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_bullish() {
        assert!(Candle::new(0, 1.0, 2.0, 0.5, 1.5).is_bullish());
        assert!(Candle::new(0, 1.0, 1.0, 1.0, 1.0).is_bullish());
        assert!(!Candle::new(0, 1.5, 2.0, 0.5, 1.0).is_bullish());
    }
}
