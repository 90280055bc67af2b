use serde::{Deserialize, Serialize};

/// A coin as shown in the ranked list, merged from both market data sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    /// Signed 24h change in percent.
    #[serde(rename = "change24h")]
    pub change_24h: f64,
    #[serde(rename = "marketCap")]
    pub market_cap_usd: f64,
    #[serde(rename = "volume24h")]
    pub volume_24h_usd: f64,
    pub circulating_supply: f64,
}

impl Coin {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
            price: 0.0,
            change_24h: 0.0,
            market_cap_usd: 0.0,
            volume_24h_usd: 0.0,
            circulating_supply: 0.0,
        }
    }

    /// Returns true when the 24h change is zero or positive.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.change_24h >= 0.0
    }
}

/// Finds a coin in a list by symbol, ignoring case.
pub fn find_by_symbol<'a>(coins: &'a [Coin], symbol: &str) -> Option<&'a Coin> {
    coins
        .iter()
        .find(|c| c.symbol.eq_ignore_ascii_case(symbol.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_serializes_view_field_names() {
        let mut coin = Coin::new("btc", "Bitcoin");
        coin.change_24h = -1.5;
        coin.market_cap_usd = 10.0;

        let json = serde_json::to_value(&coin).unwrap();
        assert_eq!(json["symbol"], "BTC");
        assert_eq!(json["change24h"], -1.5);
        assert_eq!(json["marketCap"], 10.0);
        assert!(json.get("volume24h").is_some());
        assert!(json.get("circulatingSupply").is_some());
    }

    #[test]
    fn test_find_by_symbol_is_case_insensitive() {
        let coins = vec![Coin::new("BTC", "Bitcoin"), Coin::new("ETH", "Ethereum")];

        assert_eq!(find_by_symbol(&coins, "eth").map(|c| c.name.as_str()), Some("Ethereum"));
        assert!(find_by_symbol(&coins, "SOL").is_none());
    }

    #[test]
    fn test_is_up_includes_flat() {
        let mut coin = Coin::new("ada", "Cardano");
        assert!(coin.is_up());
        coin.change_24h = -0.01;
        assert!(!coin.is_up());
    }
}
