//! Static symbol mapping between canonical tickers and provider identifiers.
//!
//! Lookups never fail. An unmapped symbol falls back to a synthesized
//! identifier (lowercased symbol for CoinGecko, `<SYMBOL>USD` for Kraken),
//! and an unmapped Kraken pair is echoed back unchanged. Nothing checks
//! that a synthesized identifier exists on the provider.

use std::collections::HashMap;
use std::sync::LazyLock;

/// One row of the mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolMapEntry {
    /// Canonical uppercase ticker, e.g. `BTC`.
    pub symbol: &'static str,
    /// CoinGecko coin id, e.g. `bitcoin`.
    pub coingecko_id: &'static str,
    /// Kraken trading pair code, e.g. `XXBTZUSD`.
    pub kraken_pair: &'static str,
}

const fn entry(
    symbol: &'static str,
    coingecko_id: &'static str,
    kraken_pair: &'static str,
) -> SymbolMapEntry {
    SymbolMapEntry {
        symbol,
        coingecko_id,
        kraken_pair,
    }
}

static SYMBOL_TABLE: [SymbolMapEntry; 15] = [
    entry("BTC", "bitcoin", "XXBTZUSD"),
    entry("ETH", "ethereum", "XETHZUSD"),
    entry("SOL", "solana", "SOLUSD"),
    entry("BNB", "binancecoin", "BNBUSD"),
    entry("ADA", "cardano", "ADAUSD"),
    entry("XRP", "ripple", "XRPUSD"),
    entry("DOGE", "dogecoin", "XDGUSD"),
    entry("DOT", "polkadot", "DOTUSD"),
    entry("AVAX", "avalanche-2", "AVAXUSD"),
    entry("SHIB", "shiba-inu", "SHIBUSD"),
    entry("MATIC", "matic-network", "MATICUSD"),
    entry("LTC", "litecoin", "XLTCZUSD"),
    entry("LINK", "chainlink", "LINKUSD"),
    entry("UNI", "uniswap", "UNIUSD"),
    entry("ATOM", "cosmos", "ATOMUSD"),
];

static BY_SYMBOL: LazyLock<HashMap<&'static str, &'static SymbolMapEntry>> =
    LazyLock::new(|| SYMBOL_TABLE.iter().map(|e| (e.symbol, e)).collect());

static BY_COINGECKO_ID: LazyLock<HashMap<&'static str, &'static SymbolMapEntry>> =
    LazyLock::new(|| SYMBOL_TABLE.iter().map(|e| (e.coingecko_id, e)).collect());

static BY_KRAKEN_PAIR: LazyLock<HashMap<&'static str, &'static SymbolMapEntry>> =
    LazyLock::new(|| SYMBOL_TABLE.iter().map(|e| (e.kraken_pair, e)).collect());

/// Iterates over the mapping table in its declared order.
pub fn entries() -> impl Iterator<Item = &'static SymbolMapEntry> {
    SYMBOL_TABLE.iter()
}

/// Looks up a table row by canonical symbol (case-insensitive).
pub fn lookup(symbol: &str) -> Option<&'static SymbolMapEntry> {
    BY_SYMBOL.get(symbol.to_uppercase().as_str()).copied()
}

/// Returns true if the symbol has an explicit mapping.
#[must_use]
pub fn is_known(symbol: &str) -> bool {
    lookup(symbol).is_some()
}

/// Maps a canonical symbol to its CoinGecko id, falling back to the lowercased symbol.
pub fn to_coingecko_id(symbol: &str) -> String {
    match lookup(symbol) {
        Some(e) => e.coingecko_id.to_string(),
        None => symbol.to_lowercase(),
    }
}

/// Maps a canonical symbol to its Kraken pair code, falling back to `<symbol>USD`.
pub fn to_kraken_pair(symbol: &str) -> String {
    match lookup(symbol) {
        Some(e) => e.kraken_pair.to_string(),
        None => format!("{symbol}USD"),
    }
}

/// Maps a Kraken pair code back to the canonical symbol, echoing unmapped input.
pub fn from_kraken_pair(pair: &str) -> String {
    match BY_KRAKEN_PAIR.get(pair) {
        Some(e) => e.symbol.to_string(),
        None => pair.to_string(),
    }
}

/// Reverse lookup by CoinGecko id. Unlike the forward lookups this has no fallback.
pub fn from_coingecko_id(id: &str) -> Option<&'static SymbolMapEntry> {
    BY_COINGECKO_ID.get(id).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_symbols_map_to_fixed_ids() {
        assert_eq!(to_coingecko_id("BTC"), "bitcoin");
        assert_eq!(to_coingecko_id("AVAX"), "avalanche-2");
        assert_eq!(to_coingecko_id("matic"), "matic-network");
        assert_eq!(to_kraken_pair("BTC"), "XXBTZUSD");
        assert_eq!(to_kraken_pair("doge"), "XDGUSD");
        assert_eq!(to_kraken_pair("LTC"), "XLTCZUSD");
    }

    #[test]
    fn test_unknown_symbols_fall_back() {
        assert_eq!(to_coingecko_id("PEPE"), "pepe");
        assert_eq!(to_kraken_pair("PEPE"), "PEPEUSD");
        assert_eq!(from_kraken_pair("PEPEUSD"), "PEPEUSD");
        assert!(from_coingecko_id("pepe").is_none());
        assert!(!is_known("PEPE"));
    }

    #[test]
    fn test_reverse_lookups() {
        assert_eq!(from_kraken_pair("XETHZUSD"), "ETH");
        assert_eq!(from_coingecko_id("shiba-inu").map(|e| e.symbol), Some("SHIB"));
    }

    #[test]
    fn test_table_is_bijective() {
        for e in entries() {
            assert_eq!(to_coingecko_id(e.symbol), e.coingecko_id);
            assert_eq!(to_kraken_pair(e.symbol), e.kraken_pair);
            assert_eq!(from_kraken_pair(e.kraken_pair), e.symbol);
            assert_eq!(from_coingecko_id(e.coingecko_id), Some(e));
        }
        assert_eq!(entries().count(), 15);
    }
}
