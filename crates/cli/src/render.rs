//! Terminal rendering of coins and candles.

use coinboard_domain::{Candle, Coin};
use prettytable::{Cell, Row, Table, row};

/// Formats a USD amount with a compact suffix (K, M, B, T).
pub fn compact_usd(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e12 {
        (value / 1e12, "T")
    } else if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };
    format!("${scaled:.2}{suffix}")
}

/// Formats a price with precision suited to its magnitude.
pub fn price(value: f64) -> String {
    if value >= 1.0 {
        format!("${value:.2}")
    } else if value >= 0.01 {
        format!("${value:.4}")
    } else {
        format!("${value:.8}")
    }
}

/// Formats a signed percentage.
pub fn change(value: f64) -> String {
    format!("{value:+.2}%")
}

/// Style spec for a value that moved up (green) or down (red), right aligned.
fn trend_spec(up: bool) -> &'static str {
    if up { "Fgr" } else { "Frr" }
}

fn right(text: String) -> Cell {
    Cell::new(&text).style_spec("r")
}

/// Builds the coin list table.
pub fn coins_table(coins: &[Coin]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["#", "Symbol", "Name", "Price", "24h", "Market Cap", "Volume 24h"]);
    for (rank, coin) in coins.iter().enumerate() {
        table.add_row(Row::new(vec![
            Cell::new(&(rank + 1).to_string()),
            Cell::new(&coin.symbol),
            Cell::new(&coin.name),
            right(price(coin.price)),
            Cell::new(&change(coin.change_24h)).style_spec(trend_spec(coin.is_up())),
            right(compact_usd(coin.market_cap_usd)),
            right(compact_usd(coin.volume_24h_usd)),
        ]));
    }
    table
}

/// Builds a detail table for one coin.
pub fn coin_table(coin: &Coin) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Name", format!("{} ({})", coin.name, coin.symbol)]);
    table.add_row(row!["Price", price(coin.price)]);
    table.add_row(Row::new(vec![
        Cell::new("24h Change"),
        Cell::new(&change(coin.change_24h)).style_spec(trend_spec(coin.is_up())),
    ]));
    table.add_row(row!["Market Cap", compact_usd(coin.market_cap_usd)]);
    table.add_row(row!["Volume 24h", compact_usd(coin.volume_24h_usd)]);
    table.add_row(row!["Circulating Supply", format!("{:.0}", coin.circulating_supply)]);
    table
}

/// Builds the candle table.
pub fn candles_table(candles: &[Candle]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Time (UTC)", "Open", "High", "Low", "Close"]);
    for candle in candles {
        let datetime = chrono::DateTime::from_timestamp(candle.time, 0).unwrap_or_default();
        table.add_row(Row::new(vec![
            Cell::new(&datetime.format("%Y-%m-%d %H:%M").to_string()),
            right(price(candle.open)),
            right(price(candle.high)),
            right(price(candle.low)),
            Cell::new(&price(candle.close)).style_spec(trend_spec(candle.is_bullish())),
        ]));
    }
    table
}
