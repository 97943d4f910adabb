//! Terminal rendering of pair snapshots.

use chrono::{DateTime, Local};
use pairscope_domain::PairSnapshot;
use prettytable::{Table, format, row};
use rust_decimal::Decimal;

/// Renders the snapshot as a two-column comparison of token0 and token1
/// followed by pair-level figures.
pub fn render_table(snapshot: &PairSnapshot) -> String {
    let t0 = &snapshot.token0;
    let t1 = &snapshot.token1;

    let mut tokens = Table::new();
    tokens.set_format(*format::consts::FORMAT_BOX_CHARS);
    tokens.set_titles(row!["", "Token 0", "Token 1"]);
    tokens.add_row(row!["Name", t0.name, t1.name]);
    tokens.add_row(row!["Symbol", t0.symbol, t1.symbol]);
    tokens.add_row(row!["Address", t0.address, t1.address]);
    tokens.add_row(row!["Decimals", t0.decimals, t1.decimals]);
    tokens.add_row(row!["Reserve", t0.reserve, t1.reserve]);
    tokens.add_row(row![
        "Raw reserve",
        snapshot.reserves.reserve0,
        snapshot.reserves.reserve1
    ]);

    let mut pair = Table::new();
    pair.set_format(*format::consts::FORMAT_BOX_CHARS);
    pair.add_row(row!["Pair", snapshot.pair]);
    pair.add_row(row![
        format!("{} per {}", t1.symbol, t0.symbol),
        format_price(snapshot.price_of_token0())
    ]);
    pair.add_row(row![
        format!("{} per {}", t0.symbol, t1.symbol),
        format_price(snapshot.price_of_token1())
    ]);
    pair.add_row(row!["LP total supply", snapshot.total_supply]);
    pair.add_row(row![
        "Reserves updated",
        format_unix(snapshot.reserves.block_timestamp_last)
    ]);
    pair.add_row(row!["Block", snapshot.block_number]);
    pair.add_row(row![
        "Fetched",
        snapshot
            .last_updated
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
    ]);

    format!("{tokens}{pair}")
}

fn format_price(price: Option<Decimal>) -> String {
    match price {
        Some(p) => p.round_dp(8).normalize().to_string(),
        None => "n/a".to_string(),
    }
}

fn format_unix(timestamp: u32) -> String {
    DateTime::from_timestamp(i64::from(timestamp), 0)
        .map(|dt| format!("{} ({timestamp})", dt.format("%Y-%m-%d %H:%M:%S UTC")))
        .unwrap_or_else(|| timestamp.to_string())
}
