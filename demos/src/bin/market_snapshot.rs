//! Demo 1: Market Snapshot
//!
//! Showcases: public endpoints (ticker, order book, trades, lend book)
//!
//! Run: cargo run --bin market_snapshot -- [symbol]

use bitfinex_rest::{BookParams, ClientConfig, PublicClient, TradesParams};
use colored::*;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("-")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "btcusd".to_string());

    println!("{}", "═".repeat(60).cyan());
    println!("{}", format!("  MARKET SNAPSHOT: {}", symbol.to_uppercase()).cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = PublicClient::with_config(ClientConfig::from_env()?)?;

    let ticker = client.ticker(&symbol).await?;
    println!(
        "  {} {}  {} {}  {} {}",
        "BID:".yellow(),
        field(&ticker, "bid"),
        "ASK:".yellow(),
        field(&ticker, "ask"),
        "LAST:".green(),
        field(&ticker, "last_price"),
    );
    println!("  {} {}", "24h VOLUME:".yellow(), field(&ticker, "volume"));
    println!();

    let book = client.order_book(&symbol, &BookParams::depth(5)).await?;
    println!("{}", "  Top of book".bold());
    let empty = Vec::new();
    let bids = book["bids"].as_array().unwrap_or(&empty);
    let asks = book["asks"].as_array().unwrap_or(&empty);
    for (bid, ask) in bids.iter().zip(asks.iter()) {
        println!(
            "  {:>14} @ {:<12} | {:<12} @ {:>14}",
            field(bid, "amount").green(),
            field(bid, "price"),
            field(ask, "price"),
            field(ask, "amount").red(),
        );
    }
    println!();

    let trades = client
        .trades(&symbol, &TradesParams { timestamp: None, limit_trades: Some(5) })
        .await?;
    println!("{}", "  Recent trades".bold());
    for trade in trades.as_array().unwrap_or(&empty) {
        let side = field(trade, "type");
        let side = if side == "buy" { side.green() } else { side.red() };
        println!("  {:>5} {} @ {}", side, field(trade, "amount"), field(trade, "price"));
    }
    println!();

    let currency: String = symbol.chars().take(3).collect();
    let lend_book = client.lend_book(&currency, &BookParams::depth(3)).await?;
    println!("{}", format!("  Funding book ({})", currency.to_uppercase()).bold());
    for offer in lend_book["asks"].as_array().unwrap_or(&empty) {
        println!(
            "  rate {} for {} days, amount {}",
            field(offer, "rate"),
            offer["period"],
            field(offer, "amount")
        );
    }

    println!();
    println!("{} Done", "✓".green());
    Ok(())
}
