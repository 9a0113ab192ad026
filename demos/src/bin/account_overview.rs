//! Demo 2: Account Overview
//!
//! Showcases: signed requests against read-only private endpoints
//!
//! Run: BITFINEX_API_KEY=... BITFINEX_API_SECRET=... cargo run --bin account_overview

use bitfinex_rest::{RestError, TradingClient};
use colored::*;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT OVERVIEW".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = TradingClient::from_env()?;
    println!("{} Using account {:?}", "✓".green(), client.credentials().account());
    println!();

    match client.balances().await {
        Ok(balances) => {
            println!("{}", "  Balances".bold());
            for wallet in balances.as_array().into_iter().flatten() {
                println!(
                    "  {:<10} {:<6} {:>18}",
                    wallet["type"].as_str().unwrap_or("-"),
                    wallet["currency"].as_str().unwrap_or("-").to_uppercase(),
                    wallet["amount"].as_str().unwrap_or("0"),
                );
            }
        }
        Err(RestError::Auth { message, .. }) => {
            println!("{} Credentials rejected: {}", "✗".red(), message);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }
    println!();

    let orders = client.active_orders().await?;
    let count = orders.as_array().map_or(0, Vec::len);
    println!("  {} {}", "Open orders:".yellow(), count);

    let margin = client.margin_infos().await?;
    if let Some(info) = margin.get(0) {
        println!(
            "  {} {}",
            "Tradable balance:".yellow(),
            info.get("margin_balance").unwrap_or(&Value::Null)
        );
    }

    println!();
    println!("{} Done", "✓".green());
    Ok(())
}
