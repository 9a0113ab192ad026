//! Demo 3: Offline Request Signing
//!
//! Showcases: payload construction and HMAC-SHA384 signing without any network
//! access. Prints the headers a private request would carry.
//!
//! Run: cargo run --bin sign_payload -- /v1/account_infos

use bitfinex_auth::{decode_payload, Credentials, NonceGenerator, RequestSigner};
use colored::*;
use serde_json::Map;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/v1/account_infos".to_string());

    let credentials = Credentials::from_env()
        .unwrap_or_else(|_| Credentials::new("demo", "demo-api-key", "demo-api-secret"));
    let nonces = NonceGenerator::new();
    let signer = RequestSigner::new(&credentials, &nonces);

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  OFFLINE REQUEST SIGNING".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    for _ in 0..2 {
        let signed = signer.sign(&path, Map::new())?;
        println!("  {} {}", "nonce:".yellow(), signed.nonce);
        for (name, value) in signed.headers() {
            println!("  {} {}", format!("{}:", name).green(), value);
        }
        println!(
            "  {} {}",
            "decoded payload:".yellow(),
            serde_json::Value::Object(decode_payload(&signed.payload)?)
        );
        println!();
    }

    Ok(())
}
