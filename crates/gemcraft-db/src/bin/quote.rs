//! # Quote Tool
//!
//! Prices a product document against the local metal price sheet and prints
//! the quote as JSON.
//!
//! ## Usage
//! ```bash
//! # Quote a product (all variants)
//! cargo run -p gemcraft-db --bin quote -- --file ring.json
//!
//! # Quote a single variant (no gemstones) read from stdin at 5% tax
//! cat variant.json | cargo run -p gemcraft-db --bin quote -- --variant --tax-percent 5
//! ```

use std::env;
use std::io::Read;

use gemcraft_core::{PriceQuoteOptions, PricingInput, Variant};
use gemcraft_db::config::parse_tax_percent;
use gemcraft_db::{init_tracing, ConfigError, Database, QuoteConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut config = QuoteConfig::load()?;
    let mut file: Option<String> = None;
    let mut variant_only = false;

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--file" | "-f" => {
                if i + 1 < args.len() {
                    file = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--tax-percent" | "-t" => {
                if i + 1 < args.len() {
                    let pct = parse_tax_percent(&args[i + 1])
                        .ok_or_else(|| ConfigError::InvalidValue("--tax-percent".to_string()))?;
                    config.tax_percent = Some(pct);
                    i += 1;
                }
            }
            "--variant" | "-v" => variant_only = true,
            "--help" | "-h" => {
                println!("Gemcraft Quote Tool");
                println!();
                println!("Usage: quote [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>           Database file path (default: $GEMCRAFT_DB_PATH or ./gemcraft_dev.db)");
                println!("  -f, --file <PATH>         Product JSON document (default: stdin)");
                println!("  -t, --tax-percent <PCT>   Tax percentage (default: $GEMCRAFT_TAX_PERCENT or 3)");
                println!("  -v, --variant             Quote the document as a single variant, without gemstones");
                println!("  -h, --help                Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let document = match &file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let options = PriceQuoteOptions {
        tax_percent: config.tax_percent,
    };

    let db = Database::new(config.db_config()).await?;
    let engine = db.pricing_engine();

    info!(
        source = file.as_deref().unwrap_or("stdin"),
        variant_only,
        tax_percent = options.tax_rate().percent(),
        "Quoting document"
    );

    let output = if variant_only {
        let variant: Variant = serde_json::from_str(&document)?;
        serde_json::to_string_pretty(&engine.compute_variant_price(&variant, &options).await)?
    } else {
        let product: PricingInput = serde_json::from_str(&document)?;
        serde_json::to_string_pretty(&engine.compute_product_price(&product, &options).await)?
    };

    println!("{}", output);

    db.close().await;
    Ok(())
}
