//! # Price Sheet Seeder
//!
//! Populates the database with a reference metal price sheet for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p gemcraft-db --bin seed
//!
//! # Specify database path
//! cargo run -p gemcraft-db --bin seed -- --db ./data/gemcraft.db
//! ```
//!
//! Prices are per gram in the storefront currency. Real prices come from the
//! admin price update; these only make local quotes non-zero.

use std::env;

use gemcraft_db::{init_tracing, Database, QuoteConfig};

/// Reference price sheet: (metal, purity, price per gram)
const PRICE_SHEET: &[(&str, &str, f64)] = &[
    ("Gold", "24k", 7200.0),
    ("Gold", "22k", 6600.0),
    ("Gold", "18k", 5400.0),
    ("Gold", "14k", 4200.0),
    ("Silver", "999", 92.0),
    ("Silver", "925", 85.0),
    ("Platinum", "950", 3100.0),
    ("Palladium", "950", 3300.0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut config = QuoteConfig::load()?;

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
            "--help" | "-h" => {
                println!("Gemcraft Price Sheet Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $GEMCRAFT_DB_PATH or ./gemcraft_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Gemcraft Price Sheet Seeder");
    println!("===========================");
    println!("Database: {}", config.database_path.display());
    println!();

    let db = Database::new(config.db_config()).await?;
    let prices = db.metal_prices();

    let existing = prices.count().await?;
    if existing > 0 {
        println!("Price sheet already has {} entries", existing);
        println!("  Skipping seed to keep current prices.");
        return Ok(());
    }

    for (metal, purity, price_per_gram) in PRICE_SHEET {
        let record = prices.upsert(metal, purity, *price_per_gram).await?;
        println!(
            "  {:<10} {:<5} {:>10.2} / g",
            record.metal, record.purity, record.price_per_gram
        );
    }

    println!();
    println!("Seeded {} metal prices", PRICE_SHEET.len());

    db.close().await;
    Ok(())
}
