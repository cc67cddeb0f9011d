//! # Seed Data Generator
//!
//! Populates the catalog with sample retailers, products and prices for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed ./stopb4u_dev.db (created if missing)
//! cargo run -p stopb4u-db --bin seed
//!
//! # Seed another store
//! cargo run -p stopb4u-db --bin seed -- --db postgres://localhost/stopb4u
//! ```
//!
//! ## Generated Data
//! Every product gets a listing at every retailer. Prices derive from the
//! product's base price and a per-retailer markup, so runs are
//! deterministic; every fifth listing is marked out of stock.

use std::env;
use stopb4u_db::{Database, DbConfig};

/// Retailers: (name, website, markup in basis points)
const RETAILERS: &[(&str, &str, i64)] = &[
    ("MegaMart", "https://megamart.example", -500),
    ("CornerShop", "https://cornershop.example", 1200),
    ("QuickBuy", "https://quickbuy.example", 300),
    ("ValueHub", "https://valuehub.example", 0),
    ("Boutique Direct", "https://boutique.example", 2500),
];

/// Products: (name, brand, category, base price in cents)
const PRODUCTS: &[(&str, &str, &str, i64)] = &[
    ("Espresso Beans 1kg", "Lavazza", "Coffee", 1999),
    ("Ground Coffee 500g", "Illy", "Coffee", 1249),
    ("Green Tea 100 bags", "Twinings", "Tea", 649),
    ("Oat Milk 1L", "Oatly", "Dairy Alternatives", 299),
    ("Almond Milk 1L", "Alpro", "Dairy Alternatives", 279),
    ("Wireless Mouse", "Logitech", "Computer Accessories", 2999),
    ("Mechanical Keyboard", "Keychron", "Computer Accessories", 8999),
    ("USB-C Hub 7-in-1", "Anker", "Computer Accessories", 3499),
    ("27\" Monitor", "Dell", "Monitors", 27999),
    ("Noise Cancelling Headphones", "Sony", "Audio", 34999),
    ("Bluetooth Speaker", "JBL", "Audio", 9999),
    ("Electric Kettle 1.7L", "Breville", "Kitchen", 5499),
    ("Chef's Knife 8\"", "Victorinox", "Kitchen", 4599),
    ("Cast Iron Skillet 10\"", "Lodge", "Kitchen", 3299),
    ("Running Shoes", "Asics", "Footwear", 11999),
    ("Yoga Mat", "Manduka", "Fitness", 6999),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_url = String::from("sqlite://stopb4u_dev.db?mode=rwc");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_url = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("STOP B4U SHOP Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <URL>     Database URL (default: sqlite://stopb4u_dev.db?mode=rwc)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = DbConfig::new(db_url);
    println!("🌱 STOP B4U SHOP Seed Data Generator");
    println!("====================================");
    println!("Database: {}", config.redacted_url());
    println!();

    let db = Database::new(config).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let repo = db.products();
    let existing = repo.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    let mut retailers = Vec::with_capacity(RETAILERS.len());
    for (name, website, markup_bps) in RETAILERS {
        let retailer = repo.insert_retailer(name, Some(website)).await?;
        retailers.push((retailer, *markup_bps));
    }
    println!("✓ Inserted {} retailers", retailers.len());

    let mut listings = 0;
    for (product_idx, (name, brand, category, base_cents)) in PRODUCTS.iter().enumerate() {
        let product = repo.insert_product(name, Some(brand), Some(category)).await?;

        for (retailer_idx, (retailer, markup_bps)) in retailers.iter().enumerate() {
            let price_cents = marked_up(*base_cents, *markup_bps, product_idx + retailer_idx);
            let in_stock = (product_idx + retailer_idx) % 5 != 0;
            let url = retailer
                .website
                .as_ref()
                .map(|site| format!("{}/p/{}", site, slug(name)));

            if let Err(e) = repo
                .insert_listing(&product.id, &retailer.id, price_cents, in_stock, url.as_deref())
                .await
            {
                eprintln!("Failed to list {} at {}: {}", name, retailer.name, e);
                continue;
            }
            listings += 1;
        }
    }

    println!(
        "✓ Generated {} products and {} listings in {:?}",
        PRODUCTS.len(),
        listings,
        start.elapsed()
    );

    // Quick sanity check
    let hits = repo.search("milk", 10).await?;
    println!("  Search 'milk' returned {} products", hits.len());

    db.close().await;
    println!();
    println!("🎉 Seed complete!");
    Ok(())
}

/// Applies a markup and a small deterministic jitter, keeping a .x9 ending.
fn marked_up(base_cents: i64, markup_bps: i64, jitter_seed: usize) -> i64 {
    let jitter = (jitter_seed as i64 % 7 - 3) * 25;
    let price = base_cents + base_cents * markup_bps / 10_000 + jitter;
    let rounded = (price / 10) * 10 + 9;
    rounded.max(99)
}

fn slug(name: &str) -> String {
    name.chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c == ' ' || c == '-' {
                Some('-')
            } else {
                None
            }
        })
        .collect()
}
