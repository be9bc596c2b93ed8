//! # Seed Data Generator
//!
//! Writes a products file with generated products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 500 products (default) into ./products.json
//! cargo run -p shelf-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p shelf-store --bin seed -- --count 2000
//!
//! # Specify file path
//! cargo run -p shelf-store --bin seed -- --path ./data/products.json
//! ```
//!
//! Every generated product passes the create rules: non-empty name and
//! code value, expiration on or after 01/01/2023, positive price and stock.

use std::env;

use anyhow::Context;
use shelf_core::{validation, NewProduct, Product};
use shelf_store::{JsonStore, ProductStore, StoreConfig};

/// Product families for realistic test data
const FAMILIES: &[(&str, &[&str])] = &[
    (
        "OIL",
        &["Margarine", "Olive Oil", "Canola Oil", "Sunflower Oil", "Butter"],
    ),
    (
        "BEV",
        &["Cola", "Lemonade", "Iced Tea", "Sparkling Water", "Orange Juice"],
    ),
    (
        "SNK",
        &["Pretzels", "Crackers", "Popcorn", "Tortilla Chips", "Trail Mix"],
    ),
    (
        "DRY",
        &["Spaghetti", "Basmati Rice", "Oat Flakes", "Lentils", "Couscous"],
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 500;
    let mut path = String::from("./products.json");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1]
                        .parse()
                        .with_context(|| format!("invalid --count '{}'", args[i + 1]))?;
                    i += 1;
                }
            }
            "--path" | "-p" => {
                if i + 1 < args.len() {
                    path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shelf Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>     Number of products to generate (default: 500)");
                println!("  -p, --path <PATH>   Products file path (default: ./products.json)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Shelf Seed Data Generator");
    println!("=========================");
    println!("File:     {}", path);
    println!("Products: {}", count);
    println!();

    let store = JsonStore::new(StoreConfig::new(&path).pretty(true));

    let existing = store.get_all().await?.len();
    if existing > 0 {
        println!("⚠ {} already has {} products", path, existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let products: Vec<Product> = (0..count)
        .map(|seed| Product::from_new(seed as u64 + 1, generate_product(seed)))
        .collect();

    for product in &products {
        validation::validate_new_product(&NewProduct::from(product.clone()))
            .with_context(|| format!("generated product {} is invalid", product.code_value))?;
    }

    store
        .save(&products)
        .await
        .with_context(|| format!("writing {}", path))?;

    println!("✓ Generated {} products in {:?}", products.len(), start.elapsed());
    Ok(())
}

/// Generates a single product with realistic data.
fn generate_product(seed: usize) -> NewProduct {
    let (family, names) = FAMILIES[seed % FAMILIES.len()];
    let name = names[(seed / FAMILIES.len()) % names.len()];

    // Unique code value: family prefix plus sequence
    let code_value = format!("{}{:05}", family, seed);

    // Price: 0.99 - 99.99
    let price = (99 + (seed * 37) % 9900) as f64 / 100.0;

    // Stock: 1 - 100
    let quantity = 1 + (seed % 100) as i64;

    // Expiration spread over 2023-2026, day capped at 28 so every month is valid
    let day = 1 + seed % 28;
    let month = 1 + (seed / 28) % 12;
    let year = 2023 + (seed / 336) % 4;

    NewProduct {
        name: format!("{} {}", name, 1 + seed % 3),
        quantity,
        code_value,
        is_published: seed % 5 != 0,
        expiration: format!("{:02}/{:02}/{}", day, month, year),
        price,
    }
}
