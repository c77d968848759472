//! # Seed Data Generator
//!
//! Populates the database with a small storefront for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./vitrina.db
//! cargo run -p vitrina-db --bin seed
//!
//! # Specify database path
//! cargo run -p vitrina-db --bin seed -- --db ./data/vitrina.db
//! ```
//!
//! ## Generated Data
//! - One product per model/storage pair, with varied battery and stock
//!   (some at zero stock, some hidden)
//! - Three carousel slides
//! - About page text and site logo/background references
//!
//! Image references point at `/uploads/seed/...`; the files themselves are
//! not created.

use std::env;
use vitrina_core::{AboutContent, ProductFields, SiteImages, SlideFields};
use vitrina_db::{Database, DbConfig};

/// Phone models with a base price in cents
const MODELS: &[(&str, i64)] = &[
    ("iPhone 12", 32_900),
    ("iPhone 13", 41_900),
    ("iPhone 14 Pro", 67_900),
    ("Galaxy S21", 29_900),
    ("Galaxy S23", 49_900),
    ("Pixel 7", 34_900),
    ("Pixel 8 Pro", 62_900),
];

/// Storage variants with a price add-on in cents
const STORAGE: &[(&str, i64)] = &[("128GB", 0), ("256GB", 6_000), ("512GB", 14_000)];

const CONDITIONS: &[&str] = &["Like new", "Very good", "Good"];

const SLIDES: &[(&str, &str, &str)] = &[
    ("Refurbished, tested, guaranteed", "#0f172a", "#1e3a8a"),
    ("Trade in your old phone", "#14532d", "#4ade80"),
    ("Free shipping over 300", "#7c2d12", "#fb923c"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./vitrina.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Vitrina Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./vitrina.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Vitrina Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let mut generated = 0;
    for (model_idx, (model, base_price)) in MODELS.iter().enumerate() {
        for (storage_idx, (storage, addon)) in STORAGE.iter().enumerate() {
            let product = generate_product(model, storage, base_price + addon, model_idx * 3 + storage_idx);

            if let Err(e) = db.products().insert(&product).await {
                eprintln!("Failed to insert {} {}: {}", product.name, product.storage, e);
                continue;
            }
            generated += 1;
        }
    }
    println!("✓ Generated {} products", generated);

    for (idx, (text, color1, color2)) in SLIDES.iter().enumerate() {
        let slide = SlideFields {
            text: text.to_string(),
            image: format!("/uploads/seed/slide-{}.jpg", idx + 1),
            mobile_image: format!("/uploads/seed/slide-{}-mobile.jpg", idx + 1),
            color1: color1.to_string(),
            color2: color2.to_string(),
        };
        db.carousel().insert(&slide).await?;
    }
    println!("✓ Generated {} carousel slides", SLIDES.len());

    db.singletons()
        .update_about(&AboutContent {
            title: "About us".to_string(),
            text: "We test, repair and resell used phones with a 12 month warranty.".to_string(),
            image: "/uploads/seed/about.jpg".to_string(),
        })
        .await?;
    db.singletons()
        .update_site_images(&SiteImages {
            logo: "/uploads/seed/logo.svg".to_string(),
            background: "/uploads/seed/background.jpg".to_string(),
        })
        .await?;
    println!("✓ About page and site images set");

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single listing with deterministic variety.
fn generate_product(model: &str, storage: &str, price_cents: i64, seed: usize) -> ProductFields {
    // Every 5th listing is sold out, every 7th hidden
    let stock = if seed % 5 == 4 { 0 } else { 1 + (seed % 4) as i64 };
    let visible = seed % 7 != 6;

    // Battery health 78-100%
    let battery_percent = 78 + ((seed * 13) % 23) as i64;

    ProductFields {
        name: model.to_string(),
        description: format!("{} {}, unlocked, fully tested.", model, storage),
        image: format!("/uploads/seed/{}.jpg", model.to_lowercase().replace(' ', "-")),
        price_cents,
        stock,
        battery_percent,
        storage: storage.to_string(),
        condition: CONDITIONS[seed % CONDITIONS.len()].to_string(),
        visible,
    }
}
