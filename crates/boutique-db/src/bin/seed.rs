//! # Seed Data Generator
//!
//! Populates the database with the boutique's starter catalog and staff
//! accounts for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./boutique_dev.db (default)
//! cargo run -p boutique-db --bin seed
//!
//! # Specify database path
//! cargo run -p boutique-db --bin seed -- --db ./data/boutique.db
//! ```

use std::env;

use boutique_db::{Database, DbConfig};

/// Starter catalog: (name, price in UGX minor units, stock).
const SAMPLE_PRODUCTS: &[(&str, i64, i64)] = &[
    ("Kids T-Shirt (Blue)", 15_000, 25),
    ("Kids Dress", 35_000, 15),
    ("Kids Shorts", 12_000, 20),
    ("Baby Romper", 25_000, 8),
    ("Kids Jeans", 28_000, 12),
    ("Kids Jacket", 45_000, 5),
    ("Baby Blanket", 30_000, 18),
    ("Kids Socks", 5_000, 30),
];

/// Staff accounts: (username, password, full name, email). Passwords are
/// hashed before insert; these are development credentials only.
const SAMPLE_ACCOUNTS: &[(&str, &str, &str, &str)] = &[
    ("joanah", "boutique123", "Joanah Nakato", "joanah@boutique.ug"),
    ("manager", "manager456", "Shop Manager", "manager@boutique.ug"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./boutique_dev.db");

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
                println!("Boutique POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./boutique_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Boutique POS Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

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
    println!("Seeding catalog...");
    for (name, price, quantity) in SAMPLE_PRODUCTS {
        let product = db.products().insert(name, *price, *quantity).await?;
        println!("  [{}] {} — UGX {} × {}", product.id, name, price, quantity);
    }

    println!();
    println!("Seeding staff accounts...");
    for (username, password, full_name, email) in SAMPLE_ACCOUNTS {
        let hash = hash_password(password)?;
        db.accounts().insert(username, &hash, full_name, email).await?;
        println!("  {} ({})", username, full_name);
    }

    let value = db.products().total_inventory_value().await?;
    println!();
    println!("✓ Seed complete!");
    println!("  {} products, total inventory value UGX {}", SAMPLE_PRODUCTS.len(), value);

    Ok(())
}

fn hash_password(password: &str) -> Result<String, Box<dyn std::error::Error>> {
    use argon2::password_hash::rand_core::OsRng;
    use argon2::password_hash::{PasswordHasher, SaltString};
    use argon2::Argon2;

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("password hashing failed: {e}"))?;

    Ok(hash.to_string())
}
