//! # Seed Data Generator
//!
//! Populates the database with demo catalog data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p saral-db --bin seed
//!
//! # Specify database path
//! cargo run -p saral-db --bin seed -- --db ./data/saral.db
//! ```
//!
//! Seeds a small electrical-goods catalog plus a couple of regular
//! customers, enough to exercise checkout, low-stock and invoice
//! listing by hand.

use std::env;

use saral_db::{Database, DbConfig, NewCustomer, NewProduct};

/// (name, hsn, quantity, cost paise, sale paise, min stock, category)
const PRODUCTS: &[(&str, &str, i64, i64, i64, i64, &str)] = &[
    ("LED Bulb 9W", "9405", 120, 6000, 10000, 20, "Lighting"),
    ("LED Bulb 12W", "9405", 80, 8500, 14000, 20, "Lighting"),
    ("LED Tube Light 20W", "9405", 45, 18000, 28000, 10, "Lighting"),
    ("Ceiling Fan 1200mm", "8414", 25, 90000, 150000, 5, "Fans"),
    ("Table Fan 400mm", "8414", 18, 65000, 110000, 5, "Fans"),
    ("Exhaust Fan 150mm", "8414", 12, 48000, 85000, 4, "Fans"),
    ("Modular Switch 6A", "8536", 200, 2500, 4500, 50, "Switchgear"),
    ("Modular Socket 16A", "8536", 150, 4000, 7500, 40, "Switchgear"),
    ("MCB Single Pole 16A", "8536", 60, 12000, 19500, 15, "Switchgear"),
    ("Copper Wire 1.5sqmm 90m", "8544", 30, 145000, 210000, 8, "Wiring"),
    ("Copper Wire 2.5sqmm 90m", "8544", 24, 225000, 320000, 6, "Wiring"),
    ("PVC Conduit 25mm 3m", "3917", 90, 6500, 11000, 20, "Wiring"),
    ("Extension Board 4-Socket", "8536", 35, 28000, 45000, 10, "Accessories"),
    ("Soldering Iron 25W", "8515", 15, 20000, 35000, 4, "Tools"),
    ("Insulation Tape Roll", "3919", 300, 800, 1500, 60, "Accessories"),
    ("Geyser 15L", "8516", 8, 520000, 720000, 2, "Appliances"),
];

const CUSTOMERS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Ramesh Traders",
        "9876543210",
        "12 Market Road",
        "Same",
        "B2B",
    ),
    (
        "Lakshmi Electricals",
        "9845012345",
        "4 Bazaar Street",
        "Same",
        "B2B",
    ),
    ("Suresh Kumar", "9912345678", "88 Lake View", "Other", "B2C"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./saral_dev.db");

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
                println!("Saral POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./saral_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Saral POS Seed Data Generator");
    println!("================================");
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
    println!("Seeding catalog...");

    for (name, hsn, qty, cost, sale, min_stock, category) in PRODUCTS {
        db.products()
            .insert(NewProduct {
                name: name.to_string(),
                hsn_code: hsn.to_string(),
                quantity: *qty,
                cost_price_paise: *cost,
                sale_price_paise: *sale,
                min_stock: *min_stock,
                category: Some(category.to_string()),
            })
            .await?;
    }
    println!("✓ Seeded {} products", PRODUCTS.len());

    for (name, phone, address, state, customer_type) in CUSTOMERS {
        db.customers()
            .insert(NewCustomer {
                name: name.to_string(),
                phone: Some(phone.to_string()),
                address: Some(address.to_string()),
                place: None,
                pincode: None,
                state: Some(state.to_string()),
                customer_type: Some(customer_type.to_string()),
            })
            .await?;
    }
    println!("✓ Seeded {} customers", CUSTOMERS.len());

    let low = db.products().low_stock().await?;
    println!();
    println!("Low stock items right after seeding: {}", low.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
