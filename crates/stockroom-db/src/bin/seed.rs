//! # Seed Data Generator
//!
//! Populates a database with demo catalog data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p stockroom-db --bin seed
//!
//! # Specify database path and tenant
//! cargo run -p stockroom-db --bin seed -- --db ./data/stockroom.db --tenant demo
//! ```
//!
//! ## What Gets Created
//! - A demo catalog across a few categories with realistic prices/stock
//! - A restock and a couple of manual adjustments, so ledgers have history
//! - One sample order, so order numbering and sale entries are visible

use chrono::Utc;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use stockroom_core::ledger::plan_initial_entry;
use stockroom_core::{OrderDraft, OrderLine, Product, TransactionKind};
use stockroom_db::{Database, DbConfig};

/// Demo catalog: (name, category, price_cents, initial_stock, threshold).
const CATALOG: &[(&str, &str, i64, i64, i64)] = &[
    ("Wireless Mouse", "Electronics", 2599, 50, 10),
    ("Mechanical Keyboard", "Electronics", 7950, 12, 5),
    ("USB Hub", "Electronics", 3500, 30, 8),
    ("27\" Monitor", "Electronics", 24999, 6, 3),
    ("Desk Lamp", "Homeware", 2199, 25, 5),
    ("Clip Fan", "Homeware", 1650, 18, 5),
    ("A5 Notebook", "Stationery", 499, 120, 30),
    ("Gel Pen 3-Pack", "Stationery", 349, 200, 50),
    ("Sticky Notes", "Stationery", 275, 80, 20),
    ("Canvas Tote", "Accessories", 1299, 40, 10),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./stockroom_dev.db");
    let mut tenant_id = String::from("demo");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--tenant" | "-t" => {
                if i + 1 < args.len() {
                    tenant_id = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: ./stockroom_dev.db)");
                println!("  -t, --tenant <ID>    Tenant to seed (default: demo)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockroom Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Tenant:   {}", tenant_id);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("* Connected to database");
    println!("* Migrations applied");

    let existing = db.products().count(&tenant_id).await?;
    if existing > 0 {
        println!("! Tenant already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Creating products...");

    let mut products: Vec<Product> = Vec::with_capacity(CATALOG.len());
    for (name, category, price_cents, stock, threshold) in CATALOG {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            tenant_id: tenant_id.clone(),
            name: (*name).to_string(),
            description: Some(format!("{} ({})", name, category)),
            price_cents: *price_cents,
            current_stock: *stock,
            low_stock_threshold: *threshold,
            category: Some((*category).to_string()),
            image_url: None,
            ai_hint: Some(name.to_lowercase()),
            created_at: now,
            updated_at: now,
        };
        let entry = plan_initial_entry(&product, now);
        db.products().create(&product, &entry).await?;
        products.push(product);
    }

    println!("* Created {} products", products.len());

    // Some ledger history beyond the initial entries
    let mouse = &products[0];
    db.ledger()
        .apply_change(
            &tenant_id,
            &mouse.id,
            20,
            TransactionKind::Restock,
            Some("Weekly delivery".to_string()),
            None,
        )
        .await?;
    db.ledger()
        .apply_change(
            &tenant_id,
            &products[4].id,
            -2,
            TransactionKind::Adjustment,
            Some("Display units damaged".to_string()),
            None,
        )
        .await?;

    println!("* Recorded restock and adjustment entries");

    // A sample order: keyboard with a discount, plus a notebook
    let draft = OrderDraft::new(vec![
        OrderLine::for_product(&products[1], 1, 500),
        OrderLine::for_product(&products[6], 3, 0),
    ]);
    let (order, _) = db
        .orders()
        .create(&tenant_id, &draft, Some("Seed order".to_string()))
        .await?;

    info!(order_number = %order.order_number, total_cents = order.total_cents, "Seed order created");
    println!(
        "* Created order {} ({} items, total {})",
        order.order_number,
        order.items.len(),
        order.total()
    );

    let summary = db.products().summary(&tenant_id).await?;
    println!();
    println!("Inventory summary:");
    println!("  Products:    {}", summary.product_count);
    println!("  Units:       {}", summary.total_units);
    println!("  Stock value: ${}.{:02}", summary.stock_value_cents / 100, summary.stock_value_cents % 100);
    println!("  Low stock:   {}", summary.low_stock_count);

    println!();
    println!("* Seed complete!");

    Ok(())
}
