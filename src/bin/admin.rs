//! CLI administration tool for product-jsonadm.
//!
//! Inspects products and their related records straight from the database,
//! without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show table sizes
//! cargo run --bin admin -- db info
//!
//! # Show a product with its properties and text references
//! cargo run --bin admin -- product show 1 --include product/property,text
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use product_jsonadm::application::services::ProductService;
use product_jsonadm::domain::entities::ResourceItem;
use product_jsonadm::infrastructure::persistence::PgManagerFactory;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indexmap::IndexMap;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for inspecting product-jsonadm data.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Show a product and its related records
    Show {
        /// Product ID
        id: i64,

        /// Related resource types, comma separated (e.g. "product/property,text")
        #[arg(short, long, value_delimiter = ',')]
        include: Vec<String>,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Product { action } => handle_product_action(action, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_product_action(action: ProductAction, pool: PgPool) -> Result<()> {
    let factory = Arc::new(PgManagerFactory::new(Arc::new(pool)));
    let service = ProductService::new(factory);

    match action {
        ProductAction::Show { id, include } => show_product(&service, id, &include).await?,
    }

    Ok(())
}

/// Prints a product followed by the records resolved for `include`.
async fn show_product(service: &ProductService, id: i64, include: &[String]) -> Result<()> {
    let include: Vec<String> = include
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let product = service
        .get_product(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load product: {}", e))?;

    let ResourceItem::Product(p) = &product else {
        anyhow::bail!("Record {id} is not a product");
    };

    println!("{}", "📦 Product".bright_blue().bold());
    println!();
    println!("  ID:     {}", p.id.to_string().bright_black());
    println!("  Code:   {}", p.code.cyan());
    println!("  Label:  {}", p.label);
    println!("  Type:   {}", p.kind);
    println!("  Status: {}", status_label(p.status));
    println!(
        "  Edited: {}",
        p.mtime.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    println!();

    if include.is_empty() {
        return Ok(());
    }

    let items = IndexMap::from([(product.id(), product.clone())]);
    let included = service
        .get_included(&items, &include)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load related records: {}", e))?;

    if included.is_empty() {
        println!("{}", "No related records found".yellow());
        println!();
        return Ok(());
    }

    for child in &included.children {
        if let ResourceItem::Property(prop) = child {
            println!(
                "  {:<18} {:<4} {:<12} {:<6} {}",
                child.resource_type().bright_white(),
                prop.id.to_string().bright_black(),
                prop.kind.cyan(),
                prop.language_id.as_deref().unwrap_or("-"),
                prop.value
            );
        }
    }

    for list in included.lists.values() {
        if let ResourceItem::ListItem(li) = list {
            println!(
                "  {:<18} {:<4} {:<12} {:<6} {} {}",
                li.domain.bright_white(),
                li.id.to_string().bright_black(),
                li.kind.cyan(),
                li.position,
                li.ref_id.bright_green(),
                status_label(li.status)
            );
        }
    }

    println!();
    println!(
        "  Total: {}",
        (included.children.len() + included.lists.len())
            .to_string()
            .bright_white()
            .bold()
    );
    println!();

    Ok(())
}

fn status_label(status: i32) -> ColoredString {
    match status {
        1 => "ENABLED".green(),
        0 => "DISABLED".red(),
        _ => status.to_string().yellow(),
    }
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();

            for table in ["products", "product_property", "product_lists"] {
                let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                    .fetch_one(pool)
                    .await?;

                println!(
                    "  {:<18} {}",
                    table,
                    count.to_string().bright_green().bold()
                );
            }
            println!();
        }
    }

    Ok(())
}
