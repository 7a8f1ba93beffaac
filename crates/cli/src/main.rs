//! Crunchbox CLI - Operator tools over a seeded in-memory store.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog with stock levels
//! crunchbox catalog
//!
//! # Place an order for two Cococrunch and one Basreng
//! crunchbox checkout --item p1:2 --item p3 --name "Rina" --address "Jl. Kenanga 3"
//!
//! # Sales for March, Cococrunch Cokelat only
//! crunchbox sales --from 2026-03-01 --to 2026-03-31 --product p1
//!
//! # Dashboard stats and daily revenue
//! crunchbox dashboard
//!
//! # Use a custom seed file
//! crunchbox --seed seed/demo.yaml catalog
//! ```
//!
//! # Commands
//!
//! - `catalog` - List products with price and stock
//! - `checkout` - Build a cart and place an order
//! - `sales` - Sales report for a date range and product
//! - `dashboard` - Headline stats plus per-day revenue

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "crunchbox")]
#[command(author, version, about = "Crunchbox snack shop tools")]
struct Cli {
    /// YAML seed file (overrides `ADMIN_SEED_FILE`)
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products with price, stock and stock level
    Catalog,
    /// Build a cart and place an order
    Checkout {
        /// Product to buy as `<id>` or `<id>:<quantity>` (repeatable)
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,

        /// Customer name
        #[arg(short, long)]
        name: String,

        /// Delivery address
        #[arg(short, long)]
        address: String,
    },
    /// Sales report
    Sales {
        /// First day included (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day included (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Only orders containing this product ID
        #[arg(long)]
        product: Option<String>,
    },
    /// Dashboard stats and daily revenue
    Dashboard,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,crunchbox=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let context = commands::Context::load(cli.seed)?;

    match cli.command {
        Commands::Catalog => commands::catalog::list(&context).await?,
        Commands::Checkout {
            items,
            name,
            address,
        } => commands::checkout::run(&context, &items, &name, &address).await?,
        Commands::Sales { from, to, product } => {
            commands::reports::sales(&context, from, to, product).await;
        }
        Commands::Dashboard => commands::reports::dashboard(&context).await,
    }
    Ok(())
}
