//! Juniper Market CLI - drives the client data layer from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! jm products list --keyword desk --page 2
//! jm products show <id>
//!
//! # Authenticate
//! jm auth login -e buyer@example.com -p hunter2
//! jm auth register -n "Ada" -e ada@example.com -p hunter2
//!
//! # Build a cart and check out
//! jm cart add <product-id> --qty 2
//! jm cart ship --address "1 Main St" --city Lisbon --postal-code 1100 --country PT
//! jm cart payment GooglePay
//! jm orders place
//! ```
//!
//! # Commands
//!
//! - `products` - catalog browsing and admin product management
//! - `auth` - session management and own profile
//! - `users` - admin user management
//! - `cart` - local cart editing
//! - `orders` - checkout and the pay/deliver lifecycle
//!
//! Configuration comes from `JUNIPER_API_URL` and `JUNIPER_STORAGE_DIR`
//! (see `juniper_market_client::ClientConfig`).

#![cfg_attr(not(test), forbid(unsafe_code))]
// Terminal output is this binary's job.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use juniper_market_client::{ClientConfig, StoreContext};

mod commands;

#[derive(Parser)]
#[command(name = "jm")]
#[command(author, version, about = "Juniper Market storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and manage catalog products
    Products {
        #[command(subcommand)]
        action: commands::products::ProductAction,
    },
    /// Log in, register, and manage your own profile
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Manage users (admin)
    Users {
        #[command(subcommand)]
        action: commands::users::UserAction,
    },
    /// Edit the local cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Place orders and walk their lifecycle
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrderAction,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let ctx = StoreContext::new(&config)?;

    match cli.command {
        Commands::Products { action } => commands::products::run(&ctx, action).await?,
        Commands::Auth { action } => commands::auth::run(&ctx, action).await?,
        Commands::Users { action } => commands::users::run(&ctx, action).await?,
        Commands::Cart { action } => commands::cart::run(&ctx, action).await?,
        Commands::Orders { action } => commands::orders::run(&ctx, action).await?,
    }

    Ok(())
}
