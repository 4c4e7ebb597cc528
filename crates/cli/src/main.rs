//! Shopfront CLI - command-line storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! shopfront products
//! shopfront product 3
//! shopfront categories
//!
//! # Manage the cart (persists between runs)
//! shopfront cart add 3 --quantity 2
//! shopfront cart show
//! shopfront cart set 3 1
//! shopfront cart remove 3
//! shopfront cart clear
//!
//! # Authenticate
//! shopfront login -u alice -p secret
//! shopfront register -u bob -e bob@example.com -p secret -c secret
//! shopfront whoami
//! shopfront logout
//!
//! # Orders (requires login)
//! shopfront orders list
//! shopfront orders place
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPFRONT_API_URL` - Base URL of the shop backend API (required)
//! - `SHOPFRONT_DATA_DIR` - Directory for persisted session and cart state
//! - `SHOPFRONT_TIMEOUT_SECS` - Per-request timeout in seconds

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI's job is to print; the workspace-wide restriction targets services
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use std::sync::Arc;

use clap::{Parser, Subcommand};

use shopfront_client::api::{ApiClient, AuthGateway, CatalogGateway, OrderGateway};
use shopfront_client::config::ShopConfig;
use shopfront_client::persist::{FileStore, KeyValueStore};
use shopfront_client::stores::{CartStore, SessionStore};
use shopfront_core::ProductId;

mod commands;

use commands::Storefront;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Command-line storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products in the catalog
    Products,
    /// Show one product in detail
    Product {
        /// Product ID
        id: i32,
    },
    /// List product categories
    Categories,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Log in with username and password
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Register a new account
    Register {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Password confirmation
        #[arg(short = 'c', long)]
        password_confirm: String,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show the currently logged-in user
    Whoami,
    /// View and place orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        product_id: i32,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity for a product already in the cart
    Set {
        /// Product ID
        product_id: i32,

        /// New quantity (0 removes the line)
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: i32,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrderAction {
    /// List your order history
    List,
    /// Place an order for the current cart contents
    Place,
}

#[tokio::main]
async fn main() {
    // Initialize tracing; default to warnings only so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront=warn,shopfront_client=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let result = run(Cli::parse()).await;

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ShopConfig::from_env()?;

    // Wire the stores and gateways; state persists under the data directory
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.data_dir)?);
    let session = SessionStore::new(Arc::clone(&storage));
    let cart = CartStore::new(storage);
    let api = ApiClient::new(&config, session.clone());

    let storefront = Storefront {
        session,
        cart,
        auth: AuthGateway::new(api.clone()),
        catalog: CatalogGateway::new(api.clone()),
        orders: OrderGateway::new(api),
    };

    match cli.command {
        Commands::Products => commands::catalog::list_products(&storefront).await?,
        Commands::Product { id } => {
            commands::catalog::show_product(&storefront, ProductId::new(id)).await?;
        }
        Commands::Categories => commands::catalog::list_categories(&storefront).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&storefront),
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&storefront, ProductId::new(product_id), quantity).await?,
            CartAction::Set {
                product_id,
                quantity,
            } => commands::cart::set_quantity(&storefront, ProductId::new(product_id), quantity),
            CartAction::Remove { product_id } => {
                commands::cart::remove(&storefront, ProductId::new(product_id));
            }
            CartAction::Clear => commands::cart::clear(&storefront),
        },
        Commands::Login { username, password } => {
            commands::auth::login(&storefront, username, password).await?;
        }
        Commands::Register {
            username,
            email,
            password,
            password_confirm,
        } => {
            commands::auth::register(&storefront, username, &email, password, password_confirm)
                .await?;
        }
        Commands::Logout => commands::auth::logout(&storefront),
        Commands::Whoami => commands::auth::whoami(&storefront),
        Commands::Orders { action } => match action {
            OrderAction::List => commands::orders::list(&storefront).await?,
            OrderAction::Place => commands::orders::place(&storefront).await?,
        },
    }

    Ok(())
}
