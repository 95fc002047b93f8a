//! Bite CLI - migrations, cart and checkout from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Run intake store migrations
//! bite migrate
//!
//! # Build a cart (kept in .bite/state.json)
//! bite cart add --id 1 --name "Veg Puff" --price 100
//! bite cart show
//!
//! # Place the order
//! bite checkout --first-name Asha --mobile 9990001111 --address "12 MG Road"
//!
//! # Demo login gate
//! bite register asha --password pa55
//! bite login asha --password pa55
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `cart` - Add, remove, clear and show cart items
//! - `checkout` - Submit the cart to the intake service
//! - `register` / `login` - Demo login gate

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use secrecy::SecretString;
use url::Url;

use bite_client::{CartClient, HttpIntake, LocalStorage};
use bite_core::{CustomerForm, ProductId};

mod commands;

#[derive(Parser)]
#[command(name = "bite")]
#[command(author, version, about = "Bite storefront CLI")]
struct Cli {
    /// Base URL of the order intake service
    #[arg(long, global = true, env = "BITE_API_URL", default_value = "http://localhost:5000")]
    api_url: Url,

    /// File holding the cart and the demo login pair
    #[arg(long, global = true, env = "BITE_STATE_FILE", default_value = ".bite/state.json")]
    state_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        /// `PostgreSQL` connection string
        #[arg(long, env = "STOREFRONT_DATABASE_URL", hide_env_values = true)]
        database_url: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Submit the cart as an order
    Checkout(CheckoutArgs),
    /// Register the demo user
    Register {
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log in as the demo user
    Login {
        username: String,
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add {
        /// Product ID
        #[arg(long)]
        id: ProductId,
        /// Display name
        #[arg(long)]
        name: String,
        /// Unit price
        #[arg(long)]
        price: Decimal,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Empty the cart
    Clear,
    /// Show lines, subtotals and the total
    Show,
}

#[derive(clap::Args)]
struct CheckoutArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    mobile: Option<String>,
    #[arg(long)]
    pin_code: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    email: Option<String>,
}

impl From<CheckoutArgs> for CustomerForm {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            mobile_number: args.mobile,
            pin_code: args.pin_code,
            address: args.address,
            email_id: args.email,
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { database_url } => {
            commands::migrate::run(&SecretString::from(database_url)).await?;
        }
        Commands::Cart { action } => {
            let mut client = CartClient::load(LocalStorage::open(&cli.state_file)?)?;
            match action {
                CartAction::Add { id, name, price } => {
                    commands::cart::add(&mut client, id, name, price)?;
                }
                CartAction::Remove { id } => commands::cart::remove(&mut client, id)?,
                CartAction::Clear => commands::cart::clear(&mut client)?,
                CartAction::Show => commands::cart::show(&client),
            }
        }
        Commands::Checkout(args) => {
            let mut client = CartClient::load(LocalStorage::open(&cli.state_file)?)?;
            let intake = HttpIntake::new(cli.api_url);
            commands::checkout::run(&mut client, &intake, args.into()).await?;
        }
        Commands::Register { username, password } => {
            let mut storage = LocalStorage::open(&cli.state_file)?;
            commands::gate::register(&mut storage, &username, &password)?;
        }
        Commands::Login { username, password } => {
            let mut storage = LocalStorage::open(&cli.state_file)?;
            commands::gate::login(&mut storage, &username, &password)?;
        }
    }
    Ok(())
}
