//! ButterBee CLI - order from the ButterBee storefront in a terminal.
//!
//! Commands:
//! - `butterbee menu` - Browse the menu
//! - `butterbee cart` - View and edit the cart
//! - `butterbee slots` - See which delivery slots can be booked
//! - `butterbee checkout` - Place an order
//! - `butterbee orders` - List placed orders
//! - `butterbee address` - Manage saved delivery addresses
//! - `butterbee product` - Add, edit and remove menu products
//! - `butterbee config` - Manage configuration

mod commands;
mod config;
mod context;
mod logger;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    AddressArgs, CartArgs, CheckoutArgs, ConfigArgs, MenuArgs, OrdersArgs, ProductArgs,
    SlotsArgs,
};

/// ButterBee CLI - fresh batters and more, delivered to your tower
#[derive(Parser)]
#[command(name = "butterbee")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Shopper session key
    #[arg(long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the menu
    Menu(MenuArgs),

    /// View and edit the cart
    Cart(CartArgs),

    /// Show delivery slot availability
    Slots(SlotsArgs),

    /// Place an order
    Checkout(CheckoutArgs),

    /// List placed orders
    Orders(OrdersArgs),

    /// Manage saved delivery addresses
    Address(AddressArgs),

    /// Manage menu products
    Product(ProductArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::init(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), cli.session.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Menu(args) => commands::menu::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Slots(args) => commands::slots::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Address(args) => commands::address::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
