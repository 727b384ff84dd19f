//! CLI command implementations.

pub mod address;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod menu;
pub mod orders;
pub mod product;
pub mod slots;

use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    /// Only show this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Only show this department (food, clothes, sports).
    #[arg(long)]
    pub dept: Option<String>,

    /// Search name, description and category.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Include products that are currently unavailable.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart contents and totals.
    Show,
    /// Add a product.
    Add {
        /// Product ID.
        product: String,
        /// Quantity to add (negative to take away).
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        qty: String,
    },
    /// Remove a product's line.
    Remove {
        /// Product ID.
        product: String,
    },
    /// Set a line's quantity.
    SetQty {
        /// Product ID.
        product: String,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        qty: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Refresh prices from the menu.
    Reprice,
}

/// Day choice on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DayArg {
    Today,
    Tomorrow,
    Date,
}

/// Arguments for the slots command.
#[derive(Args)]
pub struct SlotsArgs {
    /// Delivery day.
    #[arg(short, long, value_enum, default_value = "today")]
    pub day: DayArg,

    /// Delivery date (YYYY-MM-DD) when --day is "date".
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Customer name.
    #[arg(long)]
    pub name: String,

    /// Customer phone number.
    #[arg(long)]
    pub phone: String,

    /// Customer email.
    #[arg(long)]
    pub email: Option<String>,

    /// Door number. Defaults to the saved default address.
    #[arg(long)]
    pub door: Option<String>,

    /// Tower.
    #[arg(long)]
    pub tower: Option<String>,

    /// Apartment complex.
    #[arg(long)]
    pub apartment: Option<String>,

    /// Save the address as the default for next time.
    #[arg(long)]
    pub save_address: bool,

    /// Delivery day.
    #[arg(short, long, value_enum, default_value = "today")]
    pub day: DayArg,

    /// Delivery date (YYYY-MM-DD) when --day is "date".
    #[arg(long)]
    pub date: Option<String>,

    /// Delivery slot ID.
    #[arg(short, long)]
    pub slot: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    /// Show only the last N orders.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print the full summary of each order.
    #[arg(long)]
    pub full: bool,
}

/// Arguments for the address command.
#[derive(Args)]
pub struct AddressArgs {
    #[command(subcommand)]
    pub command: Option<AddressCommand>,
}

#[derive(Subcommand)]
pub enum AddressCommand {
    /// List saved addresses.
    List,
    /// Save a new address.
    Add {
        #[arg(long)]
        door: String,
        #[arg(long)]
        tower: String,
        #[arg(long)]
        apartment: String,
        /// Make it the default address.
        #[arg(long)]
        default: bool,
    },
    /// Make a saved address the default.
    Default {
        /// Address ID.
        id: String,
    },
    /// Delete a saved address.
    Remove {
        /// Address ID.
        id: String,
    },
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Add a product to the menu.
    Add {
        /// Product ID. Generated when omitted.
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// Price in whole currency units.
        #[arg(long, allow_negative_numbers = true)]
        price: i64,
        /// Image file name under /images/, or a URL.
        #[arg(long)]
        image: String,
        #[arg(long)]
        category: String,
        /// food, clothes or sports.
        #[arg(long, default_value = "food")]
        dept: String,
        /// List the product as unavailable.
        #[arg(long)]
        unavailable: bool,
    },
    /// Change fields of a product.
    Edit {
        /// Product ID.
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        price: Option<i64>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        dept: Option<String>,
        /// true or false.
        #[arg(long)]
        available: Option<bool>,
    },
    /// Delete a product from the menu.
    Remove {
        /// Product ID.
        id: String,
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
