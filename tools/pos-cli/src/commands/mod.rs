//! CLI command implementations.

pub mod auth;
pub mod config;
pub mod license;
pub mod search;
pub mod sell;
pub mod stock;
pub mod summary;

use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted).
    #[arg(short, long)]
    pub email: Option<String>,

    /// Account password (prompted when omitted).
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for the sell command.
#[derive(Args)]
pub struct SellArgs {
    /// Items as CODE or CODExQTY (e.g. COC001x3).
    #[arg(required = true)]
    pub items: Vec<String>,

    /// Payment method: cash, card, transfer or credit.
    #[arg(short, long, default_value = "cash")]
    pub payment: String,

    /// Show the totals without completing the sale.
    #[arg(long)]
    pub dry_run: bool,
}

/// Collections that can be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Collection {
    Products,
    Customers,
    Suppliers,
    Invoices,
    Audit,
    Users,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Collection to search.
    #[arg(value_enum)]
    pub collection: Collection,

    /// Case-insensitive text to look for in the collection's search fields.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Equality filter as field=value; "all" disables it.
    #[arg(short, long = "filter")]
    pub filters: Vec<String>,

    /// Fields to search instead of the collection defaults.
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// List the values present for a field instead of records.
    #[arg(long)]
    pub values_of: Option<String>,
}

/// Arguments for the stock command.
#[derive(Args)]
pub struct StockArgs {
    /// Only show products that need restocking.
    #[arg(long)]
    pub alerts: bool,

    /// Only show one category.
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the license command.
#[derive(Args)]
pub struct LicenseArgs {
    #[command(subcommand)]
    pub command: Option<LicenseCommand>,
}

#[derive(Subcommand)]
pub enum LicenseCommand {
    /// Activate a license for one year.
    Activate {
        /// License holder name.
        #[arg(short, long)]
        name: String,
        /// License key.
        #[arg(short, long)]
        key: String,
    },
    /// Remove the stored license.
    Deactivate,
    /// Show the license and time remaining.
    Status,
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
}
