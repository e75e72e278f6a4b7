//! POS CLI - Command line front end for the point of sale.
//!
//! Commands:
//! - `pos login` / `pos logout` / `pos whoami` - Manage the session
//! - `pos sell` - Ring up a sale from product codes
//! - `pos search` - Search and filter a record collection
//! - `pos stock` - Inventory levels and valuation
//! - `pos summary` - Customer and supplier figures
//! - `pos license` - License activation
//! - `pos config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod seed;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{ConfigArgs, LicenseArgs, LoginArgs, SearchArgs, SellArgs, StockArgs};

/// POS CLI - Point of sale from the terminal
#[derive(Parser)]
#[command(name = "pos")]
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

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login(LoginArgs),

    /// Sign out
    Logout,

    /// Show the signed-in user and company
    Whoami,

    /// Ring up a sale
    Sell(SellArgs),

    /// Search a record collection
    Search(SearchArgs),

    /// Show inventory levels
    Stock(StockArgs),

    /// Show customer and supplier figures
    Summary,

    /// Manage the license
    License(LicenseArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Send library events to stderr. `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let level = if ctx.output.is_verbose() {
        "debug"
    } else {
        ctx.config.log.level.as_str()
    };
    init_tracing(level);

    // Execute command
    let result = match cli.command {
        Commands::Login(args) => commands::auth::login(args, &ctx).await,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Sell(args) => commands::sell::run(args, &ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Stock(args) => commands::stock::run(args, &ctx).await,
        Commands::Summary => commands::summary::run(&ctx).await,
        Commands::License(args) => commands::license::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sell() {
        let cli = Cli::try_parse_from(["pos", "--json", "sell", "COC001x2", "PAN001", "-p", "card"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Sell(args) => {
                assert_eq!(args.items, vec!["COC001x2", "PAN001"]);
                assert_eq!(args.payment, "card");
                assert!(!args.dry_run);
            }
            _ => panic!("expected sell"),
        }
    }
}
