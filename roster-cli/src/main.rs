//! Review Roster CLI - run and administer the review-roster service
//!
//! Assigns pull request reviewers across team rosters over an HTTP API.

mod commands;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use roster_core::{CliOverrides, Config};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Review Roster: reviewer assignment for team pull requests
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Listen address (overrides config and env)
    #[arg(long, global = true)]
    addr: Option<SocketAddr>,

    /// SQLite database file (overrides config and env)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Connection pool size (overrides config and env)
    #[arg(long, global = true)]
    max_connections: Option<u32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Start the HTTP API
    #[command(visible_alias = "s")]
    Serve,

    /// Create or upgrade the database schema
    Migrate,

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let overrides = CliOverrides {
        addr: cli.addr,
        database_path: cli.database.clone(),
        max_connections: cli.max_connections,
    };
    let config = Config::load_with_overrides(cli.config.as_deref(), overrides)?;

    tracing::debug!(
        addr = %config.server.addr,
        database = %config.database.path.display(),
        "Configuration loaded"
    );

    match cli.command {
        Some(Commands::Version) => {
            println!("roster {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Serve) => {
            commands::serve::execute(config).await?;
        }
        Some(Commands::Migrate) => {
            commands::migrate::execute(&config).await?;
        }
        Some(Commands::Config) => {
            commands::show_config(&config, cli.config.as_deref());
        }
        None => {
            println!("Review Roster - reviewer assignment for team pull requests");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
