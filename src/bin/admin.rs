//! CLI administration tool for tinylink.
//!
//! Operates on the same mapping store as the server, without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check the store connection
//! cargo run --bin admin -- db check
//!
//! # Create the table and indexes
//! cargo run --bin admin -- db init
//!
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/page
//!
//! # Resolve a code
//! cargo run --bin admin -- lookup aB3xY9
//!
//! # View statistics
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (`DATABASE_URL`, `BASE_URL`,
//! `CODE_LENGTH`, `MAX_ATTEMPTS`, ...).

use tinylink::application::services::Allocator;
use tinylink::config::{self, Config, mask_connection_string};
use tinylink::domain::errors::AllocationError;
use tinylink::domain::repositories::MappingStore;
use tinylink::infrastructure::persistence;
use tinylink::utils::short_url::build_short_url;
use tinylink::utils::url_normalizer::normalize_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing tinylink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL (returns the existing code if already shortened)
    Shorten {
        /// The URL to shorten
        url: String,
    },

    /// Resolve a short code to its URL
    Lookup {
        /// The short code to resolve
        code: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Create the table and unique indexes if missing
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let store = persistence::connect(&config)
        .await
        .with_context(|| {
            format!(
                "Failed to open mapping store at {}",
                mask_connection_string(&config.database_url)
            )
        })?;

    match cli.command {
        Commands::Shorten { url } => shorten(&config, store, &url).await?,
        Commands::Lookup { code } => lookup(&config, store, &code).await?,
        Commands::Stats => handle_stats(store).await?,
        Commands::Db { action } => handle_db_action(&config, store, action).await?,
    }

    Ok(())
}

/// Resolves or creates the code for a URL and prints the short link.
async fn shorten(config: &Config, store: Arc<dyn MappingStore>, url: &str) -> Result<()> {
    let long_url = normalize_url(url).context("Invalid URL")?;
    let allocator = Allocator::new(store, config.allocator());

    let code = allocator
        .resolve_or_create(&long_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("{}", "✅ Shortened".green().bold());
    println!("  URL:   {}", long_url.cyan());
    println!("  Code:  {}", code.bright_yellow().bold());
    println!(
        "  Link:  {}",
        build_short_url(&config.base_url, &code).bright_white()
    );

    Ok(())
}

/// Prints the URL stored for a code.
async fn lookup(config: &Config, store: Arc<dyn MappingStore>, code: &str) -> Result<()> {
    let allocator = Allocator::new(store, config.allocator());

    match allocator.lookup(code).await {
        Ok(long_url) => {
            println!("  {} → {}", code.bright_yellow(), long_url.cyan());
        }
        Err(AllocationError::NotFound { .. }) => {
            println!("{}", format!("⚠️  No mapping for code '{code}'").yellow());
        }
        Err(e) => anyhow::bail!("Lookup failed: {}", e),
    }

    Ok(())
}

/// Displays the number of stored mappings.
async fn handle_stats(store: Arc<dyn MappingStore>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let count = store
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;

    println!(
        "  Mappings: {}",
        count.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(
    config: &Config,
    store: Arc<dyn MappingStore>,
    action: DbAction,
) -> Result<()> {
    match action {
        DbAction::Check => {
            store
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;
            println!("{}", "✅ Database connection OK".green().bold());
            println!(
                "  Location: {} ({:?})",
                mask_connection_string(&config.database_url).cyan(),
                config.storage_backend()
            );
        }
        DbAction::Init => {
            store
                .init_schema()
                .await
                .map_err(|e| anyhow::anyhow!("Schema setup failed: {}", e))?;
            println!("{}", "✅ Schema is up to date".green().bold());
        }
    }

    Ok(())
}
