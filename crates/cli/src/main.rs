//! Threadline CLI - session store migrations and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the session table used by the storefront
//! tl-cli migrate sessions
//!
//! # Show what the storefront recommends next to product 42
//! tl-cli catalog recommend 42
//!
//! # Count active products per category
//! tl-cli catalog summary
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use threadline_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "tl-cli")]
#[command(author, version, about = "Threadline CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Inspect the hosted catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Create the storefront session table
    Sessions,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Print recommendations for a product
    Recommend {
        /// Product id
        id: ProductId,
    },
    /// Count active products per category
    Summary,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Sessions => commands::migrate::sessions().await?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Recommend { id } => commands::catalog::recommendations(id).await?,
            CatalogAction::Summary => commands::catalog::summary().await?,
        },
    }
    Ok(())
}
