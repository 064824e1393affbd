use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use business_db::config::{self, Config};
use business_db::db;

/// Prepare the business database: create the file and any missing tables
#[derive(Parser, Debug)]
#[command(name = "business-db", version, about)]
struct Args {
    /// Database URL; falls back to DATABASE_URL, then a local business.db file
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    // Load configuration
    let config = match args.database_url {
        Some(url) => Config::with_database_url(url),
        None => config::init()?,
    };

    // Open the pool and replay the table definitions
    info!(url = config.database_url(), "initializing business database");
    db::init(&config).await?;
    info!("schema ready");

    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("business_db=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
