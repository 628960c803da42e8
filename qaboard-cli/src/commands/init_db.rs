//! Database initialization command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use qaboard_server::db;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// SQLite database file (created if missing)
    #[arg(long, short = 'd', env = "QABOARD_DATABASE", default_value = "data.db")]
    pub database: PathBuf,
}

/// Create the database file and schema.
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let pool = db::open(&args.database)
        .await
        .with_context(|| format!("Failed to initialize {}", args.database.display()))?;
    pool.close().await;

    println!("Initialized {}", args.database.display());
    Ok(())
}
