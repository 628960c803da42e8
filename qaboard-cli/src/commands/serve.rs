//! HTTP server command
//!
//! Opens the database and runs the question API until shutdown.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use qaboard_server::db;
use qaboard_server::http::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "QABOARD_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// SQLite database file (created if missing)
    #[arg(long, short = 'd', env = "QABOARD_DATABASE", default_value = "data.db")]
    pub database: PathBuf,

    /// Shared secret expected in the X-Admin-Token header
    #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
    pub admin_token: Option<String>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Directory of static files to serve alongside the API
    #[arg(long, env = "QABOARD_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting qaboard server on {}", args.bind);

    let pool = db::open(&args.database)
        .await
        .with_context(|| format!("Failed to open database {}", args.database.display()))?;

    if let Some(dir) = &args.static_dir {
        anyhow::ensure!(dir.is_dir(), "static dir {} is not a directory", dir.display());
    }

    let state = AppState::new(pool, args.admin_token);
    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        static_dir: args.static_dir,
    };

    // Blocks until shutdown
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
