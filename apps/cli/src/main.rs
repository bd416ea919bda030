//! # FareShare CLI Entry Point
//!
//! Splits shared trip costs and works out who pays whom.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          fareshare (binary)                             │
//! │                                                                         │
//! │  main.rs ─────► Parses args, sets up logging, config, database          │
//! │                                                                         │
//! │  config.rs ───► fareshare.toml + FARESHARE_* environment                │
//! │                                                                         │
//! │  commands.rs ─► trip / person / expense / balances / settle / ...       │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  fareshare-core: reduce, balances, settlements, reports          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  fareshare-db: SQLite (fareshare.db, WAL mode)                   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr, so stdout stays clean for output)
//! 3. Load configuration
//! 4. Connect to database & run migrations
//! 5. Run the command and print its output

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use fareshare_db::{Database, DbConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, Context};
use crate::config::CliConfig;

/// Split shared trip costs and settle up with as few payments as possible.
#[derive(Debug, Parser)]
#[command(name = "fareshare", version, about)]
struct Cli {
    /// Config file (default: the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file, overriding config and environment
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Trip id to work on (default: the most recently changed trip)
    #[arg(long, global = true)]
    trip: Option<String>,

    /// Print JSON instead of text where supported
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();

    let mut config = CliConfig::load(cli.config).context("Failed to load configuration")?;
    if let Some(path) = cli.db {
        config.database.path = Some(path);
    }

    let path = config
        .database_path()
        .context("Failed to resolve database path")?;
    debug!(?path, "Opening database");

    let db = Database::new(DbConfig::new(&path))
        .await
        .with_context(|| format!("Failed to open database at {}", path.display()))?;

    let ctx = Context {
        db,
        config,
        trip_id: cli.trip,
        json: cli.json,
        today: chrono::Local::now().date_naive(),
    };

    let result = commands::run(&ctx, cli.command).await;
    ctx.db.close().await;

    println!("{}", result?);
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - Default: `warn`
/// - `RUST_LOG=info` - Trip changes and config loading
/// - `RUST_LOG=debug` - Queries and overrides
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
