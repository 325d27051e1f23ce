//! Hydration Server
//!
//! Run with: cargo run --bin hydration
//!
//! # Configuration
//!
//! Read from `--config <path>`, else the first of
//! `~/.config/hydration/config.toml`, `/etc/hydration/config.toml`,
//! `./config.toml`. Environment variables override the file:
//! - `HYDRATION_DB_PATH`: SQLite file (default: drink_events.db)
//! - `HYDRATION_HOST`: Host to bind to (default: 0.0.0.0)
//! - `HYDRATION_PORT`: Port to listen on (default: 8000)
//! - `HYDRATION_REQUEST_TIMEOUT_SECS`: Per-request timeout (default: 30)
//! - `HYDRATION_LOG_LEVEL` / `HYDRATION_LOG_FORMAT`: Logging (default: info / pretty)
//! - `RUST_LOG`: Full tracing filter, wins over the log level

use anyhow::Context;
use clap::Parser;
use hydration::api::{serve, AppState};
use hydration::config::{generate_default_config, Config, LoggingConfig};
use hydration::store::EventStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hydration")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hydration server: logs drink events and serves the dashboard")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let (config, config_source) = Config::resolve(args.config.as_deref())?;

    init_tracing(&config.logging);

    match &config_source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found, using defaults with environment overrides"),
    }

    tracing::info!("Starting hydration server v{}", env!("CARGO_PKG_VERSION"));

    // Open the drink log
    let store_config = config.store_config();
    tracing::info!("Drink log: {:?}", store_config.path);
    let store = Arc::new(
        EventStore::open(&store_config)
            .with_context(|| format!("opening drink log {:?}", store_config.path))?,
    );
    tracing::info!("{} drinks logged so far", store.count()?);

    // Run server
    let api_config = config.api_config();
    let state = AppState::new(Arc::clone(&store), api_config.clone());
    serve(state, &api_config).await?;

    tracing::info!("Hydration server stopped");
    Ok(())
}

/// Install the global tracing subscriber
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("hydration={},tower_http=info", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
