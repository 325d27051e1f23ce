//! # Hydration
//!
//! Server side of a smart water bottle: the bottle posts one event per
//! drink, the server appends it to a SQLite log, and a browser dashboard
//! polls the log and charts it.
//!
//! ## Modules
//!
//! - [`store`]: Append-only drink event log
//! - [`api`]: HTTP endpoints with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hydration::api::{serve, AppState};
//! use hydration::config::Config;
//! use hydration::store::EventStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!
//!     let store = Arc::new(EventStore::open(&config.store_config())?);
//!     let api_config = config.api_config();
//!
//!     serve(AppState::new(store, api_config.clone()), &api_config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod store;

// Re-export top-level types for convenience
pub use store::{DrinkEvent, DrinkRecord, EventStore, NewDrink, StoreConfig, StoreError, StoreResult};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
