//! Hydration Event Store
//!
//! Durable, append-only log of drink events backed by SQLite:
//!
//! - **types**: Core data structures (DrinkEvent, NewDrink, DrinkRecord)
//! - **event_store**: The SQLite-backed store and its configuration
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//!   NewDrink → stamp serverTimestamp → INSERT (autocommit, synchronous=FULL)
//!
//! Read Path:
//!   SELECT ... ORDER BY id ASC → DrinkRecord
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use hydration::store::{EventStore, NewDrink, StoreConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = EventStore::open(&StoreConfig::new("./drink_events.db"))?;
//!
//!     let event = store.append(&NewDrink::new(8.5, "12:01:00", 1))?;
//!     println!("Logged drink #{} at {}", event.id, event.server_timestamp);
//!
//!     let drinks = store.list_all()?;
//!     println!("{} drinks logged", drinks.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod event_store;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use event_store::{EventStore, StoreConfig};
pub use types::{DrinkEvent, DrinkRecord, NewDrink};
