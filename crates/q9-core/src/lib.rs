//! Lookup store, configuration, and Unicode helpers shared by the Q9
//! session and engine crates.

pub mod config;
pub mod store;
pub mod unicode;

pub use config::{AppConfig, ConfigError};
pub use store::{LookupStore, StoreError, TableStore};
