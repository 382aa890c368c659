//! SQLite backend for the Flexile Llama match store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. One file holds one identity's matches;
//! [`StoreDirectory`] decides which file that is.

mod directory;
mod encode;
mod schema;
mod store;

pub mod error;

pub use directory::StoreDirectory;
pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
