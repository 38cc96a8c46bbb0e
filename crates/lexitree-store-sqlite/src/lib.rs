//! SQLite backend for the LexiTree vocabulary store.
//!
//! Wraps [`tokio_rusqlite`] so every statement runs on the connection's
//! dedicated thread. Calls are serialised there, which gives the store its
//! single-writer discipline without extra locking.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
