//! Core types and trait definitions for the LexiTree vocabulary store.
//!
//! This crate has no database or file-system dependencies. The parser,
//! storage backend and import/export coordinator all depend on it.

// Native `async fn` in traits; the `Send` bounds are spelled out in the trait.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod model;
pub mod store;

pub use error::{Error, Result};
