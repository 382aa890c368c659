//! Core types and trait definitions for the Flexile Llama match tracker.
//!
//! This crate is deliberately free of database, CSV and CLI dependencies.
//! Every other crate depends on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod identity;
pub mod record;
pub mod stats;
pub mod store;
pub mod validate;

pub use error::{Error, FieldError, Result};
