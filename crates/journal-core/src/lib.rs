//! Core types and trait definitions for the journal.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the domain records, the timeline projection and the detail dispatcher; the
//! store and web crates build on top of it.

// Native `async fn` in traits; the futures are `Send` by construction.
#![allow(async_fn_in_trait)]

pub mod detail;
pub mod error;
pub mod fields;
pub mod projection;
pub mod record;
pub mod store;
pub mod timeline;

pub use error::{Error, Result};

/// Integer primary key, allocated per record kind by the store.
pub type RecordId = i64;
