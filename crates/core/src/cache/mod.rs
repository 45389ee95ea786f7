//! SQLite-backed cache store, namespaced by named generations.
//!
//! This module provides a persistent key-value store keyed by request
//! identity and partitioned into named cache generations. Access is async
//! via tokio-rusqlite. It supports:
//!
//! - Request-identity keys using SHA-256 hashing
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - Idempotent generation creation and whole-generation deletion

pub mod connection;
pub mod entries;
pub mod generations;
pub mod key;
pub mod migrations;

pub use crate::Error;

pub use connection::CacheDb;
pub use entries::CacheEntry;
