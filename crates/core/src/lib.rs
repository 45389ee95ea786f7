//! Core types and shared functionality for lantern.
//!
//! This crate provides:
//! - Generation-namespaced cache store with SQLite backend
//! - Request/response boundary types
//! - Cache manifests (core shell + sacred data)
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod manifest;

pub use cache::{CacheDb, CacheEntry};
pub use config::AppConfig;
pub use error::Error;
pub use http::{Request, RouteResponse, ServedFrom};
pub use manifest::CacheManifests;
