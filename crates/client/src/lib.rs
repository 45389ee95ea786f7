//! Network client for lantern.
//!
//! This crate provides the HTTP fetch pipeline used by the router and the
//! lifecycle manager, behind a [`Fetcher`] trait so tests can substitute
//! an in-memory fake.

pub mod fetch;

pub use fetch::{FetchClient, FetchConfig, FetchRequest, FetchedResponse, Fetcher};
