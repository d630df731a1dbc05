//! Shareloop - A Community Item-Sharing Marketplace Core
//!
//! Shareloop keeps the marketplace state - users, item listings, requests,
//! transactions, and community impact figures - in an insertion-ordered
//! in-memory store, and exposes the data operations over a small REST API.
#![warn(missing_docs)]

// Configure global allocator for maximum performance
#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

// Core foundational modules
pub mod core;

// Main functional modules
pub mod api;
pub mod storage;
pub mod system;
pub mod types;

// Re-export commonly used items for convenience
pub use crate::core::{AppState, Config, Error, Result};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
