//! Core domain logic (front-end agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **indexer**: Walking, chunking, record building and batching
//! - **index**: Search index backends (Algolia, local Tantivy)
//! - **services**: Service container

pub mod config;
pub mod error;
pub mod index;
pub mod indexer;
pub mod services;
pub mod types;

// Re-export key types for convenience
pub use config::Config;
pub use error::{DocfeedError, Result};
pub use services::Services;
