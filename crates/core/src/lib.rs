//! Core types and shared functionality for the unionpedia client.
//!
//! This crate provides:
//! - Bounded in-memory cache stores with TTL expiry
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheConfig, TtlCache};
pub use config::UnionpediaConfig;
pub use error::Error;
