//! Core types and shared functionality for nps-explorer.
//!
//! This crate provides:
//! - Cache implementation with a JSON file backend
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStore, canonical_key};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
