//! Persistent fetch cache backed by a single JSON file.
//!
//! This module provides the request-level cache shared by every client:
//!
//! - Canonical, order-independent keys for parameterized requests
//! - Load-once, flush-on-every-miss persistence
//! - No eviction or expiry; entries live as long as the file does

pub mod key;
pub mod store;

pub use crate::Error;

pub use key::{KEY_DELIMITER, canonical_key};
pub use store::{CacheStats, CacheStore};
