//! Persistent cache for API responses
//!
//! Re-exports the cache manager used by the data client to keep the last
//! successfully fetched dataset available across sessions.

pub mod manager;

pub use manager::{CacheManager, CachedData};
