//! Validation module - symbol validity caching.

mod validity_cache;

pub use validity_cache::ValidityCache;
