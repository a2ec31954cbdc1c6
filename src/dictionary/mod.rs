//! Word lookup and translation
//!
//! This module provides:
//! - Datamuse-backed word verification and part-of-speech metadata
//! - Traditional Chinese translations via the free Google Translate endpoint
//! - An on-disk cache of lookup results (30-day TTL)
//! - Sliding-window rate limiting for the free APIs

pub mod cache;
pub mod models;
pub mod rate_limit;
pub mod service;

pub use cache::CacheStats;
pub use models::{WordDefinition, WordLookupResult};
pub use service::{DictionaryError, DictionaryService};
