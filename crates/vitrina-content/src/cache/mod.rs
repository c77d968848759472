//! # Cache Adapters
//!
//! Implementations of [`vitrina_core::Cache`].
//!
//! - [`MemoryCache`] - In-process map with per-entry expiry. Default when no
//!   `REDIS_URL` is configured, and the cache used by the service tests.
//! - [`RedisCache`] - Shared cache for several panel/storefront processes.
//!
//! Both store plain strings. What goes in them (JSON view fragments) and how
//! failures are handled (as misses) is decided by
//! [`ContentService`](crate::ContentService).

mod memory;
mod redis;

pub use self::memory::MemoryCache;
pub use self::redis::RedisCache;
