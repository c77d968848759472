//! # Asset Store Adapters
//!
//! Implementations of [`vitrina_core::AssetStore`].
//!
//! - [`FsAssetStore`] - Local directory served as static files.

mod fs;

pub use self::fs::FsAssetStore;
