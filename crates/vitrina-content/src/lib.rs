//! # vitrina-content: Content Cache and Asset Lifecycle
//!
//! The services behind the storefront pages and the admin panel.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrina Layers                                   │
//! │                                                                         │
//! │  apps/panel (entry point: builds clients once, injects them)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                vitrina-content (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │  ContentService ─────────► Cache ─┐                             │   │
//! │  │  CarouselAdminService ─┐          │                             │   │
//! │  │  CatalogAdminService ──┼► AssetLifecycleManager ─► AssetStore   │   │
//! │  │  SiteAdminService ─────┘          │                             │   │
//! │  │            │                      │                             │   │
//! │  │            └──────────────────────┴──► Repository               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  vitrina-core (traits, records)      vitrina-db (SQLite Repository)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`content`] - Read-through homepage/cart views
//! - [`lifecycle`] - Upload/replace/delete of asset references
//! - [`carousel`], [`catalog`], [`site`] - Admin writes
//! - [`cache`] - `MemoryCache` and `RedisCache`
//! - [`assets`] - `FsAssetStore`
//!
//! ## Usage
//! ```rust,ignore
//! let repo: Arc<dyn Repository> = Arc::new(db.clone());
//! let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
//! let assets = AssetLifecycleManager::new(Arc::new(FsAssetStore::new("uploads", "/uploads")?));
//!
//! let content = ContentService::new(repo.clone(), cache);
//! let carousel = CarouselAdminService::new(repo, assets);
//! ```

pub mod assets;
pub mod cache;
pub mod carousel;
pub mod catalog;
pub mod content;
pub mod lifecycle;
pub mod site;

#[cfg(test)]
pub(crate) mod testing;

pub use assets::FsAssetStore;
pub use cache::{MemoryCache, RedisCache};
pub use carousel::{CarouselAdminService, SlideUpsert};
pub use catalog::{CatalogAdminService, ProductInput};
pub use content::ContentService;
pub use lifecycle::{AssetChanges, AssetLifecycleManager};
pub use site::{AboutUpdate, SiteAdminService, SiteImagesUpdate};

// =============================================================================
// Integration Tests (SQLite + filesystem)
// =============================================================================
