//! # Collaborator Traits
//!
//! The three external collaborators the services consume. Each is held as
//! `Arc<dyn Trait>`, constructed once by the process entry point and shared
//! by every concurrent operation.
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │    Repository    │   │    AssetStore    │   │      Cache       │
//! │  record CRUD     │   │  upload/delete   │   │  get/set + TTL   │
//! │  (source of      │   │  binary objects  │   │  derived copies  │
//! │   truth)         │   │                  │   │  only            │
//! └──────────────────┘   └──────────────────┘   └──────────────────┘
//!   vitrina-db             vitrina-content        vitrina-content
//!   SqliteRepository       FsAssetStore           MemoryCache / RedisCache
//! ```
//!
//! Every call commits on its own; none of these traits offers transactions.

use std::time::Duration;

use async_trait::async_trait;

use crate::asset::Upload;
use crate::error::{AssetStoreError, CacheError, RepoError};
use crate::types::{AboutContent, CarouselSlide, Product, ProductFields, SiteImages, SlideFields};

pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// Repository
// =============================================================================

/// Record CRUD for products, carousel slides and the two singletons.
///
/// `get_*` return `Ok(None)` for unknown ids; `update_*`/`delete_*` return
/// [`RepoError::NotFound`] when no row was affected.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn list_products(&self) -> RepoResult<Vec<Product>>;
    async fn get_product(&self, id: i64) -> RepoResult<Option<Product>>;
    async fn insert_product(&self, fields: &ProductFields) -> RepoResult<Product>;
    async fn update_product(&self, id: i64, fields: &ProductFields) -> RepoResult<()>;
    async fn delete_product(&self, id: i64) -> RepoResult<()>;

    /// Changes only the visibility flag and returns the stored product.
    async fn set_product_visibility(&self, id: i64, visible: bool) -> RepoResult<Product>;

    /// Takes one unit of stock if any is left.
    ///
    /// ## Returns
    /// * `Ok(Some(remaining))` - One unit taken
    /// * `Ok(None)` - Stock was zero (or the product does not exist); nothing written
    async fn decrement_stock(&self, id: i64) -> RepoResult<Option<i64>>;

    async fn list_carousel_slides(&self) -> RepoResult<Vec<CarouselSlide>>;
    async fn get_carousel_slide(&self, id: i64) -> RepoResult<Option<CarouselSlide>>;
    async fn insert_carousel_slide(&self, fields: &SlideFields) -> RepoResult<CarouselSlide>;
    async fn update_carousel_slide(&self, id: i64, fields: &SlideFields) -> RepoResult<()>;
    async fn delete_carousel_slide(&self, id: i64) -> RepoResult<()>;

    async fn get_about(&self) -> RepoResult<AboutContent>;
    async fn update_about(&self, about: &AboutContent) -> RepoResult<()>;

    async fn get_site_images(&self) -> RepoResult<SiteImages>;
    async fn update_site_images(&self, images: &SiteImages) -> RepoResult<()>;
}

// =============================================================================
// Asset Store
// =============================================================================

/// External binary object storage.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Stores the payload and returns a durable reference (URL or id).
    async fn upload(&self, upload: &Upload) -> Result<String, AssetStoreError>;

    /// Removes the object behind `reference`.
    async fn delete(&self, reference: &str) -> Result<(), AssetStoreError>;
}

// =============================================================================
// Cache
// =============================================================================

/// String key/value store with per-entry time-to-live.
///
/// An expired entry is indistinguishable from an absent one.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}
