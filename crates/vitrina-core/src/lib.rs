//! # vitrina-core: Pure Domain Logic for Vitrina
//!
//! This crate holds the storefront's records, the view-data assembled for
//! rendered pages, the asset replace/keep rule, validation, and the
//! signatures of the three external collaborators. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrina Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/panel (entry point)                        │   │
//! │  │    home, cart, buy, product, slide, about, images              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vitrina-content (services)                      │   │
//! │  │  ContentService · AssetLifecycleManager · CarouselAdminService  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Repository / AssetStore / Cache        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vitrina-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   asset   │  │   ports   │  │ validation│  │   │
//! │  │   │  Product  │  │ AssetPlan │  │Repository │  │   rules   │  │   │
//! │  │   │  Slide    │  │AssetInput │  │AssetStore │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records (Product, CarouselSlide, AboutContent, SiteImages) and views
//! - [`asset`] - Asset-bearing fields and the per-field upload/literal/keep decision
//! - [`ports`] - Repository, AssetStore and Cache traits
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use vitrina_core::asset::{plan_asset, AssetInput, AssetPlan, WriteMode};
//!
//! // No upload, no literal: the stored reference is kept as-is.
//! let plan = plan_asset(Some("/uploads/a.png"), &AssetInput::none(), WriteMode::Replace);
//! assert_eq!(plan, AssetPlan::Keep("/uploads/a.png".to_string()));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod asset;
pub mod error;
pub mod ports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use asset::{AssetField, AssetInput, AssetPlan, Upload, WriteMode};
pub use error::{AssetStoreError, CacheError, ContentError, ContentResult, RepoError, ValidationError};
pub use ports::{AssetStore, Cache, Repository};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fixed identifier of the AboutContent and SiteImages rows.
///
/// Both records are singletons. The schema enforces `id = 1` and every
/// read and write addresses this id instead of "the first row".
pub const SINGLETON_ID: i64 = 1;

/// Time-to-live of every homepage/cart cache entry, in seconds.
pub const CACHE_TTL_SECS: u64 = 60;

/// Process-global cache keys.
pub mod cache_keys {
    /// Full product list.
    pub const PRODUCTS: &str = "products";
    /// Carousel slide list.
    pub const CAROUSEL_ITEMS: &str = "carouselItems";
    /// AboutContent singleton.
    pub const ABOUT: &str = "about";
    /// SiteImages singleton.
    pub const IMAGES: &str = "images";
}
