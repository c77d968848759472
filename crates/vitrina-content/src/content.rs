//! # Content Service
//!
//! Read-through cache for the homepage and cart views.
//!
//! ## All-or-Nothing Population
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  homepage_view()                                                        │
//! │                                                                         │
//! │  Cache.get × 4 (concurrently)                                           │
//! │  products · carouselItems · about · images                              │
//! │       │                                                                 │
//! │       ├── all four present and decodable ──► return them, no DB call    │
//! │       │                                                                 │
//! │       └── any absent / expired / undecodable / cache error              │
//! │                │                                                        │
//! │                ▼                                                        │
//! │       Repository × 4 (concurrently, try_join: first failure wins)       │
//! │                │                                                        │
//! │                ▼                                                        │
//! │       Cache.set × 4 with the TTL (errors logged, ignored)               │
//! │                │                                                        │
//! │                ▼                                                        │
//! │       return the fresh set (never a mix of cached and fresh)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes never invalidate these keys, so a read within the TTL after an
//! admin edit still returns the pre-edit data. Concurrent misses may both
//! hit the repository and both write the cache; the later write wins.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use vitrina_core::cache_keys::{ABOUT, CAROUSEL_ITEMS, IMAGES, PRODUCTS};
use vitrina_core::{
    AboutContent, Cache, CarouselSlide, CartView, ContentError, ContentResult, HomepageView,
    Product, Repository, SiteImages, CACHE_TTL_SECS,
};

/// Serves storefront view-data through the cache.
#[derive(Clone)]
pub struct ContentService {
    repo: Arc<dyn Repository>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl ContentService {
    /// Creates a service with the default TTL of 60 seconds.
    pub fn new(repo: Arc<dyn Repository>, cache: Arc<dyn Cache>) -> Self {
        ContentService {
            repo,
            cache,
            ttl: Duration::from_secs(CACHE_TTL_SECS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Products, carousel slides, about content and site images.
    ///
    /// ## Returns
    /// * `Err(ContentError::StorageUnavailable)` - Cache incomplete and the
    ///   repository could not be read. No partial view is returned.
    pub async fn homepage_view(&self) -> ContentResult<HomepageView> {
        let (products, carousel_items, about, images) = tokio::join!(
            self.cached::<Vec<Product>>(PRODUCTS),
            self.cached::<Vec<CarouselSlide>>(CAROUSEL_ITEMS),
            self.cached::<AboutContent>(ABOUT),
            self.cached::<SiteImages>(IMAGES),
        );

        if let (Some(products), Some(carousel_items), Some(about), Some(images)) =
            (products, carousel_items, about, images)
        {
            debug!("Homepage served from cache");
            return Ok(HomepageView {
                products,
                carousel_items,
                about,
                images,
            });
        }

        debug!("Homepage cache incomplete, fetching all keys");
        let (products, carousel_items, about, images) = tokio::try_join!(
            self.repo.list_products(),
            self.repo.list_carousel_slides(),
            self.repo.get_about(),
            self.repo.get_site_images(),
        )
        .map_err(unavailable)?;

        tokio::join!(
            self.store(PRODUCTS, &products),
            self.store(CAROUSEL_ITEMS, &carousel_items),
            self.store(ABOUT, &about),
            self.store(IMAGES, &images),
        );

        Ok(HomepageView {
            products,
            carousel_items,
            about,
            images,
        })
    }

    /// Products, about content and site images; same policy over three keys.
    pub async fn cart_view(&self) -> ContentResult<CartView> {
        let (products, about, images) = tokio::join!(
            self.cached::<Vec<Product>>(PRODUCTS),
            self.cached::<AboutContent>(ABOUT),
            self.cached::<SiteImages>(IMAGES),
        );

        if let (Some(products), Some(about), Some(images)) = (products, about, images) {
            debug!("Cart served from cache");
            return Ok(CartView {
                products,
                about,
                images,
            });
        }

        debug!("Cart cache incomplete, fetching all keys");
        let (products, about, images) = tokio::try_join!(
            self.repo.list_products(),
            self.repo.get_about(),
            self.repo.get_site_images(),
        )
        .map_err(unavailable)?;

        tokio::join!(
            self.store(PRODUCTS, &products),
            self.store(ABOUT, &about),
            self.store(IMAGES, &images),
        );

        Ok(CartView {
            products,
            about,
            images,
        })
    }

    /// Reads and decodes one key. Every failure is a miss.
    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(key, error = %err, "Undecodable cache value, treating as miss");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(key, error = %err, "Cache read failed, treating as miss");
                None
            }
        }
    }

    async fn store<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key, error = %err, "Could not encode cache value");
                return;
            }
        };

        if let Err(err) = self.cache.set(key, raw, self.ttl).await {
            warn!(key, error = %err, "Cache write failed");
        }
    }
}

/// Read failures surface as `StorageUnavailable`, including a NotFound from
/// a misbehaving backend: a view has no identifier to be missing.
fn unavailable(err: vitrina_core::RepoError) -> ContentError {
    ContentError::StorageUnavailable(err.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::testing::{phone, slide_fields, FakeRepository, UnavailableCache};
    use std::sync::atomic::Ordering;

    const TTL: Duration = Duration::from_secs(60);

    struct Fixture {
        repo: Arc<FakeRepository>,
        cache: Arc<MemoryCache>,
        service: ContentService,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(FakeRepository::new());
        repo.seed_product(phone("iPhone 13", 2));
        repo.seed_slide(slide_fields("Spring sale", "R1", "M1"));
        repo.seed_about(AboutContent {
            title: "About".into(),
            text: "Since 2019".into(),
            image: String::new(),
        });
        repo.seed_site_images(SiteImages {
            logo: "/uploads/logo.svg".into(),
            background: String::new(),
        });

        let cache = Arc::new(MemoryCache::new());
        let service = ContentService::new(repo.clone(), cache.clone());
        Fixture {
            repo,
            cache,
            service,
        }
    }

    fn homepage_reads(repo: &FakeRepository) -> [usize; 4] {
        [
            repo.calls("list_products"),
            repo.calls("list_carousel_slides"),
            repo.calls("get_about"),
            repo.calls("get_site_images"),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_read_within_ttl_hits_cache() {
        let f = fixture();

        let first = f.service.homepage_view().await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        let second = f.service.homepage_view().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(homepage_reads(&f.repo), [1, 1, 1, 1]);

        // Each key holds exactly the value last fetched
        let cached: Vec<Product> =
            serde_json::from_str(&f.cache.get(PRODUCTS).await.unwrap().unwrap()).unwrap();
        assert_eq!(cached, first.products);
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_after_ttl_refetches() {
        let f = fixture();

        f.service.homepage_view().await.unwrap();
        tokio::time::advance(TTL).await;
        f.service.homepage_view().await.unwrap();

        assert_eq!(homepage_reads(&f.repo), [2, 2, 2, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_missing_key_refetches_all_four() {
        let f = fixture();
        f.service.homepage_view().await.unwrap();

        // Change every record, then drop only the about key
        f.repo.seed_product(phone("Pixel 8", 1));
        f.repo.seed_slide(slide_fields("Trade in", "R2", ""));
        f.repo.seed_site_images(SiteImages {
            logo: "/uploads/logo-v2.svg".into(),
            background: String::new(),
        });
        f.repo.seed_about(AboutContent {
            title: "About us".into(),
            ..AboutContent::default()
        });
        assert!(f.cache.remove(ABOUT).await);

        let view = f.service.homepage_view().await.unwrap();

        assert_eq!(homepage_reads(&f.repo), [2, 2, 2, 2]);
        assert_eq!(view.products.len(), 2);
        assert_eq!(view.carousel_items.len(), 2);
        assert_eq!(view.images.logo, "/uploads/logo-v2.svg");
        assert_eq!(view.about.title, "About us");

        // All four rewritten
        let cached: SiteImages =
            serde_json::from_str(&f.cache.get(IMAGES).await.unwrap().unwrap()).unwrap();
        assert_eq!(cached, view.images);
    }

    #[tokio::test(start_paused = true)]
    async fn test_writes_are_stale_until_ttl() {
        let f = fixture();
        let before = f.service.homepage_view().await.unwrap();
        let id = before.products[0].id;

        let mut edited = phone("iPhone 13", 2);
        edited.price_cents = 10_000;
        f.repo.update_product(id, &edited).await.unwrap();

        let within = f.service.homepage_view().await.unwrap();
        assert_eq!(within.products[0].price_cents, 49_900);

        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        let after = f.service.homepage_view().await.unwrap();
        assert_eq!(after.products[0].price_cents, 10_000);
    }

    #[tokio::test]
    async fn test_undecodable_value_is_a_miss() {
        let f = fixture();
        f.service.homepage_view().await.unwrap();
        f.cache.set(PRODUCTS, "not json".into(), TTL).await.unwrap();

        let view = f.service.homepage_view().await.unwrap();
        assert_eq!(view.products.len(), 1);
        assert_eq!(f.repo.calls("list_products"), 2);
    }

    #[tokio::test]
    async fn test_cache_outage_falls_through_to_repository() {
        let repo = Arc::new(FakeRepository::new());
        repo.seed_product(phone("Galaxy S21", 1));
        let cache = Arc::new(UnavailableCache::default());
        let service = ContentService::new(repo.clone(), cache.clone());

        let view = service.homepage_view().await.unwrap();
        service.homepage_view().await.unwrap();

        assert_eq!(view.products.len(), 1);
        assert_eq!(repo.calls("list_products"), 2);
        assert_eq!(cache.sets.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn test_repository_outage_is_storage_unavailable() {
        let f = fixture();
        f.repo.fail_reads(true);

        let err = f.service.homepage_view().await.unwrap_err();
        assert!(matches!(err, ContentError::StorageUnavailable(_)));
        assert!(f.cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cart_uses_three_keys() {
        let f = fixture();

        let cart = f.service.cart_view().await.unwrap();
        assert_eq!(cart.products.len(), 1);
        assert_eq!(f.repo.calls("list_carousel_slides"), 0);
        assert_eq!(f.cache.len().await, 3);

        // Cart keys are shared with the homepage, but the carousel is missing
        f.service.homepage_view().await.unwrap();
        assert_eq!(f.repo.calls("list_products"), 2);

        f.service.cart_view().await.unwrap();
        assert_eq!(f.repo.calls("list_products"), 2);
    }

    #[test]
    fn test_default_ttl() {
        let repo = Arc::new(FakeRepository::new());
        let cache = Arc::new(MemoryCache::new());
        let service = ContentService::new(repo, cache);
        assert_eq!(service.ttl(), Duration::from_secs(60));
    }
}
