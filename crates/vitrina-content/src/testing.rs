//! In-memory collaborators for service tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::oneshot;

use vitrina_core::ports::RepoResult;
use vitrina_core::{
    AboutContent, AssetStore, AssetStoreError, Cache, CacheError, CarouselSlide, Product,
    ProductFields, RepoError, Repository, SiteImages, SlideFields, Upload,
};

// =============================================================================
// Repository
// =============================================================================

#[derive(Default)]
struct Tables {
    products: BTreeMap<i64, Product>,
    slides: BTreeMap<i64, CarouselSlide>,
    about: AboutContent,
    images: SiteImages,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Repository over in-memory maps that counts calls per operation.
#[derive(Default)]
pub struct FakeRepository {
    tables: Mutex<Tables>,
    calls: Mutex<HashMap<&'static str, usize>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `operation` (the trait method name) was called.
    pub fn calls(&self, operation: &str) -> usize {
        self.calls.lock().unwrap().get(operation).copied().unwrap_or(0)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn seed_product(&self, fields: ProductFields) -> Product {
        let mut tables = self.tables.lock().unwrap();
        let product = fields.into_product(tables.next_id());
        tables.products.insert(product.id, product.clone());
        product
    }

    /// Seeds a product under a fixed id.
    pub fn seed_product_with_id(&self, id: i64, fields: ProductFields) -> Product {
        let mut tables = self.tables.lock().unwrap();
        tables.next_id = tables.next_id.max(id);
        let product = fields.into_product(id);
        tables.products.insert(id, product.clone());
        product
    }

    pub fn seed_slide(&self, fields: SlideFields) -> CarouselSlide {
        let mut tables = self.tables.lock().unwrap();
        let slide = fields.into_slide(tables.next_id());
        tables.slides.insert(slide.id, slide.clone());
        slide
    }

    pub fn seed_about(&self, about: AboutContent) {
        self.tables.lock().unwrap().about = about;
    }

    pub fn seed_site_images(&self, images: SiteImages) {
        self.tables.lock().unwrap().images = images;
    }

    pub fn product(&self, id: i64) -> Option<Product> {
        self.tables.lock().unwrap().products.get(&id).cloned()
    }

    pub fn slide(&self, id: i64) -> Option<CarouselSlide> {
        self.tables.lock().unwrap().slides.get(&id).cloned()
    }

    pub fn slide_count(&self) -> usize {
        self.tables.lock().unwrap().slides.len()
    }

    pub fn about(&self) -> AboutContent {
        self.tables.lock().unwrap().about.clone()
    }

    pub fn site_images(&self) -> SiteImages {
        self.tables.lock().unwrap().images.clone()
    }

    fn read(&self, operation: &'static str) -> RepoResult<()> {
        *self.calls.lock().unwrap().entry(operation).or_default() += 1;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepoError::Unavailable("read failure injected".into()));
        }
        Ok(())
    }

    fn write(&self, operation: &'static str) -> RepoResult<()> {
        *self.calls.lock().unwrap().entry(operation).or_default() += 1;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepoError::Unavailable("write failure injected".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl Repository for FakeRepository {
    async fn list_products(&self) -> RepoResult<Vec<Product>> {
        self.read("list_products")?;
        Ok(self.tables.lock().unwrap().products.values().cloned().collect())
    }

    async fn get_product(&self, id: i64) -> RepoResult<Option<Product>> {
        self.read("get_product")?;
        Ok(self.product(id))
    }

    async fn insert_product(&self, fields: &ProductFields) -> RepoResult<Product> {
        self.write("insert_product")?;
        Ok(self.seed_product(fields.clone()))
    }

    async fn update_product(&self, id: i64, fields: &ProductFields) -> RepoResult<()> {
        self.write("update_product")?;
        let mut tables = self.tables.lock().unwrap();
        let product = tables
            .products
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Product", id))?;
        *product = fields.clone().into_product(id);
        Ok(())
    }

    async fn delete_product(&self, id: i64) -> RepoResult<()> {
        self.write("delete_product")?;
        self.tables
            .lock()
            .unwrap()
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Product", id))
    }

    async fn set_product_visibility(&self, id: i64, visible: bool) -> RepoResult<Product> {
        self.write("set_product_visibility")?;
        let mut tables = self.tables.lock().unwrap();
        let product = tables
            .products
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Product", id))?;
        product.visible = visible;
        Ok(product.clone())
    }

    async fn decrement_stock(&self, id: i64) -> RepoResult<Option<i64>> {
        self.write("decrement_stock")?;
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .products
            .get_mut(&id)
            .filter(|p| p.stock > 0)
            .map(|p| {
                p.stock -= 1;
                p.stock
            }))
    }

    async fn list_carousel_slides(&self) -> RepoResult<Vec<CarouselSlide>> {
        self.read("list_carousel_slides")?;
        Ok(self.tables.lock().unwrap().slides.values().cloned().collect())
    }

    async fn get_carousel_slide(&self, id: i64) -> RepoResult<Option<CarouselSlide>> {
        self.read("get_carousel_slide")?;
        Ok(self.slide(id))
    }

    async fn insert_carousel_slide(&self, fields: &SlideFields) -> RepoResult<CarouselSlide> {
        self.write("insert_carousel_slide")?;
        Ok(self.seed_slide(fields.clone()))
    }

    async fn update_carousel_slide(&self, id: i64, fields: &SlideFields) -> RepoResult<()> {
        self.write("update_carousel_slide")?;
        let mut tables = self.tables.lock().unwrap();
        let slide = tables
            .slides
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Carousel slide", id))?;
        *slide = fields.clone().into_slide(id);
        Ok(())
    }

    async fn delete_carousel_slide(&self, id: i64) -> RepoResult<()> {
        self.write("delete_carousel_slide")?;
        self.tables
            .lock()
            .unwrap()
            .slides
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Carousel slide", id))
    }

    async fn get_about(&self) -> RepoResult<AboutContent> {
        self.read("get_about")?;
        Ok(self.about())
    }

    async fn update_about(&self, about: &AboutContent) -> RepoResult<()> {
        self.write("update_about")?;
        self.seed_about(about.clone());
        Ok(())
    }

    async fn get_site_images(&self) -> RepoResult<SiteImages> {
        self.read("get_site_images")?;
        Ok(self.site_images())
    }

    async fn update_site_images(&self, images: &SiteImages) -> RepoResult<()> {
        self.write("update_site_images")?;
        self.seed_site_images(images.clone());
        Ok(())
    }
}

// =============================================================================
// Asset Store
// =============================================================================

/// Hands out `mem://{n}-{file_name}` references and records every call.
#[derive(Default)]
pub struct RecordingAssetStore {
    upload_calls: AtomicUsize,
    uploads: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
    gate: Mutex<Option<UploadGate>>,
}

struct UploadGate {
    entered: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

impl RecordingAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful uploads, in call order.
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    /// Every delete attempt, failed ones included.
    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst) + self.deletes.lock().unwrap().len()
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Blocks the next upload after it has taken its reference.
    ///
    /// The first receiver fires once that upload is waiting; sending on the
    /// returned sender lets it finish.
    pub fn gate_next_upload(&self) -> (oneshot::Receiver<()>, oneshot::Sender<()>) {
        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(UploadGate {
            entered: entered_tx,
            release: release_rx,
        });
        (entered_rx, release_tx)
    }
}

#[async_trait]
impl AssetStore for RecordingAssetStore {
    async fn upload(&self, upload: &Upload) -> Result<String, AssetStoreError> {
        let n = self.upload_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AssetStoreError::Io("upload failure injected".into()));
        }
        let reference = format!("mem://{n}-{}", upload.file_name);

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.entered.send(());
            let _ = gate.release.await;
        }

        self.uploads.lock().unwrap().push(reference.clone());
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<(), AssetStoreError> {
        self.deletes.lock().unwrap().push(reference.to_string());
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AssetStoreError::Io("delete failure injected".into()));
        }
        Ok(())
    }
}

// =============================================================================
// Cache
// =============================================================================

/// Cache whose backend is always down.
#[derive(Default)]
pub struct UnavailableCache {
    pub sets: AtomicUsize,
}

#[async_trait]
impl Cache for UnavailableCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Unavailable("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable("connection refused".into()))
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn phone(name: &str, stock: i64) -> ProductFields {
    ProductFields {
        name: name.to_string(),
        description: "Unlocked, tested".to_string(),
        image: String::new(),
        price_cents: 49_900,
        stock,
        battery_percent: 91,
        storage: "128GB".to_string(),
        condition: "Very good".to_string(),
        visible: true,
    }
}

pub fn slide_fields(text: &str, image: &str, mobile_image: &str) -> SlideFields {
    SlideFields {
        text: text.to_string(),
        image: image.to_string(),
        mobile_image: mobile_image.to_string(),
        color1: "#000000".to_string(),
        color2: "#ffffff".to_string(),
    }
}
