//! # Catalog Admin Service
//!
//! Product administration and the storefront purchase action.
//!
//! ## Purchase
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  purchase(id)                                                       │
//! │    get_product(id) ── None ──────────────► NotFound                 │
//! │         │                                                           │
//! │    stock == 0 ───────────────────────────► OutOfStock (no write)    │
//! │         │                                                           │
//! │    decrement_stock(id)   (UPDATE ... WHERE stock > 0)               │
//! │         ├── Some(remaining) ─────────────► Purchased { remaining }  │
//! │         └── None (sold out meanwhile) ───► OutOfStock               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::info;

use vitrina_core::validation::{
    validate_battery_percent, validate_identifier, validate_price_cents, validate_product_name,
    validate_reference_literal, validate_stock,
};
use vitrina_core::{
    AssetField, AssetInput, ContentError, ContentResult, Product, ProductFields, PurchaseOutcome,
    Repository, WriteMode,
};

use crate::lifecycle::{AssetChanges, AssetLifecycleManager};

/// Form data for creating or editing a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub stock: i64,
    pub battery_percent: i64,
    pub storage: String,
    pub condition: String,
    pub visible: bool,
    pub image: AssetInput,
}

impl ProductInput {
    fn validate(&self) -> ContentResult<()> {
        validate_product_name(&self.name)?;
        validate_price_cents(self.price_cents)?;
        validate_stock(self.stock)?;
        validate_battery_percent(self.battery_percent)?;
        validate_reference_literal("image", self.image.literal.as_deref())?;
        Ok(())
    }

    fn into_fields(self, image: String) -> ProductFields {
        ProductFields {
            name: self.name.trim().to_string(),
            description: self.description,
            image,
            price_cents: self.price_cents,
            stock: self.stock,
            battery_percent: self.battery_percent,
            storage: self.storage,
            condition: self.condition,
            visible: self.visible,
        }
    }
}

#[derive(Clone)]
pub struct CatalogAdminService {
    repo: Arc<dyn Repository>,
    assets: AssetLifecycleManager,
}

impl CatalogAdminService {
    pub fn new(repo: Arc<dyn Repository>, assets: AssetLifecycleManager) -> Self {
        CatalogAdminService { repo, assets }
    }

    /// Single product, for the edit form.
    pub async fn product(&self, id: i64) -> ContentResult<Product> {
        validate_identifier(id)?;
        self.require(id).await
    }

    /// Every product, hidden ones included.
    pub async fn list(&self) -> ContentResult<Vec<Product>> {
        Ok(self.repo.list_products().await?)
    }

    pub async fn create(&self, input: ProductInput) -> ContentResult<Product> {
        input.validate()?;

        let mut changes = AssetChanges::new();
        let image = self
            .assets
            .resolve(AssetField::ProductImage, None, &input.image, WriteMode::Create, &mut changes)
            .await?;

        let fields = input.into_fields(image);
        let write = self.repo.insert_product(&fields).await;
        let product = self.assets.settle(changes, write).await?;

        info!(id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Overwrites every field; the image follows the upload/literal/keep rule.
    pub async fn edit(&self, id: i64, input: ProductInput) -> ContentResult<Product> {
        validate_identifier(id)?;
        input.validate()?;

        let current = self.require(id).await?;

        let mut changes = AssetChanges::new();
        let image = self
            .assets
            .resolve(
                AssetField::ProductImage,
                Some(&current.image),
                &input.image,
                WriteMode::Replace,
                &mut changes,
            )
            .await?;

        let fields = input.into_fields(image);
        let write = self.repo.update_product(id, &fields).await;
        self.assets.settle(changes, write).await?;

        info!(id, "Product updated");
        Ok(fields.into_product(id))
    }

    /// Deletes the product, then its image (best effort).
    pub async fn delete(&self, id: i64) -> ContentResult<()> {
        validate_identifier(id)?;
        let product = self.require(id).await?;

        self.repo.delete_product(id).await?;
        info!(id, "Product deleted");

        self.assets
            .release(AssetField::ProductImage, &product.image)
            .await;
        Ok(())
    }

    pub async fn set_visibility(&self, id: i64, visible: bool) -> ContentResult<Product> {
        validate_identifier(id)?;
        let product = self.repo.set_product_visibility(id, visible).await?;

        info!(id, visible, "Product visibility changed");
        Ok(product)
    }

    /// Takes one unit of stock. Stock never goes below zero.
    pub async fn purchase(&self, id: i64) -> ContentResult<PurchaseOutcome> {
        validate_identifier(id)?;
        let product = self.require(id).await?;

        if !product.in_stock() {
            info!(id, "Purchase refused: out of stock");
            return Ok(PurchaseOutcome::OutOfStock);
        }

        match self.repo.decrement_stock(id).await? {
            Some(remaining) => {
                info!(id, remaining, "Purchase recorded");
                Ok(PurchaseOutcome::Purchased { remaining })
            }
            None => {
                info!(id, "Purchase refused: sold out concurrently");
                Ok(PurchaseOutcome::OutOfStock)
            }
        }
    }

    async fn require(&self, id: i64) -> ContentResult<Product> {
        self.repo
            .get_product(id)
            .await?
            .ok_or_else(|| ContentError::not_found("Product", id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
