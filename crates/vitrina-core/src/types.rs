//! # Domain Types
//!
//! Records persisted by the repository and the view-data assembled from them.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  CarouselSlide  │   │  AboutContent   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  title          │       │
//! │  │  name, price    │   │  text           │   │  text           │       │
//! │  │  image (ref)    │   │  image (ref)    │   │  image (ref)    │       │
//! │  │  stock          │   │  mobile_image   │   │  (singleton)    │       │
//! │  │  visible        │   │  color1, color2 │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                              ┌─────────────────┐       │
//! │  ┌─────────────────┐   ┌─────────────────┐   │   SiteImages    │       │
//! │  │  HomepageView   │   │    CartView     │   │  ─────────────  │       │
//! │  │  products       │   │  products       │   │  logo (ref)     │       │
//! │  │  carousel_items │   │  about          │   │  background     │       │
//! │  │  about, images  │   │  images         │   │  (singleton)    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Image fields only hold references (URL or store identifier). Binary data
//! lives in the AssetStore.

use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A product listed in the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Asset reference; empty when the product has no image.
    pub image: String,
    /// Price in cents (smallest currency unit).
    pub price_cents: i64,
    /// Units in stock. Never negative.
    pub stock: i64,
    /// Battery health of a used device, 0-100.
    pub battery_percent: i64,
    /// Storage capacity label, e.g. "128GB".
    pub storage: String,
    /// Condition label, e.g. "Like new".
    pub condition: String,
    /// Hidden products stay in the catalog but are not shown to shoppers.
    pub visible: bool,
}

impl Product {
    /// Whether a purchase request can be honoured.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Column values written by `insert_product` / `update_product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub image: String,
    pub price_cents: i64,
    pub stock: i64,
    pub battery_percent: i64,
    pub storage: String,
    pub condition: String,
    pub visible: bool,
}

impl ProductFields {
    /// Attaches an identifier, producing the stored record.
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            image: self.image,
            price_cents: self.price_cents,
            stock: self.stock,
            battery_percent: self.battery_percent,
            storage: self.storage,
            condition: self.condition,
            visible: self.visible,
        }
    }
}

/// Result of a purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOutcome {
    /// One unit was taken; `remaining` units are left.
    Purchased { remaining: i64 },
    /// Stock was zero. Nothing was written.
    OutOfStock,
}

// =============================================================================
// Carousel Slide
// =============================================================================

/// A homepage carousel slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CarouselSlide {
    pub id: i64,
    pub text: String,
    /// Desktop image reference.
    pub image: String,
    /// Mobile image reference.
    pub mobile_image: String,
    /// Hex-like color, e.g. "#ff8800".
    pub color1: String,
    pub color2: String,
}

/// Column values written by `insert_carousel_slide` / `update_carousel_slide`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideFields {
    pub text: String,
    pub image: String,
    pub mobile_image: String,
    pub color1: String,
    pub color2: String,
}

impl SlideFields {
    pub fn into_slide(self, id: i64) -> CarouselSlide {
        CarouselSlide {
            id,
            text: self.text,
            image: self.image,
            mobile_image: self.mobile_image,
            color1: self.color1,
            color2: self.color2,
        }
    }
}

// =============================================================================
// Singletons
// =============================================================================

/// The "about us" block. Exactly one logical row exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AboutContent {
    pub title: String,
    pub text: String,
    pub image: String,
}

/// Site-wide logo and background references. Exactly one logical row exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SiteImages {
    pub logo: String,
    pub background: String,
}

// =============================================================================
// Views
// =============================================================================

/// Everything the homepage renders, fetched as one consistent set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomepageView {
    pub products: Vec<Product>,
    pub carousel_items: Vec<CarouselSlide>,
    pub about: AboutContent,
    pub images: SiteImages,
}

impl HomepageView {
    /// Products shoppers may see.
    pub fn visible_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.visible)
    }
}

/// Everything the cart page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartView {
    pub products: Vec<Product>,
    pub about: AboutContent,
    pub images: SiteImages,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(id: i64, stock: i64, visible: bool) -> Product {
        Product {
            id,
            name: format!("Phone {id}"),
            description: String::new(),
            image: String::new(),
            price_cents: 19_900,
            stock,
            battery_percent: 91,
            storage: "128GB".into(),
            condition: "Good".into(),
            visible,
        }
    }

    #[test]
    fn test_in_stock() {
        assert!(phone(1, 1, true).in_stock());
        assert!(!phone(1, 0, true).in_stock());
    }

    #[test]
    fn test_visible_products_filters_hidden() {
        let view = HomepageView {
            products: vec![phone(1, 1, true), phone(2, 1, false), phone(3, 0, true)],
            carousel_items: Vec::new(),
            about: AboutContent::default(),
            images: SiteImages::default(),
        };
        let ids: Vec<i64> = view.visible_products().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_about_default_is_empty() {
        let about = AboutContent::default();
        assert_eq!(about.title, "");
        assert_eq!(about.text, "");
        assert_eq!(about.image, "");
    }

    #[test]
    fn test_purchase_outcome_serializes_snake_case() {
        let json = serde_json::to_string(&PurchaseOutcome::OutOfStock).unwrap();
        assert_eq!(json, "\"out_of_stock\"");
    }
}
