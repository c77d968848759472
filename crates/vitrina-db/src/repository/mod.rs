//! # Repository Module
//!
//! SQLite repositories for Vitrina, plus the [`Repository`] implementation
//! the content services are written against.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layering                                  │
//! │                                                                         │
//! │  ContentService / *AdminService (vitrina-content)                      │
//! │       │                                                                 │
//! │       │  Arc<dyn Repository>  →  repo.update_product(id, &fields)       │
//! │       ▼                                                                 │
//! │  impl Repository for Database (this module)                            │
//! │       │                                                                 │
//! │       │  db.products().update(id, &fields)   DbError → RepoError        │
//! │       ▼                                                                 │
//! │  ProductRepository · CarouselRepository · SingletonRepository          │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`] - Product CRUD and stock decrement
//! - [`CarouselRepository`] - Carousel slide CRUD
//! - [`SingletonRepository`] - About content and site images (id = 1)

pub mod carousel;
pub mod product;
pub mod singleton;

use async_trait::async_trait;
use vitrina_core::ports::RepoResult;
use vitrina_core::{
    AboutContent, CarouselSlide, Product, ProductFields, Repository, SiteImages, SlideFields,
};

use crate::pool::Database;

pub use carousel::CarouselRepository;
pub use product::ProductRepository;
pub use singleton::SingletonRepository;

#[async_trait]
impl Repository for Database {
    async fn list_products(&self) -> RepoResult<Vec<Product>> {
        Ok(self.products().list().await?)
    }

    async fn get_product(&self, id: i64) -> RepoResult<Option<Product>> {
        Ok(self.products().get_by_id(id).await?)
    }

    async fn insert_product(&self, fields: &ProductFields) -> RepoResult<Product> {
        Ok(self.products().insert(fields).await?)
    }

    async fn update_product(&self, id: i64, fields: &ProductFields) -> RepoResult<()> {
        Ok(self.products().update(id, fields).await?)
    }

    async fn delete_product(&self, id: i64) -> RepoResult<()> {
        Ok(self.products().delete(id).await?)
    }

    async fn set_product_visibility(&self, id: i64, visible: bool) -> RepoResult<Product> {
        Ok(self.products().set_visibility(id, visible).await?)
    }

    async fn decrement_stock(&self, id: i64) -> RepoResult<Option<i64>> {
        Ok(self.products().decrement_stock(id).await?)
    }

    async fn list_carousel_slides(&self) -> RepoResult<Vec<CarouselSlide>> {
        Ok(self.carousel().list().await?)
    }

    async fn get_carousel_slide(&self, id: i64) -> RepoResult<Option<CarouselSlide>> {
        Ok(self.carousel().get_by_id(id).await?)
    }

    async fn insert_carousel_slide(&self, fields: &SlideFields) -> RepoResult<CarouselSlide> {
        Ok(self.carousel().insert(fields).await?)
    }

    async fn update_carousel_slide(&self, id: i64, fields: &SlideFields) -> RepoResult<()> {
        Ok(self.carousel().update(id, fields).await?)
    }

    async fn delete_carousel_slide(&self, id: i64) -> RepoResult<()> {
        Ok(self.carousel().delete(id).await?)
    }

    async fn get_about(&self) -> RepoResult<AboutContent> {
        Ok(self.singletons().get_about().await?)
    }

    async fn update_about(&self, about: &AboutContent) -> RepoResult<()> {
        Ok(self.singletons().update_about(about).await?)
    }

    async fn get_site_images(&self) -> RepoResult<SiteImages> {
        Ok(self.singletons().get_site_images().await?)
    }

    async fn update_site_images(&self, images: &SiteImages) -> RepoResult<()> {
        Ok(self.singletons().update_site_images(images).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use std::sync::Arc;
    use vitrina_core::RepoError;

    #[tokio::test]
    async fn test_database_as_trait_object() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo: Arc<dyn Repository> = Arc::new(db);

        assert!(repo.list_products().await.unwrap().is_empty());
        assert_eq!(repo.get_about().await.unwrap(), AboutContent::default());
    }

    #[tokio::test]
    async fn test_not_found_maps_to_repo_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = Repository::delete_carousel_slide(&db, 3).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_closed_pool_is_unavailable() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        let err = Repository::list_products(&db).await.unwrap_err();
        assert!(matches!(err, RepoError::Unavailable(_)));
    }
}
