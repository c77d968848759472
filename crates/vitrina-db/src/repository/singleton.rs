//! # Singleton Repository
//!
//! The `about` and `site_images` tables each hold exactly one row, id 1.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Migration seeds:   INSERT OR IGNORE ... (1, '', ...)               │
//! │  Schema enforces:   id INTEGER PRIMARY KEY CHECK (id = 1)           │
//! │  Updates are upserts on id 1, so a missing row is recreated         │
//! │  rather than reported.                                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use vitrina_core::{AboutContent, SiteImages, SINGLETON_ID};

/// Repository for the about-page and site-images singleton rows.
#[derive(Debug, Clone)]
pub struct SingletonRepository {
    pool: SqlitePool,
}

impl SingletonRepository {
    /// Creates a new SingletonRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SingletonRepository { pool }
    }

    /// Reads the about-page content. An absent row reads as empty content.
    pub async fn get_about(&self) -> DbResult<AboutContent> {
        let about = sqlx::query_as::<_, AboutContent>(
            "SELECT title, text, image FROM about WHERE id = ?1",
        )
        .bind(SINGLETON_ID)
        .fetch_optional(&self.pool)
        .await?;

        Ok(about.unwrap_or_default())
    }

    /// Overwrites the about-page content.
    pub async fn update_about(&self, about: &AboutContent) -> DbResult<()> {
        debug!(title = %about.title, "Updating about content");

        sqlx::query(
            r#"
            INSERT INTO about (id, title, text, image)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                text = excluded.text,
                image = excluded.image
            "#,
        )
        .bind(SINGLETON_ID)
        .bind(&about.title)
        .bind(&about.text)
        .bind(&about.image)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reads the logo and background references.
    pub async fn get_site_images(&self) -> DbResult<SiteImages> {
        let images = sqlx::query_as::<_, SiteImages>(
            "SELECT logo, background FROM site_images WHERE id = ?1",
        )
        .bind(SINGLETON_ID)
        .fetch_optional(&self.pool)
        .await?;

        Ok(images.unwrap_or_default())
    }

    /// Overwrites the logo and background references.
    pub async fn update_site_images(&self, images: &SiteImages) -> DbResult<()> {
        debug!("Updating site images");

        sqlx::query(
            r#"
            INSERT INTO site_images (id, logo, background)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                logo = excluded.logo,
                background = excluded.background
            "#,
        )
        .bind(SINGLETON_ID)
        .bind(&images.logo)
        .bind(&images.background)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
