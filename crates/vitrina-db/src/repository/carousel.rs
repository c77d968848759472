//! # Carousel Repository
//!
//! Database operations for homepage carousel slides.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vitrina_core::{CarouselSlide, SlideFields};

/// Repository for carousel slide operations.
#[derive(Debug, Clone)]
pub struct CarouselRepository {
    pool: SqlitePool,
}

impl CarouselRepository {
    /// Creates a new CarouselRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CarouselRepository { pool }
    }

    /// Lists all slides in display order (by id).
    pub async fn list(&self) -> DbResult<Vec<CarouselSlide>> {
        let slides = sqlx::query_as::<_, CarouselSlide>(
            "SELECT id, text, image, mobile_image, color1, color2 FROM carousel ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(slides)
    }

    /// Gets a slide by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<CarouselSlide>> {
        let slide = sqlx::query_as::<_, CarouselSlide>(
            "SELECT id, text, image, mobile_image, color1, color2 FROM carousel WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slide)
    }

    /// Inserts a new slide and returns it with its generated id.
    pub async fn insert(&self, fields: &SlideFields) -> DbResult<CarouselSlide> {
        debug!(text = %fields.text, "Inserting carousel slide");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO carousel (text, image, mobile_image, color1, color2)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id
            "#,
        )
        .bind(&fields.text)
        .bind(&fields.image)
        .bind(&fields.mobile_image)
        .bind(&fields.color1)
        .bind(&fields.color2)
        .fetch_one(&self.pool)
        .await?;

        Ok(fields.clone().into_slide(id))
    }

    /// Overwrites every column of an existing slide.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No slide with that id
    pub async fn update(&self, id: i64, fields: &SlideFields) -> DbResult<()> {
        debug!(id, "Updating carousel slide");

        let result = sqlx::query(
            r#"
            UPDATE carousel SET
                text = ?2,
                image = ?3,
                mobile_image = ?4,
                color1 = ?5,
                color2 = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&fields.text)
        .bind(&fields.image)
        .bind(&fields.mobile_image)
        .bind(&fields.color1)
        .bind(&fields.color2)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Carousel slide", id));
        }

        Ok(())
    }

    /// Deletes a slide row.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting carousel slide");

        let result = sqlx::query("DELETE FROM carousel WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Carousel slide", id));
        }

        Ok(())
    }
}
