//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations
//! - Conditional stock decrement for purchases
//!
//! ## Stock Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Purchase Strategy                                │
//! │                                                                     │
//! │  ❌ WRONG: read stock, then write stock - 1                         │
//! │     Two concurrent buyers both read 1 and both write 0,             │
//! │     or a buyer writes -1 after someone else took the last unit.     │
//! │                                                                     │
//! │  ✅ CORRECT: one conditional statement                              │
//! │     UPDATE products SET stock = stock - 1                           │
//! │     WHERE id = ? AND stock > 0                                      │
//! │     RETURNING stock                                                 │
//! │                                                                     │
//! │  No row returned → out of stock. Stock never goes negative.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vitrina_core::{Product, ProductFields};

const PRODUCT_COLUMNS: &str = "id, name, description, image, price_cents, stock, \
     battery_percent, storage, condition, visible";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
/// let product = repo.get_by_id(5).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, visible or not, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product and returns it with its generated id.
    pub async fn insert(&self, fields: &ProductFields) -> DbResult<Product> {
        debug!(name = %fields.name, "Inserting product");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (
                name, description, image, price_cents, stock,
                battery_percent, storage, condition, visible
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            RETURNING id
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.image)
        .bind(fields.price_cents)
        .bind(fields.stock)
        .bind(fields.battery_percent)
        .bind(&fields.storage)
        .bind(&fields.condition)
        .bind(fields.visible)
        .fetch_one(&self.pool)
        .await?;

        Ok(fields.clone().into_product(id))
    }

    /// Overwrites every column of an existing product.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: i64, fields: &ProductFields) -> DbResult<()> {
        debug!(id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                image = ?4,
                price_cents = ?5,
                stock = ?6,
                battery_percent = ?7,
                storage = ?8,
                condition = ?9,
                visible = ?10
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.image)
        .bind(fields.price_cents)
        .bind(fields.stock)
        .bind(fields.battery_percent)
        .bind(&fields.storage)
        .bind(&fields.condition)
        .bind(fields.visible)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Shows or hides a product, touching no other column.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product as stored after the change
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn set_visibility(&self, id: i64, visible: bool) -> DbResult<Product> {
        debug!(id, visible, "Setting product visibility");

        let sql =
            format!("UPDATE products SET visible = ?2 WHERE id = ?1 RETURNING {PRODUCT_COLUMNS}");
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(visible)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Takes one unit of stock if any is left.
    ///
    /// ## Returns
    /// * `Ok(Some(remaining))` - One unit taken
    /// * `Ok(None)` - Stock was zero or the product doesn't exist
    pub async fn decrement_stock(&self, id: i64) -> DbResult<Option<i64>> {
        debug!(id, "Decrementing stock");

        let remaining: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE products
            SET stock = stock - 1
            WHERE id = ?1 AND stock > 0
            RETURNING stock
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(remaining)
    }

    /// Deletes a product row.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
