//! # Product Repository
//!
//! Catalog CRUD and the aggregate queries behind the dashboard (stock value,
//! low-stock count).
//!
//! Every mutation is immediately durable: there is no buffered state and no
//! flush step visible to callers. Stock *decrements* are deliberately absent
//! here; they happen only inside the checkout transaction
//! (`CheckoutRepository::commit`), so nothing outside that transaction can
//! take stock below zero.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use boutique_core::Product;

/// Repository for product catalog operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product and returns it with its assigned id.
    ///
    /// Numeric validation happens in the engine before this call; the CHECK
    /// constraints back it up and surface as [`DbError::CheckViolation`].
    pub async fn insert(&self, name: &str, price: i64, quantity: i64) -> DbResult<Product> {
        debug!(name = %name, price, quantity, "inserting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price, quantity, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            price,
            quantity,
            created_at: now,
            updated_at: now,
        })
    }

    /// Gets a product by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, quantity, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists the whole catalog, ordered by id ascending.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, quantity, created_at, updated_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Updates name, price, and quantity of an existing product.
    pub async fn update(&self, id: i64, name: &str, price: i64, quantity: i64) -> DbResult<()> {
        debug!(id, "updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?2, price = ?3, quantity = ?4, updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(price)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", id));
        }

        Ok(())
    }

    /// Deletes a product. Receipt lines keep their own snapshot of it, so
    /// history is unaffected.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", id));
        }

        Ok(())
    }

    /// Number of products with stock strictly below `threshold`.
    pub async fn low_stock_count(&self, threshold: i64) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE quantity < ?1")
            .bind(threshold)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Σ price × quantity over the whole catalog, in minor units.
    pub async fn total_inventory_value(&self) -> DbResult<i64> {
        let value: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(price * quantity), 0) FROM products")
                .fetch_one(&self.pool)
                .await?;

        Ok(value)
    }

    /// Total number of catalog entries.
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

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::error::DbError;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let db = db().await;
        let repo = db.products();

        let a = repo.insert("Kids T-Shirt (Blue)", 15_000, 25).await.unwrap();
        let b = repo.insert("Kids Dress", 35_000, 15).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_get_and_list_ordering() {
        let db = db().await;
        let repo = db.products();

        repo.insert("Kids Shorts", 12_000, 20).await.unwrap();
        repo.insert("Baby Romper", 25_000, 8).await.unwrap();

        let found = repo.get_by_id(2).await.unwrap().unwrap();
        assert_eq!(found.name, "Baby Romper");

        assert!(repo.get_by_id(99).await.unwrap().is_none());

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].id < all[1].id);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = db().await;
        let repo = db.products();

        let p = repo.insert("Kids Jeans", 28_000, 12).await.unwrap();

        repo.update(p.id, "Kids Jeans (Slim)", 30_000, 10).await.unwrap();
        let updated = repo.get_by_id(p.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Kids Jeans (Slim)");
        assert_eq!(updated.price, 30_000);
        assert_eq!(updated.quantity, 10);

        repo.delete(p.id).await.unwrap();
        assert!(repo.get_by_id(p.id).await.unwrap().is_none());

        assert!(matches!(
            repo.delete(p.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            repo.update(p.id, "x", 1, 1).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_negative_stock() {
        let db = db().await;
        let repo = db.products();

        let p = repo.insert("Baby Blanket", 30_000, 18).await.unwrap();

        // Storage must FAIL the write, not clamp it.
        let err = repo.update(p.id, "Baby Blanket", 30_000, -1).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));

        let unchanged = repo.get_by_id(p.id).await.unwrap().unwrap();
        assert_eq!(unchanged.quantity, 18);
    }

    #[tokio::test]
    async fn test_aggregates() {
        let db = db().await;
        let repo = db.products();

        assert_eq!(repo.total_inventory_value().await.unwrap(), 0);

        repo.insert("Kids T-Shirt (Blue)", 15_000, 25).await.unwrap();
        repo.insert("Kids Jacket", 45_000, 5).await.unwrap();

        // 15_000*25 + 45_000*5
        assert_eq!(repo.total_inventory_value().await.unwrap(), 600_000);
        assert_eq!(repo.low_stock_count(10).await.unwrap(), 1);
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
