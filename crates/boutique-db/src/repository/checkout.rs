//! # Checkout Repository
//!
//! The single write path that turns a staged cart into a committed sale.
//! Everything happens inside one SQLite transaction:
//!
//! ```text
//! BEGIN
//!   for each line:
//!     UPDATE products SET quantity = quantity - n WHERE id = ? AND quantity >= n
//!       (0 rows → stock shrank since staging, or product vanished → abort)
//!   SELECT COALESCE(MAX(number), 0) + 1         -- receipt number allocation
//!   INSERT receipt
//!   INSERT one snapshot line per cart line
//! COMMIT
//! ```
//!
//! The guarded decrement is the authoritative stock check. Whatever the cart
//! believed at staging time, this re-check inside the transaction is what
//! decides, so two terminals racing over the last unit cannot both win. On
//! any failure the transaction is rolled back when it drops: no receipt, no
//! lines, no decrement.
//!
//! Numbers come from `MAX(number) + 1` inside the same transaction, which
//! makes them gapless and strictly increasing from 1 for as long as receipts
//! are never deleted.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbError;
use boutique_core::{CartLine, Receipt, ReceiptLine};

/// A successfully committed sale: the new receipt and its snapshot lines.
#[derive(Debug, Clone)]
pub struct CommittedSale {
    pub receipt: Receipt,
    pub lines: Vec<ReceiptLine>,
}

/// Why a commit was rolled back.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Stock was sufficient at staging time but not at commit time.
    #[error("insufficient stock for '{product_name}': {available} available, {requested} requested")]
    InsufficientStock {
        product_id: i64,
        product_name: String,
        available: i64,
        requested: i64,
    },

    /// A staged product no longer exists in the catalog.
    #[error("product {0} no longer exists")]
    ProductMissing(i64),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(err: sqlx::Error) -> Self {
        CheckoutError::Db(DbError::from(err))
    }
}

/// Repository owning the atomic commit of a sale.
#[derive(Debug, Clone)]
pub struct CheckoutRepository {
    pool: SqlitePool,
}

impl CheckoutRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CheckoutRepository { pool }
    }

    /// Commits a staged cart as one atomic sale.
    ///
    /// Callers must pass a non-empty slice; the engine rejects empty carts
    /// before reaching storage.
    pub async fn commit(&self, lines: &[CartLine]) -> Result<CommittedSale, CheckoutError> {
        debug!(line_count = lines.len(), "beginning checkout transaction");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // Guarded decrements first. A zero-row update means this line can no
        // longer be satisfied and the whole sale aborts.
        for line in lines {
            let result = sqlx::query(
                r#"
                UPDATE products
                SET quantity = quantity - ?1, updated_at = ?2
                WHERE id = ?3 AND quantity >= ?1
                "#,
            )
            .bind(line.quantity)
            .bind(now)
            .bind(line.product_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                let available: Option<i64> =
                    sqlx::query_scalar("SELECT quantity FROM products WHERE id = ?1")
                        .bind(line.product_id)
                        .fetch_optional(&mut *tx)
                        .await?;

                // tx dropped here → rollback, earlier decrements undone.
                return match available {
                    Some(available) => Err(CheckoutError::InsufficientStock {
                        product_id: line.product_id,
                        product_name: line.product_name.clone(),
                        available,
                        requested: line.quantity,
                    }),
                    None => Err(CheckoutError::ProductMissing(line.product_id)),
                };
            }
        }

        // Number allocation and receipt insert share the transaction with the
        // decrements, so the number is unique even under concurrent checkouts.
        let number: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(number), 0) + 1 FROM receipts")
            .fetch_one(&mut *tx)
            .await?;

        let total: i64 = lines.iter().map(CartLine::subtotal).sum();

        let receipt_id = sqlx::query(
            r#"
            INSERT INTO receipts (number, total, document_reference, created_at)
            VALUES (?1, ?2, NULL, ?3)
            "#,
        )
        .bind(number)
        .bind(total)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let mut snapshot = Vec::with_capacity(lines.len());
        for line in lines {
            let line_id = sqlx::query(
                r#"
                INSERT INTO receipt_lines
                    (receipt_id, product_id, product_name, price, quantity, subtotal)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(receipt_id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(line.unit_price)
            .bind(line.quantity)
            .bind(line.subtotal())
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

            snapshot.push(ReceiptLine {
                id: line_id,
                receipt_id,
                product_id: line.product_id,
                product_name: line.product_name.clone(),
                price: line.unit_price,
                quantity: line.quantity,
                subtotal: line.subtotal(),
            });
        }

        tx.commit().await?;

        info!(number, total, lines = snapshot.len(), "sale committed");

        Ok(CommittedSale {
            receipt: Receipt {
                id: receipt_id,
                number,
                total,
                document_reference: None,
                created_at: now,
            },
            lines: snapshot,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::CheckoutError;
    use crate::pool::{Database, DbConfig};
    use boutique_core::{Cart, CartLine};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_commit_decrements_stock_and_numbers_from_one() {
        let db = db().await;
        let product = db
            .products()
            .insert("Kids T-Shirt (Blue)", 15_000, 25)
            .await
            .unwrap();

        let mut cart = Cart::new();
        cart.stage(CartLine::from_product(&product, 5));

        let sale = db.checkout().commit(cart.lines()).await.unwrap();
        assert_eq!(sale.receipt.number, 1);
        assert_eq!(sale.receipt.total, 75_000);
        assert_eq!(sale.lines.len(), 1);
        assert_eq!(sale.lines[0].subtotal, 75_000);

        let remaining = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(remaining.quantity, 20);

        // Second sale takes the next number.
        let mut cart = Cart::new();
        cart.stage(CartLine::from_product(&product, 1));
        let second = db.checkout().commit(cart.lines()).await.unwrap();
        assert_eq!(second.receipt.number, 2);
    }

    #[tokio::test]
    async fn test_insufficient_stock_rolls_back_everything() {
        let db = db().await;
        let shirts = db
            .products()
            .insert("Kids T-Shirt (Blue)", 15_000, 25)
            .await
            .unwrap();
        let dresses = db.products().insert("Kids Dress", 35_000, 2).await.unwrap();

        // First line is satisfiable, second is not; neither may stick.
        let mut cart = Cart::new();
        cart.stage(CartLine::from_product(&shirts, 5));
        cart.stage(CartLine::from_product(&dresses, 3));

        let err = db.checkout().commit(cart.lines()).await.unwrap_err();
        match err {
            CheckoutError::InsufficientStock {
                product_id,
                available,
                requested,
                ..
            } => {
                assert_eq!(product_id, dresses.id);
                assert_eq!(available, 2);
                assert_eq!(requested, 3);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // The partial decrement of the first line was rolled back.
        let shirts = db.products().get_by_id(shirts.id).await.unwrap().unwrap();
        assert_eq!(shirts.quantity, 25);
        assert_eq!(db.receipts().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_vanished_product_aborts_commit() {
        let db = db().await;
        let product = db.products().insert("Kids Cap", 10_000, 10).await.unwrap();

        let mut cart = Cart::new();
        cart.stage(CartLine::from_product(&product, 1));

        db.products().delete(product.id).await.unwrap();

        let err = db.checkout().commit(cart.lines()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::ProductMissing(id) if id == product.id));
        assert_eq!(db.receipts().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_exact_stock_sells_to_zero() {
        let db = db().await;
        let product = db.products().insert("Kids Socks", 5_000, 3).await.unwrap();

        let mut cart = Cart::new();
        cart.stage(CartLine::from_product(&product, 3));

        db.checkout().commit(cart.lines()).await.unwrap();

        let remaining = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(remaining.quantity, 0);
    }
}
