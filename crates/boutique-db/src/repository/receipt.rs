//! # Receipt Repository
//!
//! Read side of the receipt ledger, plus the document-reference update used
//! after rendering. Receipt *creation* lives in [`crate::CheckoutRepository`];
//! it is never done here, so a receipt row can only ever appear together with
//! its lines and the matching stock decrement.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use boutique_core::{Receipt, ReceiptLine};

/// Default number of receipts returned by [`ReceiptRepository::history`].
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// Repository for receipt and receipt-line queries.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    /// Gets a receipt by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Receipt>> {
        let receipt = sqlx::query_as::<_, Receipt>(
            r#"
            SELECT id, number, total, document_reference, created_at
            FROM receipts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receipt)
    }

    /// Lines of one receipt, in insertion order.
    pub async fn get_lines(&self, receipt_id: i64) -> DbResult<Vec<ReceiptLine>> {
        let lines = sqlx::query_as::<_, ReceiptLine>(
            r#"
            SELECT id, receipt_id, product_id, product_name, price, quantity, subtotal
            FROM receipt_lines
            WHERE receipt_id = ?1
            ORDER BY id
            "#,
        )
        .bind(receipt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Most recent receipts first, capped at `limit`.
    pub async fn history(&self, limit: i64) -> DbResult<Vec<Receipt>> {
        let receipts = sqlx::query_as::<_, Receipt>(
            r#"
            SELECT id, number, total, document_reference, created_at
            FROM receipts
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(receipts)
    }

    /// A receipt together with its lines, or `None` if it does not exist.
    pub async fn get_with_lines(&self, id: i64) -> DbResult<Option<(Receipt, Vec<ReceiptLine>)>> {
        let Some(receipt) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        let lines = self.get_lines(id).await?;
        Ok(Some((receipt, lines)))
    }

    /// The number the *next* committed receipt would take.
    ///
    /// Advisory only (for display); the authoritative allocation is the same
    /// query re-run inside the checkout transaction.
    pub async fn next_number(&self) -> DbResult<i64> {
        let next: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(number), 0) + 1 FROM receipts")
            .fetch_one(&self.pool)
            .await?;

        Ok(next)
    }

    /// Records where the rendered document for a receipt landed.
    pub async fn set_document_reference(&self, id: i64, reference: &str) -> DbResult<()> {
        debug!(id, reference = %reference, "recording document reference");

        let result = sqlx::query("UPDATE receipts SET document_reference = ?2 WHERE id = ?1")
            .bind(id)
            .bind(reference)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("receipt", id));
        }

        Ok(())
    }

    /// Total number of committed receipts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM receipts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
