//! # Checkout Coordinator
//!
//! Drives a staged cart through the rest of the sale:
//!
//! ```text
//! Building ──> Validating ──> Committing ──> Committed
//!                  │               │             │
//!                  └──── Failed ◄──┘             ▼
//!                    (cart kept)           render invoice
//!                                        (failure reported,
//!                                         sale stays committed)
//! ```
//!
//! The commit happens **before** rendering. A sale is final the moment the
//! database transaction commits; producing the customer document is a
//! best-effort step whose failure is reported in the outcome and can be
//! retried later. On any commit failure the cart is left untouched so the
//! operator can adjust and retry.

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::render::DocumentRenderer;
use boutique_core::{Cart, Receipt, ReceiptLine};
use boutique_db::{CheckoutRepository, Database, ProductRepository, ReceiptRepository};

/// How the invoice document came out of a committed sale.
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    /// Rendered and recorded; holds the document reference.
    Rendered(String),
    /// Rendering or recording failed; the sale itself is committed.
    Failed(String),
}

impl DocumentOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, DocumentOutcome::Rendered(_))
    }
}

/// A completed checkout: the committed receipt, its snapshot lines, and the
/// fate of the invoice document.
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub receipt: Receipt,
    pub lines: Vec<ReceiptLine>,
    pub document: DocumentOutcome,
}

/// Orchestrates commit and rendering for one store.
pub struct CheckoutCoordinator<R: DocumentRenderer> {
    checkout: CheckoutRepository,
    products: ProductRepository,
    receipts: ReceiptRepository,
    renderer: R,
}

impl<R: DocumentRenderer> CheckoutCoordinator<R> {
    pub fn new(db: &Database, renderer: R) -> Self {
        CheckoutCoordinator {
            checkout: db.checkout(),
            products: db.products(),
            receipts: db.receipts(),
            renderer,
        }
    }

    /// Commits the cart as one sale, then renders its invoice.
    ///
    /// On success the cart is cleared and the outcome carries the receipt
    /// plus the document's fate. On failure the cart is unchanged and no
    /// database state was modified.
    pub async fn checkout(&self, cart: &mut Cart) -> EngineResult<CheckoutOutcome> {
        if cart.is_empty() {
            return Err(EngineError::EmptyCart);
        }

        // Validate against a fresh read of every staged product. Catches
        // stock that shrank since staging without opening a transaction.
        self.validate(cart).await?;

        // Commit. The transaction re-checks stock line by line; its verdict
        // supersedes anything the validation pass just observed, because the
        // gap between the two is still a race window. A storage fault here
        // means the transaction rolled back and the identical cart can be
        // retried.
        let sale = self
            .checkout
            .commit(cart.lines())
            .await
            .map_err(|e| match e {
                boutique_db::CheckoutError::Db(db) => EngineError::CommitFailed(db.to_string()),
                other => other.into(),
            })?;
        cart.clear();

        let document = self.render_and_record(&sale.receipt, &sale.lines).await;

        Ok(CheckoutOutcome {
            receipt: sale.receipt,
            lines: sale.lines,
            document,
        })
    }

    /// Rejects the cart if any product vanished or can no longer cover the
    /// cart's total staged quantity for it. Advisory; the commit transaction
    /// repeats the check authoritatively.
    async fn validate(&self, cart: &Cart) -> EngineResult<()> {
        let mut seen: Vec<i64> = Vec::new();

        for line in cart.lines() {
            if seen.contains(&line.product_id) {
                continue;
            }
            seen.push(line.product_id);

            let product = self
                .products
                .get_by_id(line.product_id)
                .await?
                .ok_or(EngineError::NotFound {
                    entity: "product",
                    id: line.product_id,
                })?;

            let staged = cart.staged_quantity(line.product_id);
            if product.quantity < staged {
                return Err(EngineError::InsufficientStock {
                    product_id: product.id,
                    product_name: product.name,
                    available: product.quantity,
                    requested: staged,
                });
            }
        }

        Ok(())
    }

    /// Re-renders the invoice for an already committed receipt, e.g. after a
    /// checkout whose document step failed.
    pub async fn retry_render(&self, receipt_id: i64) -> EngineResult<String> {
        let (receipt, lines) = self
            .receipts
            .get_with_lines(receipt_id)
            .await?
            .ok_or(EngineError::NotFound {
                entity: "receipt",
                id: receipt_id,
            })?;

        match self.render_and_record(&receipt, &lines).await {
            DocumentOutcome::Rendered(reference) => Ok(reference),
            DocumentOutcome::Failed(reason) => Err(EngineError::RenderFailed(reason)),
        }
    }

    async fn render_and_record(&self, receipt: &Receipt, lines: &[ReceiptLine]) -> DocumentOutcome {
        let reference = match self.renderer.render(receipt, lines) {
            Ok(reference) => reference,
            Err(e) => {
                warn!(receipt = receipt.number, error = %e, "invoice rendering failed");
                return DocumentOutcome::Failed(e.to_string());
            }
        };

        if let Err(e) = self
            .receipts
            .set_document_reference(receipt.id, &reference)
            .await
        {
            warn!(receipt = receipt.number, error = %e, "failed to record document reference");
            return DocumentOutcome::Failed(e.to_string());
        }

        info!(receipt = receipt.number, reference = %reference, "invoice rendered");
        DocumentOutcome::Rendered(reference)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderError;
    use boutique_db::DbConfig;

    /// Renderer that always fails, for exercising the committed-but-unrendered path.
    struct BrokenRenderer;

    impl DocumentRenderer for BrokenRenderer {
        fn render(&self, _: &Receipt, _: &[ReceiptLine]) -> Result<String, RenderError> {
            Err(RenderError::Other("printer on fire".to_string()))
        }
    }

    /// Renderer that succeeds without touching the filesystem.
    struct StubRenderer;

    impl DocumentRenderer for StubRenderer {
        fn render(&self, receipt: &Receipt, _: &[ReceiptLine]) -> Result<String, RenderError> {
            Ok(format!("stub://invoice/{}", receipt.number))
        }
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let db = db().await;
        let coordinator = CheckoutCoordinator::new(&db, StubRenderer);

        let mut cart = Cart::new();
        let err = coordinator.checkout(&mut cart).await.unwrap_err();
        assert!(matches!(err, EngineError::EmptyCart));
    }

    #[tokio::test]
    async fn test_successful_checkout_records_reference_and_clears_cart() {
        let db = db().await;
        let product = db.products().insert("Kids Dress", 35_000, 15).await.unwrap();
        let coordinator = CheckoutCoordinator::new(&db, StubRenderer);

        let mut cart = Cart::new();
        cart.stage(boutique_core::CartLine::from_product(&product, 2));

        let outcome = coordinator.checkout(&mut cart).await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(outcome.receipt.number, 1);
        assert!(matches!(outcome.document, DocumentOutcome::Rendered(ref r) if r == "stub://invoice/1"));

        let stored = db.receipts().get_by_id(outcome.receipt.id).await.unwrap().unwrap();
        assert_eq!(stored.document_reference.as_deref(), Some("stub://invoice/1"));
    }

    #[tokio::test]
    async fn test_render_failure_keeps_sale_and_allows_retry() {
        let db = db().await;
        let product = db.products().insert("Kids Jacket", 45_000, 5).await.unwrap();

        let broken = CheckoutCoordinator::new(&db, BrokenRenderer);
        let mut cart = Cart::new();
        cart.stage(boutique_core::CartLine::from_product(&product, 1));

        let outcome = broken.checkout(&mut cart).await.unwrap();
        assert!(matches!(outcome.document, DocumentOutcome::Failed(_)));

        // Sale committed despite the failed document: stock moved, reference empty.
        let remaining = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(remaining.quantity, 4);
        let stored = db.receipts().get_by_id(outcome.receipt.id).await.unwrap().unwrap();
        assert!(stored.document_reference.is_none());

        // A working renderer can complete the document later.
        let working = CheckoutCoordinator::new(&db, StubRenderer);
        let reference = working.retry_render(outcome.receipt.id).await.unwrap();
        assert_eq!(reference, "stub://invoice/1");

        let stored = db.receipts().get_by_id(outcome.receipt.id).await.unwrap().unwrap();
        assert_eq!(stored.document_reference.as_deref(), Some("stub://invoice/1"));
    }

    #[tokio::test]
    async fn test_failed_commit_preserves_cart() {
        let db = db().await;
        let product = db.products().insert("Baby Romper", 25_000, 8).await.unwrap();
        let coordinator = CheckoutCoordinator::new(&db, StubRenderer);

        let mut cart = Cart::new();
        cart.stage(boutique_core::CartLine::from_product(&product, 5));

        // Stock shrinks between staging and checkout.
        db.products().update(product.id, "Baby Romper", 25_000, 3).await.unwrap();

        let err = coordinator.checkout(&mut cart).await.unwrap_err();
        assert!(matches!(err, EngineError::InsufficientStock { available: 3, requested: 5, .. }));

        // Cart kept for the operator to adjust; nothing was sold.
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(db.receipts().count().await.unwrap(), 0);
    }

    /// Full flow: register staff, sign in, build a catalog, stage a cart,
    /// check out, and find the invoice on disk.
    #[tokio::test]
    async fn test_end_to_end_sale() {
        use crate::accounts::{Authenticator, StaffIdentity};
        use crate::catalog::Catalog;
        use crate::render::InvoiceFileRenderer;
        use crate::session::CartSession;

        let db = db().await;

        let auth = Authenticator::new(&db);
        auth.register("joanah", "boutique123", "Joanah Nakato", "joanah@boutique.ug")
            .await
            .unwrap();
        let identity = auth.authenticate("joanah", "boutique123").await.unwrap();
        assert!(matches!(identity, StaffIdentity::Staff(_)));

        let catalog = Catalog::new(&db);
        let shirt = catalog
            .create_product("Kids T-Shirt (Blue)", 15_000, 25)
            .await
            .unwrap();
        catalog.create_product("Kids Socks", 5_000, 30).await.unwrap();

        let mut session = CartSession::new(&db);
        session.add_line(shirt.id, 5).await.unwrap();
        assert_eq!(session.total(), boutique_core::Money::from_minor(75_000));

        let dir = tempfile::tempdir().unwrap();
        let coordinator = CheckoutCoordinator::new(&db, InvoiceFileRenderer::new(dir.path()));

        let outcome = coordinator.checkout(session.cart_mut()).await.unwrap();
        assert_eq!(outcome.receipt.number, 1);
        assert_eq!(outcome.receipt.total, 75_000);
        assert!(session.is_empty());

        let DocumentOutcome::Rendered(path) = outcome.document else {
            panic!("expected rendered invoice");
        };
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Invoice #: 00001"));
        assert!(text.contains("Kids T-Shirt (Blue)"));
        assert!(text.contains("UGX 75,000"));

        // Stock moved and the dashboard reflects it.
        assert_eq!(catalog.get_product(shirt.id).await.unwrap().quantity, 20);
        assert_eq!(db.receipts().next_number().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_retry_render_unknown_receipt() {
        let db = db().await;
        let coordinator = CheckoutCoordinator::new(&db, StubRenderer);

        let err = coordinator.retry_render(99).await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound { entity: "receipt", id: 99 }));
    }
}
