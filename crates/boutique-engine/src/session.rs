//! # Cart Session
//!
//! One terminal's in-progress sale. Wraps the pure [`Cart`] with persisted
//! stock checks: every `add_line` re-reads the product row and counts what
//! the cart has already staged for it, so a cart can never stage more of a
//! product than the store currently holds.
//!
//! This is the *staging-time* check. The authoritative check happens again
//! inside the checkout transaction, because another terminal may sell the
//! same stock between staging and commit.

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use boutique_core::{validation, Cart, CartLine, Money};
use boutique_db::{Database, ProductRepository};

/// A cart bound to live catalog stock.
#[derive(Debug)]
pub struct CartSession {
    products: ProductRepository,
    cart: Cart,
}

impl CartSession {
    pub fn new(db: &Database) -> Self {
        CartSession {
            products: db.products(),
            cart: Cart::new(),
        }
    }

    /// Stages `quantity` units of a product. Fails without changing the cart
    /// if the product is unknown or the store cannot cover the cart's total
    /// staged quantity for it.
    pub async fn add_line(&mut self, product_id: i64, quantity: i64) -> EngineResult<()> {
        validation::validate_sale_quantity(quantity)?;

        let product = self
            .products
            .get_by_id(product_id)
            .await?
            .ok_or(EngineError::NotFound {
                entity: "product",
                id: product_id,
            })?;

        let already_staged = self.cart.staged_quantity(product_id);
        let requested = already_staged + quantity;

        if product.quantity < requested {
            return Err(EngineError::InsufficientStock {
                product_id,
                product_name: product.name,
                available: product.quantity,
                requested,
            });
        }

        debug!(product_id, quantity, "line staged");
        self.cart.stage(CartLine::from_product(&product, quantity));
        Ok(())
    }

    /// Removes one line by display index and returns it.
    pub fn remove_line(&mut self, index: usize) -> EngineResult<CartLine> {
        Ok(self.cart.remove_line(index)?)
    }

    pub fn clear(&mut self) {
        self.cart.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// The underlying cart, for handing to the checkout coordinator.
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use boutique_db::DbConfig;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_line_checks_persisted_stock() {
        let db = db().await;
        db.products().insert("Kids T-Shirt (Blue)", 15_000, 25).await.unwrap();

        let mut session = CartSession::new(&db);

        // Asking for more than the store holds fails and leaves the cart empty.
        let err = session.add_line(1, 30).await.unwrap_err();
        match err {
            EngineError::InsufficientStock {
                available,
                requested,
                ..
            } => {
                assert_eq!(available, 25);
                assert_eq!(requested, 30);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
        assert!(session.is_empty());

        session.add_line(1, 5).await.unwrap();
        assert_eq!(session.total(), Money::from_minor(75_000));
    }

    #[tokio::test]
    async fn test_staged_quantity_counts_across_lines() {
        let db = db().await;
        db.products().insert("Kids Dress", 35_000, 15).await.unwrap();

        let mut session = CartSession::new(&db);
        session.add_line(1, 10).await.unwrap();

        // 10 already staged; 6 more would exceed the 15 in stock.
        let err = session.add_line(1, 6).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::InsufficientStock { requested: 16, available: 15, .. }
        ));

        // 5 more exactly exhausts the stock.
        session.add_line(1, 5).await.unwrap();
        assert_eq!(session.lines().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_product_and_bad_quantity() {
        let db = db().await;
        let mut session = CartSession::new(&db);

        let err = session.add_line(99, 1).await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound { entity: "product", id: 99 }));

        db.products().insert("Kids Socks", 5_000, 30).await.unwrap();
        let err = session.add_line(1, 0).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[tokio::test]
    async fn test_remove_line() {
        let db = db().await;
        db.products().insert("Kids Shorts", 12_000, 20).await.unwrap();
        db.products().insert("Kids Socks", 5_000, 30).await.unwrap();

        let mut session = CartSession::new(&db);
        session.add_line(1, 2).await.unwrap();
        session.add_line(2, 3).await.unwrap();

        let removed = session.remove_line(0).unwrap();
        assert_eq!(removed.product_name, "Kids Shorts");
        assert_eq!(session.lines().len(), 1);
        assert_eq!(session.total(), Money::from_minor(15_000));

        let err = session.remove_line(5).unwrap_err();
        assert!(matches!(err, EngineError::LineOutOfRange { index: 5, len: 1 }));
    }
}
