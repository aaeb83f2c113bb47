//! # Cart Module
//!
//! The session-local staging area for a sale in progress.
//!
//! ## Lifecycle
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  stage(line)  ──►  [CartLine, CartLine, ...]  ──►  checkout        │
//! │                          │                            │            │
//! │  remove_line(i) ◄────────┘                            ▼            │
//! │  clear()                                 Receipt + ReceiptLines    │
//! │                                          (cart cleared on commit)  │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is pure data: it never touches the database or product stock.
//! Stock is *read* when a line is staged (by the engine's `CartSession`) and
//! *changed* only inside the checkout transaction. The cart is never
//! persisted; it dies with the session, on `clear`, or on a successful
//! commit.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;

/// One staged selection: a product reference plus a frozen price snapshot.
///
/// The snapshot means a price edit between staging and checkout does not
/// silently change what the customer is charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: i64,

    /// Name at staging time (frozen).
    pub product_name: String,

    /// Unit price at staging time (frozen), minor units.
    pub unit_price: i64,

    /// Units selected. Always positive.
    pub quantity: i64,
}

impl CartLine {
    /// Snapshots a product into a cart line. Quantity validation happens
    /// before this is called.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id,
            product_name: product.name.clone(),
            unit_price: product.price,
            quantity,
        }
    }

    /// unit_price × quantity, minor units.
    #[inline]
    pub fn subtotal(&self) -> i64 {
        self.unit_price * self.quantity
    }

    #[inline]
    pub fn subtotal_money(&self) -> Money {
        Money::from_minor(self.subtotal())
    }
}

/// An ordered sequence of staged lines.
///
/// Lines are kept in insertion order and are NOT merged when the same
/// product is staged twice; `remove_line` is index-based, matching how the
/// sale screen lists them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Appends a staged line.
    pub fn stage(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// Removes the line at `index`, returning it.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<CartLine> {
        if index >= self.lines.len() {
            return Err(CoreError::LineOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }

    /// Discards all staged lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Units of `product_id` already staged, across all lines.
    ///
    /// Used by add-time validation so two lines for the same product cannot
    /// together overshoot the stock that was available when they were added.
    pub fn staged_quantity(&self, product_id: i64) -> i64 {
        self.lines
            .iter()
            .filter(|l| l.product_id == product_id)
            .map(|l| l.quantity)
            .sum()
    }

    /// Σ line subtotals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal_money).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: i64, price: i64) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            price,
            quantity: 25,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_stage_and_total() {
        let mut cart = Cart::new();
        cart.stage(CartLine::from_product(&product(1, 15_000), 2));
        cart.stage(CartLine::from_product(&product(2, 35_000), 1));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total().minor(), 65_000);
    }

    #[test]
    fn test_same_product_keeps_separate_lines() {
        let mut cart = Cart::new();
        let p = product(1, 15_000);
        cart.stage(CartLine::from_product(&p, 2));
        cart.stage(CartLine::from_product(&p, 3));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.staged_quantity(1), 5);
        assert_eq!(cart.staged_quantity(99), 0);
    }

    #[test]
    fn test_remove_line() {
        let mut cart = Cart::new();
        cart.stage(CartLine::from_product(&product(1, 15_000), 2));
        cart.stage(CartLine::from_product(&product(2, 35_000), 1));

        let removed = cart.remove_line(0).unwrap();
        assert_eq!(removed.product_id, 1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total().minor(), 35_000);

        let err = cart.remove_line(5).unwrap_err();
        assert!(matches!(err, CoreError::LineOutOfRange { index: 5, len: 1 }));
    }

    #[test]
    fn test_price_snapshot_survives_product_edit() {
        let mut cart = Cart::new();
        let mut p = product(1, 15_000);
        cart.stage(CartLine::from_product(&p, 1));

        // Catalog price changes after staging.
        p.price = 99_000;

        assert_eq!(cart.total().minor(), 15_000);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.stage(CartLine::from_product(&product(1, 15_000), 2));
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total().minor(), 0);
    }
}
