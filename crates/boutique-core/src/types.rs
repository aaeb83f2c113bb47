//! # Domain Types
//!
//! Persisted entity types for the boutique engine.
//!
//! ## Type Overview
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────────┐
//! │   Product    │    │   Receipt    │1──N│   ReceiptLine    │
//! │ ────────────│    │ ────────────│    │ ────────────────│
//! │ id           │    │ id           │    │ product_id       │
//! │ name         │    │ number       │    │ product_name ◄───┼── snapshot
//! │ price        │    │ total        │    │ price        ◄───┼── snapshot
//! │ quantity     │    │ document_ref │    │ quantity         │
//! └──────────────┘    └──────────────┘    │ subtotal         │
//!                                         └──────────────────┘
//! ┌──────────────┐
//! │   Account    │  registered staff; username unique and immutable
//! └──────────────┘
//! ```
//!
//! A `ReceiptLine` references its `Product` by id but carries its own copy of
//! the name and price, so editing or deleting the product later cannot alter
//! what a historical receipt says was sold.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog entry with live stock.
///
/// Invariants (enforced by validation on the way in and by CHECK constraints
/// in storage): `price > 0`, `quantity >= 0` at all times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Stable identity, assigned by storage on creation.
    pub id: i64,

    /// Display name shown to staff and on receipts.
    pub name: String,

    /// Unit price in currency minor units. Always positive.
    pub price: i64,

    /// Units currently in stock. Never negative.
    pub quantity: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as [`Money`].
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_minor(self.price)
    }

    /// Value of the stock on hand: price × quantity.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.unit_price().times(self.quantity)
    }

    /// Whether `requested` units can currently be sold.
    #[inline]
    pub fn can_sell(&self, requested: i64) -> bool {
        requested > 0 && requested <= self.quantity
    }
}

// =============================================================================
// Account
// =============================================================================

/// A registered staff account.
///
/// Created once via registration and never updated by this engine. The
/// bootstrap owner credential is NOT an `Account`; it lives outside the
/// directory entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Account {
    pub id: i64,

    /// Unique, immutable login name.
    pub username: String,

    /// Opaque credential in PHC string format. Never a clear-text password.
    #[serde(skip_serializing)]
    pub password: String,

    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Receipt
// =============================================================================

/// An immutable record of a completed sale.
///
/// `number` is assigned inside the commit transaction as
/// `MAX(existing) + 1`, so the sequence is strictly increasing, 1-based, and
/// gapless. `document_reference` is filled in only after the external
/// renderer produced an artifact; a receipt with `None` is still a real,
/// committed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Receipt {
    pub id: i64,

    /// Human-facing sequential receipt number, 1-based.
    pub number: i64,

    /// Sum of line subtotals, in minor units.
    pub total: i64,

    /// Path or identifier of the rendered document, once rendering succeeds.
    pub document_reference: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Receipt {
    #[inline]
    pub fn total_money(&self) -> Money {
        Money::from_minor(self.total)
    }
}

// =============================================================================
// Receipt Line
// =============================================================================

/// One sold product on a receipt, snapshotted at the moment of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ReceiptLine {
    pub id: i64,
    pub receipt_id: i64,

    /// The product sold. Kept for traceability only; the snapshot columns
    /// below are authoritative for what the customer was charged.
    pub product_id: i64,

    /// Product name at time of sale (frozen).
    pub product_name: String,

    /// Unit price at time of sale (frozen), minor units.
    pub price: i64,

    /// Units sold.
    pub quantity: i64,

    /// price × quantity, minor units.
    pub subtotal: i64,
}

impl ReceiptLine {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_minor(self.price)
    }

    #[inline]
    pub fn subtotal_money(&self) -> Money {
        Money::from_minor(self.subtotal)
    }
}
