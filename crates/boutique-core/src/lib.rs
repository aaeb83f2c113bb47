//! # boutique-core: Pure Business Logic for the Boutique Engine
//!
//! This crate contains the domain model of the inventory-and-checkout engine
//! as pure types and functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  UI / form layer (external collaborator)                         │
//! │        │                                                         │
//! │        ▼                                                         │
//! │  boutique-engine   Catalog, Authenticator, CheckoutCoordinator   │
//! │        │                                                         │
//! │        ▼                                                         │
//! │  ★ boutique-core (THIS CRATE) ★                                  │
//! │    types • money • cart • validation • error                     │
//! │    NO I/O • NO DATABASE • PURE FUNCTIONS                         │
//! │        │                                                         │
//! │        ▼                                                         │
//! │  boutique-db       SQLite pool, repositories, migrations         │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Integer money**: every price is a whole number of currency minor
//!    units (`i64`), never a float.
//! 2. **Snapshot fields**: a [`cart::CartLine`] freezes the product name and
//!    unit price at add time; a [`types::ReceiptLine`] freezes them at commit
//!    time, so later catalog edits cannot rewrite history.
//! 3. **Explicit errors**: all failures are typed enum variants, never
//!    strings or panics.

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartLine};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::{Account, Product, Receipt, ReceiptLine};

/// Default low-stock threshold for the dashboard report.
///
/// A product with `quantity` strictly below this value counts as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Maximum quantity of a single product per cart line.
///
/// Guards against fat-finger entries (1000 instead of 10) long before the
/// stock check would reject them.
pub const MAX_LINE_QUANTITY: i64 = 999;
