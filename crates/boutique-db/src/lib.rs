//! # boutique-db: Database Layer
//!
//! SQLite persistence for the boutique engine, built on sqlx.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repositories (products, accounts, receipts) and the
//!   atomic checkout commit
//!
//! ## Usage
//!
//! ```rust,ignore
//! use boutique_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./boutique.db")).await?;
//!
//! let shirt = db.products().insert("Kids T-Shirt (Blue)", 15_000, 25).await?;
//! let all = db.products().list().await?;
//! ```
//!
//! The one invariant this crate owes the rest of the system: a checkout is
//! all-or-nothing. [`repository::checkout::CheckoutRepository::commit`] runs
//! the receipt insert, line inserts, and stock decrements in one SQLite
//! transaction, and the receipt number is derived inside that same
//! transaction.

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::account::AccountRepository;
pub use repository::checkout::{CheckoutError, CheckoutRepository, CommittedSale};
pub use repository::product::ProductRepository;
pub use repository::receipt::{ReceiptRepository, DEFAULT_HISTORY_LIMIT};
