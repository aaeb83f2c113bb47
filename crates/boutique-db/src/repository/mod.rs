//! # Repository Module
//!
//! Each repository wraps one table (or, for checkout, one transaction) behind
//! a typed API, keeping SQL out of the engine layer.
//!
//! - [`product::ProductRepository`] - catalog CRUD and aggregates
//! - [`account::AccountRepository`] - staff credential storage
//! - [`receipt::ReceiptRepository`] - committed receipt queries
//! - [`checkout::CheckoutRepository`] - the atomic sale commit

pub mod account;
pub mod checkout;
pub mod product;
pub mod receipt;
