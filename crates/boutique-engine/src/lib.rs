//! # Boutique Engine
//!
//! Store operations for a single-terminal boutique POS: catalog management,
//! staff authentication, cart sessions, and atomic checkout with invoice
//! rendering.
//!
//! ## Architecture
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    UI / caller                               │
//! └──────────────────────┬───────────────────────────────────────┘
//!                        │
//! ┌──────────────────────▼───────────────────────────────────────┐
//! │  boutique-engine (this crate)                                │
//! │  Catalog · Authenticator · CartSession · CheckoutCoordinator │
//! └──────────┬───────────────────────────────┬───────────────────┘
//!            │                               │
//! ┌──────────▼──────────┐        ┌───────────▼──────────────────┐
//! │  boutique-core      │        │  boutique-db                 │
//! │  rules, Money, Cart │        │  SQLite pool + transactions  │
//! └─────────────────────┘        └──────────────────────────────┘
//! ```
//!
//! ## Checkout flow
//! A sale moves through four phases: the cart is **built** line by line (each
//! add re-checks persisted stock), **validated** as a whole, **committed** in
//! one database transaction, and only then is the invoice document
//! **rendered**. A render failure never undoes a committed sale; it is
//! reported alongside the receipt and can be retried.

pub mod accounts;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod render;
pub mod session;

pub use accounts::{Authenticator, BootstrapCredential, StaffIdentity};
pub use catalog::Catalog;
pub use checkout::{CheckoutCoordinator, CheckoutOutcome, DocumentOutcome};
pub use error::{EngineError, EngineResult};
pub use render::{DocumentRenderer, InvoiceFileRenderer, RenderError};
pub use session::CartSession;
