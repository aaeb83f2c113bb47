//! # Database Error Types
//!
//! ## Error Flow
//! ```text
//! sqlx::Error  ──►  DbError (this module)  ──►  EngineError (boutique-engine)
//! ```
//!
//! Constraint violations get their own variants because the engine treats
//! them as domain events: a UNIQUE failure on `accounts.username` becomes
//! `DuplicateUsername`, a CHECK failure on `products.quantity` means a write
//! tried to break the stock invariant.

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// UNIQUE constraint violation. `field` is the `table.column` reported
    /// by SQLite.
    #[error("duplicate {field}")]
    UniqueViolation { field: String },

    /// CHECK constraint violation, e.g. a write that would make
    /// `products.quantity` negative.
    #[error("check constraint violated: {constraint}")]
    CheckViolation { constraint: String },

    /// Foreign key constraint violation.
    #[error("foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Could not open or connect to the database.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed on startup.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed for some other reason.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Anything else.
    #[error("internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DbError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Maps sqlx errors onto [`DbError`].
///
/// SQLite reports constraint failures only through the message text:
/// `UNIQUE constraint failed: accounts.username`,
/// `CHECK constraint failed: quantity`,
/// `FOREIGN KEY constraint failed`.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "record",
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                    }
                } else if let Some(constraint) = msg.strip_prefix("CHECK constraint failed: ") {
                    DbError::CheckViolation {
                        constraint: constraint.to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
