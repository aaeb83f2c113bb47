//! # Account Repository
//!
//! Staff account storage. Passwords arrive here already hashed (the engine's
//! authenticator owns hashing and verification); this layer only stores and
//! retrieves the opaque hash string.
//!
//! Uniqueness of usernames is enforced by the UNIQUE constraint on the table,
//! not by a read-then-write check, so concurrent registrations of the same
//! name cannot both succeed.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use boutique_core::Account;

/// Repository for staff account operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        AccountRepository { pool }
    }

    /// Inserts a new account and returns it with its assigned id.
    ///
    /// A duplicate username surfaces as [`crate::DbError::UniqueViolation`]
    /// with `field == "accounts.username"`.
    pub async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        full_name: &str,
        email: &str,
    ) -> DbResult<Account> {
        debug!(username = %username, "inserting account");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO accounts (username, password, full_name, email, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(full_name)
        .bind(email)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Account {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            password: password_hash.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            created_at: now,
        })
    }

    /// Looks up an account by exact username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, username, password, full_name, email, created_at
            FROM accounts
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Total number of registered accounts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
