//! # Authenticator
//!
//! Staff registration and login.
//!
//! Two kinds of identity can sign in:
//! - the **bootstrap owner**, a fixed credential held outside the accounts
//!   table so the store is usable before any staff account exists;
//! - **staff accounts**, stored with argon2 password hashes.
//!
//! The bootstrap credential is checked first, and its username is reserved:
//! registering it is a duplicate even with an empty accounts table.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use boutique_core::{validation, Account};
use boutique_db::{AccountRepository, Database, DbError};

/// The out-of-band owner credential.
#[derive(Debug, Clone)]
pub struct BootstrapCredential {
    pub username: String,
    pub password: String,
}

impl Default for BootstrapCredential {
    fn default() -> Self {
        BootstrapCredential {
            username: "owner".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// Who just signed in.
#[derive(Debug, Clone)]
pub enum StaffIdentity {
    /// The bootstrap owner; has no row in the accounts table.
    Owner,
    /// A registered staff member.
    Staff(Account),
}

/// Registration and login over the account directory.
#[derive(Debug, Clone)]
pub struct Authenticator {
    accounts: AccountRepository,
    bootstrap: BootstrapCredential,
}

impl Authenticator {
    pub fn new(db: &Database) -> Self {
        Authenticator {
            accounts: db.accounts(),
            bootstrap: BootstrapCredential::default(),
        }
    }

    pub fn with_bootstrap(db: &Database, bootstrap: BootstrapCredential) -> Self {
        Authenticator {
            accounts: db.accounts(),
            bootstrap,
        }
    }

    /// Registers a staff account. The password is hashed before storage;
    /// plaintext never reaches the database layer.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        full_name: &str,
        email: &str,
    ) -> EngineResult<Account> {
        let username = validation::validate_username(username)?;
        validation::validate_password(password)?;
        let full_name = validation::validate_full_name(full_name)?;
        let email = validation::validate_email(email)?;

        if username == self.bootstrap.username {
            return Err(EngineError::DuplicateUsername(username));
        }

        let hash = hash_password(password)?;

        match self.accounts.insert(&username, &hash, &full_name, &email).await {
            Ok(account) => {
                info!(username = %account.username, "staff account registered");
                Ok(account)
            }
            Err(DbError::UniqueViolation { .. }) => Err(EngineError::DuplicateUsername(username)),
            Err(e) => Err(e.into()),
        }
    }

    /// Verifies a credential pair. Unknown usernames and wrong passwords are
    /// indistinguishable to the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> EngineResult<StaffIdentity> {
        if username == self.bootstrap.username && password == self.bootstrap.password {
            info!("owner signed in via bootstrap credential");
            return Ok(StaffIdentity::Owner);
        }

        let account = match self.accounts.get_by_username(username).await? {
            Some(account) => account,
            None => {
                warn!(username = %username, "login attempt for unknown username");
                return Err(EngineError::InvalidCredentials);
            }
        };

        if verify_password(password, &account.password) {
            info!(username = %account.username, "staff member signed in");
            Ok(StaffIdentity::Staff(account))
        } else {
            warn!(username = %username, "login attempt with wrong password");
            Err(EngineError::InvalidCredentials)
        }
    }
}

fn hash_password(password: &str) -> EngineResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| EngineError::Internal(format!("password hashing failed: {e}")))
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
