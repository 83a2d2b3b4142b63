//! Password hashing using argon2
//!
//! Provides secure password hashing and verification.
//!
//! # Performance Considerations
//!
//! Argon2 is intentionally CPU-intensive. Request handlers use the `_async`
//! variants, which run on the blocking thread pool.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::OnceLock;
use tracing::debug;

/// Stand-in hash verified when an account does not exist
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Password hashing service
///
/// New hashes use Argon2id in PHC string format, so the algorithm, cost
/// parameters and salt travel with the hash. Verification also accepts
/// bcrypt hashes carried over from earlier deployments.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using argon2 (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Malformed hashes never match.
    pub fn verify(password: &str, hash: &str) -> bool {
        if is_bcrypt_hash(hash) {
            return bcrypt::verify(password, hash).unwrap_or_else(|e| {
                debug!(error = %e, "Stored bcrypt hash could not be parsed");
                false
            });
        }

        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                debug!(error = %e, "Stored password hash could not be parsed");
                false
            }
        }
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }

    /// Run a full verification that can never succeed
    ///
    /// Used when the account does not exist. Always returns `false`.
    pub async fn verify_dummy_async(password: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || {
            let hash = dummy_hash();
            Self::verify(&password, hash);
            false
        })
        .await
        .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }
}

fn dummy_hash() -> &'static str {
    DUMMY_HASH.get_or_init(|| PasswordService::hash("no-account-dummy-password").unwrap_or_default())
}

fn is_bcrypt_hash(hash: &str) -> bool {
    ["$2a$", "$2b$", "$2y$"]
        .iter()
        .any(|prefix| hash.starts_with(prefix))
}
