//! Password hashing with bcrypt over a fixed-size digest.
//!
//! bcrypt only considers the first 72 bytes of its input, so secrets are
//! first reduced to a sha256 digest and base64-encoded (bcrypt also stops at
//! the first null byte, which the raw digest may contain).

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// bcrypt work factor used for stored hashes.
pub const DEFAULT_HASH_COST: u32 = 12;

/// Errors that can occur while hashing a password.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Failed to hash password.
    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// Reduces a secret of arbitrary length to a fixed-size, null-free input
/// for bcrypt.
fn prepare(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    BASE64.encode(digest)
}

/// Hashes a password with the default work factor.
///
/// # Errors
///
/// Returns `PasswordError::Hash` if the underlying hash fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_password_with_cost(password, DEFAULT_HASH_COST)
}

/// Hashes a password with an explicit bcrypt work factor.
///
/// # Errors
///
/// Returns `PasswordError::Hash` if the underlying hash fails.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, PasswordError> {
    bcrypt::hash(prepare(password), cost).map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verifies a password against a stored hash.
///
/// Uses bcrypt's own constant-time check. A malformed stored hash verifies as
/// `false` rather than surfacing an error to the caller.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    bcrypt::verify(prepare(password), stored_hash).unwrap_or(false)
}
