//! Token claims asserting a verified identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT claims for access tokens.
///
/// Accounts are keyed by email, so the subject claim carries the email
/// directly. Tokens are stateless: possession proves a recent successful
/// authentication, and there is no server-side revocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account email).
    pub sub: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for an account.
    #[must_use]
    pub fn new(email: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: email.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }
}
