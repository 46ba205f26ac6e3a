//! JWT token issuing and verification.
//!
//! Tokens are HS256-signed assertions of an account email with a short
//! lifetime (10 minutes by default). Verification checks the signature first,
//! then the expiry; a failed verification never exposes partial payload.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::auth::Claims;

/// Default token lifetime in minutes.
pub const DEFAULT_TOKEN_LIFETIME_MINUTES: i64 = 10;

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    Encoding(String),

    /// Token signature is valid but the token has expired.
    #[error("token has expired")]
    Expired,

    /// Token is absent, malformed, or carries a bad signature.
    #[error("invalid token")]
    Invalid,
}

/// Token service for issuing and verifying signed identity assertions.
#[derive(Clone)]
pub struct TokenService {
    lifetime_minutes: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("lifetime_minutes", &self.lifetime_minutes)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl TokenService {
    /// Creates a new token service from the process-wide signing secret.
    #[must_use]
    pub fn new(secret: &str, lifetime_minutes: i64) -> Self {
        Self {
            lifetime_minutes,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a signed token for an account email.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if token generation fails.
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        self.issue_with_lifetime(email, self.lifetime_minutes)
    }

    /// Issues a token with an explicit lifetime in minutes.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if token generation fails.
    pub fn issue_with_lifetime(
        &self,
        email: &str,
        lifetime_minutes: i64,
    ) -> Result<String, TokenError> {
        let expires_at = Utc::now() + Duration::minutes(lifetime_minutes);
        let claims = Claims::new(email, expires_at);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verifies a token and returns the asserted account email.
    ///
    /// An absent token is treated the same as a malformed one. Expiry is
    /// enforced exactly: a token is rejected the moment `exp` passes.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` if the signature is valid but the
    /// lifetime has elapsed, `TokenError::Invalid` for any other failure.
    pub fn verify(&self, token: Option<&str>) -> Result<String, TokenError> {
        let token = token.ok_or(TokenError::Invalid)?;
        let mut validation = Validation::default();
        // No clock-skew allowance on expiry.
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.sub)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> TokenService {
        TokenService::new("test-secret-key-for-testing", DEFAULT_TOKEN_LIFETIME_MINUTES)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = create_test_service();

        let token = service.issue("alice@example.com").unwrap();
        let email = service.verify(Some(&token)).unwrap();

        assert_eq!(email, "alice@example.com");
    }

    #[test]
    fn test_expired_token() {
        let service = create_test_service();

        let token = service
            .issue_with_lifetime("alice@example.com", -5)
            .unwrap();

        assert!(matches!(
            service.verify(Some(&token)),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_token_just_past_expiry_is_expired() {
        let service = create_test_service();

        // Seconds past expiry, well inside any clock-skew leeway window.
        let expires_at = Utc::now() - Duration::seconds(5);
        let claims = Claims::new("alice@example.com", expires_at);
        let token = encode(&Header::default(), &claims, &service.encoding_key).unwrap();

        assert!(matches!(
            service.verify(Some(&token)),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        let service = create_test_service();
        assert!(matches!(
            service.verify(Some("not.a.token")),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_absent_token_is_invalid() {
        let service = create_test_service();
        assert!(matches!(service.verify(None), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let service = create_test_service();
        let other = TokenService::new("a-different-secret", DEFAULT_TOKEN_LIFETIME_MINUTES);

        let token = service.issue("alice@example.com").unwrap();
        assert!(matches!(
            other.verify(Some(&token)),
            Err(TokenError::Invalid)
        ));
    }
}
