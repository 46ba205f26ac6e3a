//! Application-wide error types.
//!
//! The 4xx variants carry the fixed, user-visible messages the API has always
//! returned; the 5xx variants carry internal detail that must not be echoed to
//! clients verbatim.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed request that never reaches the ledger.
    #[error("{0}")]
    Validation(String),

    /// Registration with an email that is already taken.
    #[error("User with this email already exist!")]
    AlreadyExists,

    /// Sender balance is smaller than the transfer amount.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Password verification failed.
    #[error("Wrong password!")]
    WrongPassword,

    /// Token signature is valid but the lifetime has elapsed.
    #[error("Token expired!")]
    TokenExpired,

    /// Token is absent, malformed, or carries a bad signature.
    #[error("Invalid token!")]
    TokenInvalid,

    /// No account matches the given email.
    #[error("User not found!")]
    UserNotFound,

    /// Transfer recipient does not exist.
    #[error("Recipient not found!")]
    RecipientNotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// External rate source error.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal invariant violation (e.g. missing currency row).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::AlreadyExists | Self::InsufficientFunds => 400,
            Self::WrongPassword | Self::TokenExpired | Self::TokenInvalid => 403,
            Self::UserNotFound | Self::RecipientNotFound => 404,
            Self::Database(_) | Self::ExternalService(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the message to put in the response envelope.
    ///
    /// Server-side failures are collapsed to a generic message; the detail
    /// stays in the logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) | Self::ExternalService(_) | Self::Internal(_) => {
                "Internal server error!".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::AlreadyExists.status_code(), 400);
        assert_eq!(AppError::InsufficientFunds.status_code(), 400);
        assert_eq!(AppError::WrongPassword.status_code(), 403);
        assert_eq!(AppError::TokenExpired.status_code(), 403);
        assert_eq!(AppError::TokenInvalid.status_code(), 403);
        assert_eq!(AppError::UserNotFound.status_code(), 404);
        assert_eq!(AppError::RecipientNotFound.status_code(), 404);
        assert_eq!(AppError::Database(String::new()).status_code(), 500);
        assert_eq!(AppError::ExternalService(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(
            AppError::AlreadyExists.to_string(),
            "User with this email already exist!"
        );
        assert_eq!(AppError::UserNotFound.to_string(), "User not found!");
        assert_eq!(
            AppError::RecipientNotFound.to_string(),
            "Recipient not found!"
        );
        assert_eq!(AppError::WrongPassword.to_string(), "Wrong password!");
        assert_eq!(
            AppError::InsufficientFunds.to_string(),
            "Insufficient funds"
        );
        assert_eq!(AppError::TokenExpired.to_string(), "Token expired!");
        assert_eq!(AppError::TokenInvalid.to_string(), "Invalid token!");
    }

    #[test]
    fn test_internal_detail_is_not_public() {
        let err = AppError::Database("connection refused on 10.0.0.3".into());
        assert_eq!(err.public_message(), "Internal server error!");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_business_messages_are_public() {
        assert_eq!(
            AppError::InsufficientFunds.public_message(),
            "Insufficient funds"
        );
    }
}
