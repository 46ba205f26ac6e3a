//! The request envelope and the closed operation table.
//!
//! Operations are an externally-tagged enum, so the wire shape
//! `{"request": {"transfer": {...}}, "token": "..."}` maps straight onto a
//! typed variant and an unknown method name fails deserialization before it
//! can reach the ledger.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use payline_shared::{AppError, AppResult, TokenError};

use crate::AppState;
use crate::ops;

/// Top-level request shape: one operation plus the caller's token.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    /// The single requested operation.
    pub request: Operation,
    /// Signed identity assertion; required for everything except
    /// `register` and `authenticate`.
    #[serde(default)]
    pub token: Option<String>,
}

/// The closed set of ledger operations.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Create a new account.
    Register(ops::RegisterParams),
    /// Exchange credentials for a token.
    Authenticate(ops::AuthenticateParams),
    /// Move funds to another account.
    Transfer(ops::TransferParams),
    /// Page through the caller's transfer history.
    ListTransactions(ops::ListTransactionsParams),
}

/// Routes one envelope to its operation handler.
///
/// `register` and `authenticate` run tokenless; every other operation has
/// its token verified first, and the verified email is what the handler
/// receives as the caller identity.
///
/// # Errors
///
/// Returns the operation's business failure, or a token error without
/// invoking the operation at all.
pub async fn dispatch(state: &AppState, envelope: Envelope) -> AppResult<Value> {
    match envelope.request {
        Operation::Register(params) => ops::register(state, params).await,
        Operation::Authenticate(params) => ops::authenticate(state, params).await,
        Operation::Transfer(params) => {
            let caller = verify_caller(state, envelope.token.as_deref())?;
            ops::transfer(state, &caller, params).await
        }
        Operation::ListTransactions(params) => {
            let caller = verify_caller(state, envelope.token.as_deref())?;
            ops::list_transactions(state, &caller, params).await
        }
    }
}

/// Verifies the supplied token and returns the caller's email.
fn verify_caller(state: &AppState, token: Option<&str>) -> AppResult<String> {
    state.tokens.verify(token).map_err(|e| match e {
        TokenError::Expired => AppError::TokenExpired,
        TokenError::Encoding(_) | TokenError::Invalid => AppError::TokenInvalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_register_envelope() {
        let envelope: Envelope = serde_json::from_str(
            r#"{
                "request": {
                    "register": {
                        "email": "bob@example.com",
                        "password": "hunter2",
                        "balance": 100,
                        "currency": "USD"
                    }
                }
            }"#,
        )
        .unwrap();

        assert!(envelope.token.is_none());
        let Operation::Register(params) = envelope.request else {
            panic!("expected register");
        };
        assert_eq!(params.email, "bob@example.com");
        assert_eq!(params.balance, dec!(100));
    }

    #[test]
    fn test_parse_transfer_with_token() {
        let envelope: Envelope = serde_json::from_str(
            r#"{
                "request": {"transfer": {"email": "bob@example.com", "amount": "12.50"}},
                "token": "abc.def.ghi"
            }"#,
        )
        .unwrap();

        assert_eq!(envelope.token.as_deref(), Some("abc.def.ghi"));
        let Operation::Transfer(params) = envelope.request else {
            panic!("expected transfer");
        };
        assert_eq!(params.amount, dec!(12.50));
    }

    #[test]
    fn test_list_transactions_defaults() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"request": {"list_transactions": {}}, "token": "t"}"#)
                .unwrap();

        let Operation::ListTransactions(params) = envelope.request else {
            panic!("expected list_transactions");
        };
        assert_eq!(params.limit, 10);
        assert_eq!(params.skip, 0);
    }

    #[test]
    fn test_unknown_operation_fails_to_parse() {
        let result: Result<Envelope, _> =
            serde_json::from_str(r#"{"request": {"drop_all_tables": {}}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_request_fails_to_parse() {
        let result: Result<Envelope, _> = serde_json::from_str(r#"{"token": "t"}"#);
        assert!(result.is_err());
    }
}
