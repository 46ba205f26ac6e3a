//! Ledger operation handlers.
//!
//! Each handler is one call against the store: the hashing, token, and
//! conversion pieces compose around a single repository transaction.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use payline_core::auth::{hash_password, verify_password};
use payline_db::repositories::{RegisterError, TransferError};
use payline_db::{TransactionRepository, UserRepository};
use payline_shared::{AppError, AppResult};

use crate::AppState;

/// Parameters for `register`.
#[derive(Debug, Deserialize)]
pub struct RegisterParams {
    /// New account email.
    pub email: String,
    /// Plaintext password (hashed before storage).
    pub password: String,
    /// Starting balance.
    pub balance: Decimal,
    /// Account currency code.
    pub currency: String,
}

/// Parameters for `authenticate`.
#[derive(Debug, Deserialize)]
pub struct AuthenticateParams {
    /// Account email.
    pub email: String,
    /// Candidate password.
    pub password: String,
}

/// Parameters for `transfer`.
#[derive(Debug, Deserialize)]
pub struct TransferParams {
    /// Recipient account email.
    pub email: String,
    /// Amount in the caller's currency.
    pub amount: Decimal,
}

/// Parameters for `list_transactions`.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsParams {
    /// Maximum number of records to return.
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Number of records to skip.
    #[serde(default)]
    pub skip: u64,
}

fn default_limit() -> u64 {
    10
}

/// Creates a new account with a starting balance.
///
/// # Errors
///
/// Returns `AlreadyExists` for a duplicate email, `Validation` for a
/// negative starting balance.
pub async fn register(state: &AppState, params: RegisterParams) -> AppResult<Value> {
    if params.balance < Decimal::ZERO {
        return Err(AppError::Validation(
            "Starting balance must not be negative!".to_string(),
        ));
    }

    let hash = hash_password(&params.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let users = UserRepository::new((*state.db).clone());
    users
        .register(&params.email, &hash, params.balance, &params.currency)
        .await
        .map_err(|e| match e {
            RegisterError::AlreadyExists => AppError::AlreadyExists,
            RegisterError::Database(db) => AppError::Database(db.to_string()),
        })?;

    info!(email = %params.email, "account registered");
    Ok(json!({}))
}

/// Exchanges valid credentials for a signed token.
///
/// No side effect on the store.
///
/// # Errors
///
/// Returns `UserNotFound` for an unknown email, `WrongPassword` when
/// verification fails.
pub async fn authenticate(state: &AppState, params: AuthenticateParams) -> AppResult<Value> {
    let users = UserRepository::new((*state.db).clone());

    let account = users
        .find_by_email(&params.email)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or(AppError::UserNotFound)?;

    if !verify_password(&params.password, &account.password) {
        info!(email = %params.email, "failed login attempt");
        return Err(AppError::WrongPassword);
    }

    let token = state
        .tokens
        .issue(&account.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Value::String(token))
}

/// Moves funds from the caller to another account.
///
/// # Errors
///
/// Returns `RecipientNotFound`, `InsufficientFunds`, or `Validation` per the
/// transfer rules.
pub async fn transfer(
    state: &AppState,
    caller: &str,
    params: TransferParams,
) -> AppResult<Value> {
    let transactions = TransactionRepository::new((*state.db).clone());

    let record = transactions
        .transfer(caller, &params.email, params.amount)
        .await
        .map_err(|e| match e {
            TransferError::InvalidAmount => {
                AppError::Validation("Transfer amount must be positive!".to_string())
            }
            TransferError::RecipientNotFound => AppError::RecipientNotFound,
            TransferError::SenderNotFound => AppError::UserNotFound,
            TransferError::InsufficientFunds => AppError::InsufficientFunds,
            TransferError::MissingRate(code) => {
                AppError::Internal(format!("no rate for currency '{code}'"))
            }
            TransferError::Database(db) => AppError::Database(db.to_string()),
        })?;

    info!(
        sender = %record.sender,
        recipient = %record.recipient,
        amount = %record.amount,
        "transfer committed"
    );
    Ok(json!({}))
}

/// Pages through the caller's transfer history in insertion order.
///
/// Timestamps are formatted as fixed human-readable strings and amounts are
/// serialized as strings to keep decimal values exact on the wire.
///
/// # Errors
///
/// Returns `Database` if the query fails.
pub async fn list_transactions(
    state: &AppState,
    caller: &str,
    params: ListTransactionsParams,
) -> AppResult<Value> {
    let transactions = TransactionRepository::new((*state.db).clone());

    let records = transactions
        .list_for_account(caller, params.limit, params.skip)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let rows: Vec<Value> = records
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "sender": r.sender,
                "recipient": r.recipient,
                "amount": r.amount.to_string(),
                "date": r.date.format("%H:%M %d-%m-%Y").to_string(),
            })
        })
        .collect();

    Ok(Value::Array(rows))
}
