//! Transaction repository: the atomic transfer and the per-account history.

use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionError, TransactionTrait,
};

use payline_core::currency::convert;

use crate::entities::{currencies, transactions, users};

/// Error types for transfer operations.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Transfer amount is zero or negative.
    #[error("transfer amount must be positive")]
    InvalidAmount,

    /// The recipient account does not exist.
    #[error("recipient not found")]
    RecipientNotFound,

    /// The sender account does not exist.
    #[error("sender not found")]
    SenderNotFound,

    /// Sender balance is smaller than the transfer amount.
    #[error("insufficient funds")]
    InsufficientFunds,

    /// No rate row exists for a currency held by one of the accounts.
    #[error("no rate for currency '{0}'")]
    MissingRate(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Transaction repository for the append-only transfer log.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Moves `amount` from `sender` to `recipient` atomically.
    ///
    /// Within one transaction: both account rows are locked `FOR UPDATE`,
    /// the recipient and balance checks run against the locked rows, the
    /// amount is converted with the rate rows read in the same transaction,
    /// and the debit, credit, and log append commit together or not at all.
    /// Row locks close the check-then-debit race: two concurrent transfers
    /// from the same sender serialize on the sender row, so the second one
    /// re-reads the already-debited balance.
    ///
    /// The log records `amount` in the sender's currency.
    ///
    /// # Errors
    ///
    /// Returns the business failure that aborted the transfer, or
    /// `TransferError::Database` for store failures.
    pub async fn transfer(
        &self,
        sender: &str,
        recipient: &str,
        amount: Decimal,
    ) -> Result<transactions::Model, TransferError> {
        if amount <= Decimal::ZERO {
            return Err(TransferError::InvalidAmount);
        }

        let sender = sender.to_owned();
        let recipient = recipient.to_owned();

        let outcome = self
            .db
            .transaction::<_, transactions::Model, TransferError>(|txn| {
                Box::pin(async move {
                    // Lock rows in stable key order so two opposing transfers
                    // cannot deadlock.
                    let (sender_row, recipient_row) = if sender <= recipient {
                        let s = find_locked(txn, &sender).await?;
                        let r = if sender == recipient {
                            s.clone()
                        } else {
                            find_locked(txn, &recipient).await?
                        };
                        (s, r)
                    } else {
                        let r = find_locked(txn, &recipient).await?;
                        let s = find_locked(txn, &sender).await?;
                        (s, r)
                    };

                    let Some(recipient_row) = recipient_row else {
                        return Err(TransferError::RecipientNotFound);
                    };
                    let Some(sender_row) = sender_row else {
                        return Err(TransferError::SenderNotFound);
                    };

                    if sender_row.balance < amount {
                        return Err(TransferError::InsufficientFunds);
                    }

                    let converted = if sender_row.currency == recipient_row.currency {
                        amount
                    } else {
                        let from = find_rate(txn, &sender_row.currency).await?;
                        let to = find_rate(txn, &recipient_row.currency).await?;
                        convert(amount, &from.to_rate(), &to.to_rate())
                    };

                    // Debit and credit as column expressions so a
                    // self-transfer nets to zero instead of using stale reads.
                    users::Entity::update_many()
                        .col_expr(
                            users::Column::Balance,
                            Expr::col(users::Column::Balance).sub(amount),
                        )
                        .filter(users::Column::Email.eq(&*sender))
                        .exec(txn)
                        .await?;

                    users::Entity::update_many()
                        .col_expr(
                            users::Column::Balance,
                            Expr::col(users::Column::Balance).add(converted),
                        )
                        .filter(users::Column::Email.eq(&*recipient))
                        .exec(txn)
                        .await?;

                    let record = transactions::ActiveModel {
                        sender: Set(sender),
                        recipient: Set(recipient),
                        amount: Set(amount),
                        date: Set(chrono::Utc::now().into()),
                        ..Default::default()
                    };

                    Ok(record.insert(txn).await?)
                })
            })
            .await;

        outcome.map_err(|e| match e {
            TransactionError::Connection(db) => TransferError::Database(db),
            TransactionError::Transaction(inner) => inner,
        })
    }

    /// Lists transfers where `email` is sender or recipient, in insertion
    /// order, with `limit`/`skip` paging.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_account(
        &self,
        email: &str,
        limit: u64,
        skip: u64,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        transactions::Entity::find()
            .filter(
                Condition::any()
                    .add(transactions::Column::Sender.eq(email))
                    .add(transactions::Column::Recipient.eq(email)),
            )
            .order_by_asc(transactions::Column::Id)
            .limit(limit)
            .offset(skip)
            .all(&self.db)
            .await
    }
}

/// Fetches an account row under a `FOR UPDATE` lock.
async fn find_locked(
    txn: &DatabaseTransaction,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(email.to_owned())
        .lock_exclusive()
        .one(txn)
        .await
}

/// Fetches the rate row for a currency inside the transfer transaction.
async fn find_rate(
    txn: &DatabaseTransaction,
    code: &str,
) -> Result<currencies::Model, TransferError> {
    currencies::Entity::find_by_id(code.to_owned())
        .one(txn)
        .await?
        .ok_or_else(|| TransferError::MissingRate(code.to_owned()))
}
