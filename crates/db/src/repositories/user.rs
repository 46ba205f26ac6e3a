//! User repository for account database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set, SqlErr, TransactionError,
    TransactionTrait,
};

use crate::entities::users;

/// Error types for account registration.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    /// An account with this email already exists.
    #[error("account with this email already exists")]
    AlreadyExists,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// User repository for account operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an account by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(email.to_owned()).one(&self.db).await
    }

    /// Registers a new account: duplicate check and insert in one
    /// transaction.
    ///
    /// A racing insert that slips between the check and the write surfaces as
    /// a unique violation and is reported as `AlreadyExists` too, so the
    /// duplicate-email invariant holds under concurrency.
    ///
    /// # Errors
    ///
    /// Returns `RegisterError::AlreadyExists` if the email is taken.
    pub async fn register(
        &self,
        email: &str,
        password_hash: &str,
        balance: Decimal,
        currency: &str,
    ) -> Result<users::Model, RegisterError> {
        let email = email.to_owned();
        let password_hash = password_hash.to_owned();
        let currency = currency.to_owned();

        let outcome = self
            .db
            .transaction::<_, users::Model, RegisterError>(|txn| {
                Box::pin(async move {
                    let taken = users::Entity::find_by_id(email.clone())
                        .one(txn)
                        .await
                        .map_err(RegisterError::Database)?
                        .is_some();
                    if taken {
                        return Err(RegisterError::AlreadyExists);
                    }

                    let account = users::ActiveModel {
                        email: Set(email),
                        password: Set(password_hash),
                        balance: Set(balance),
                        currency: Set(currency),
                    };

                    account.insert(txn).await.map_err(|e| {
                        if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                            RegisterError::AlreadyExists
                        } else {
                            RegisterError::Database(e)
                        }
                    })
                })
            })
            .await;

        outcome.map_err(|e| match e {
            TransactionError::Connection(db) => RegisterError::Database(db),
            TransactionError::Transaction(inner) => inner,
        })
    }
}
