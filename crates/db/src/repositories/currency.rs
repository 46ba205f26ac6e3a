//! Currency repository for rate-table database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, TransactionError,
    TransactionTrait,
};

use crate::entities::currencies;

/// Currency repository for rate lookups and refresh sweeps.
#[derive(Debug, Clone)]
pub struct CurrencyRepository {
    db: DatabaseConnection,
}

impl CurrencyRepository {
    /// Creates a new currency repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Overwrites the rate of every given currency in one transaction.
    ///
    /// Readers never observe a mix of old and new rates within a sweep; if
    /// any statement fails, the whole sweep rolls back. Multipliers are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement in the sweep fails.
    pub async fn set_rates(&self, rates: &[(String, Decimal)]) -> Result<(), DbErr> {
        let count = rates.len();
        let rates = rates.to_vec();

        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    for (code, rate) in rates {
                        currencies::Entity::update_many()
                            .set(currencies::ActiveModel {
                                rate: Set(rate),
                                ..Default::default()
                            })
                            .filter(currencies::Column::Id.eq(code))
                            .exec(txn)
                            .await?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db) | TransactionError::Transaction(db) => db,
            })?;

        tracing::debug!(count, "rate table swept");
        Ok(())
    }
}
