//! Initial database migration.
//!
//! Creates the three ledger tables and seeds the known currency rows so the
//! refresher's UPDATE sweep always has rows to hit.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(CURRENCIES_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(SEED_CURRENCIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DROP TABLE IF EXISTS transactions").await?;
        db.execute_unprepared("DROP TABLE IF EXISTS currencies").await?;
        db.execute_unprepared("DROP TABLE IF EXISTS users").await?;

        Ok(())
    }
}

const USERS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS users (
    email VARCHAR(255) PRIMARY KEY,
    password VARCHAR(255) NOT NULL,
    balance NUMERIC(20, 8) NOT NULL CHECK (balance >= 0),
    currency VARCHAR(8) NOT NULL
);
";

const CURRENCIES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS currencies (
    id VARCHAR(8) PRIMARY KEY,
    rate NUMERIC(20, 8) NOT NULL,
    multiplier NUMERIC(20, 8) NOT NULL DEFAULT 1
);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS transactions (
    id BIGSERIAL PRIMARY KEY,
    sender VARCHAR(255) NOT NULL REFERENCES users(email),
    recipient VARCHAR(255) NOT NULL REFERENCES users(email),
    amount NUMERIC(20, 8) NOT NULL,
    date TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_transactions_sender ON transactions (sender);
CREATE INDEX IF NOT EXISTS idx_transactions_recipient ON transactions (recipient);
";

/// Placeholder rates until the first refresh cycle lands.
const SEED_CURRENCIES_SQL: &str = r"
INSERT INTO currencies (id, rate, multiplier) VALUES
    ('USD', 1.0, 1),
    ('EUR', 0.9, 1),
    ('GBP', 0.8, 1),
    ('RUB', 65.0, 1),
    ('BTC', 9000.0, 1)
ON CONFLICT (id) DO NOTHING;
";
