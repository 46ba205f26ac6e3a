//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the three ledger tables
//! - Repository abstractions for data access
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{CurrencyRepository, TransactionRepository, UserRepository};

use sea_orm::{ConnectOptions, Database, DbErr};
pub use sea_orm::DatabaseConnection;

/// Establishes a connection pool to the database.
///
/// The pool is shared by request handling and the rate refresher; each
/// logical operation holds one connection for the duration of its own
/// transaction only.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.max_connections(max_connections);
    Database::connect(options).await
}
