//! `SeaORM` entity definitions.

pub mod currencies;
pub mod transactions;
pub mod users;
