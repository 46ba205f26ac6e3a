//! `SeaORM` Entity for the users table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An account holder: identity, credential hash, and current balance.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Account email, the identity key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub email: String,
    /// Opaque password hash (never the plaintext).
    pub password: String,
    /// Current balance in the account's own currency.
    pub balance: Decimal,
    /// Currency code of the balance.
    pub currency: String,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
