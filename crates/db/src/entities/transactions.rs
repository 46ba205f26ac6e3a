//! `SeaORM` Entity for the append-only transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One successful transfer. The amount is always expressed in the sender's
/// currency, regardless of what the recipient received.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Insertion-ordered record id.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sender account email.
    pub sender: String,
    /// Recipient account email.
    pub recipient: String,
    /// Transferred amount in the sender's currency.
    pub amount: Decimal,
    /// When the transfer committed.
    pub date: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Sending account.
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Sender",
        to = "super::users::Column::Email"
    )]
    Sender,
    /// Receiving account.
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Recipient",
        to = "super::users::Column::Email"
    )]
    Recipient,
}

impl ActiveModelBehavior for ActiveModel {}
