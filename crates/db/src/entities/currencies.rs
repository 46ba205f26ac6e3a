//! `SeaORM` Entity for the currencies rate table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Conversion data for one currency, written only by the rate refresher in
/// full-table sweeps.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "currencies")]
pub struct Model {
    /// Currency code (e.g. "EUR").
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Price relative to the base currency.
    pub rate: Decimal,
    /// Unit-scaling factor applied before/after the rate.
    pub multiplier: Decimal,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Conversion-ready view of this row.
    #[must_use]
    pub fn to_rate(&self) -> payline_core::currency::CurrencyRate {
        payline_core::currency::CurrencyRate::new(self.id.clone(), self.rate, self.multiplier)
    }
}
