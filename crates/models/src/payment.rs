use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account;

/// Account-centric payment history entry. One row per (account, month, year),
/// enforced by a unique index.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub paid_on: Date,
    /// Account salary captured at append time.
    pub salary_at_payment: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Account,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Account => Entity::belongs_to(account::Entity)
                .from(Column::AccountId)
                .to(account::Column::Id)
                .into(),
        }
    }
}

impl Related<account::Entity> for Entity {
    fn to() -> RelationDef { Relation::Account.def() }
}

impl ActiveModelBehavior for ActiveModel {}
