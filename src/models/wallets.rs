use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `wallets` table — one per partner.
///
/// `balance` is derived state: it must always equal the `balance_after` of the
/// latest transaction. The ledger functions in `crate::db::wallets` update
/// both inside one transaction.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub wallet_no: String,
    #[sea_orm(unique)]
    pub partner_id: Uuid,
    pub balance: f64,
    /// Debits may not take the balance below this floor; duty-on requires
    /// `balance >= min_balance`.
    pub min_balance: f64,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::partners::Entity",
        from = "Column::PartnerId",
        to = "super::partners::Column::Id"
    )]
    Partner,
    #[sea_orm(has_many = "super::wallet_transactions::Entity")]
    Transactions,
}

impl Related<super::partners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partner.def()
    }
}

impl Related<super::wallet_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct WalletAdjustment {
    pub amount: f64,
    pub description: String,
    pub reference: Option<String>,
}
