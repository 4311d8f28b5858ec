use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Credit or debit, stored as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum TxnKind {
    #[sea_orm(string_value = "credit")]
    Credit,
    #[sea_orm(string_value = "debit")]
    Debit,
}

/// SeaORM entity for the `wallet_transactions` table — the append-only
/// ledger. Rows are never updated or deleted; `balance_after` records the
/// running balance so the history is self-checking.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallet_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub txn_no: String,
    pub wallet_id: Uuid,
    pub kind: TxnKind,
    pub amount: f64,
    pub description: String,
    pub reference: Option<String>,
    pub balance_after: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wallets::Entity",
        from = "Column::WalletId",
        to = "super::wallets::Column::Id"
    )]
    Wallet,
}

impl Related<super::wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Signed amount: credits are positive, debits negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TxnKind::Credit => self.amount,
            TxnKind::Debit => -self.amount,
        }
    }
}
