//! Partner wallet ledger.
//!
//! Credits and debits row-lock the wallet, append an immutable transaction
//! with the resulting balance, and update the wallet balance — all in one
//! database transaction. Debits that would take the balance below the
//! wallet's floor fail without writing anything.

use sea_orm::*;
use uuid::Uuid;

use crate::db::counters;
use crate::error::ApiError;
use crate::models::{wallet_transactions, wallets};

/// Create the wallet for a freshly registered partner.
pub async fn create_for_partner(
    db: &DatabaseConnection,
    partner_id: Uuid,
    min_balance: f64,
) -> Result<wallets::Model, ApiError> {
    let txn = db.begin().await?;
    let seq = counters::next_value(&txn, counters::WALLET_NO).await?;
    let wallet = wallets::ActiveModel {
        id: Set(Uuid::new_v4()),
        wallet_no: Set(counters::format_wallet_no(seq)),
        partner_id: Set(partner_id),
        balance: Set(0.0),
        min_balance: Set(min_balance),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;
    Ok(wallet)
}

pub async fn get_by_partner(
    db: &DatabaseConnection,
    partner_id: Uuid,
) -> Result<Option<wallets::Model>, DbErr> {
    wallets::Entity::find()
        .filter(wallets::Column::PartnerId.eq(partner_id))
        .one(db)
        .await
}

/// Transactions for a wallet, newest first.
pub async fn get_transactions(
    db: &DatabaseConnection,
    wallet_id: Uuid,
) -> Result<Vec<wallet_transactions::Model>, DbErr> {
    wallet_transactions::Entity::find()
        .filter(wallet_transactions::Column::WalletId.eq(wallet_id))
        .order_by_desc(wallet_transactions::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn credit(
    db: &DatabaseConnection,
    wallet_id: Uuid,
    amount: f64,
    description: &str,
    reference: Option<String>,
) -> Result<wallet_transactions::Model, ApiError> {
    apply(db, wallet_id, wallet_transactions::TxnKind::Credit, amount, description, reference).await
}

pub async fn debit(
    db: &DatabaseConnection,
    wallet_id: Uuid,
    amount: f64,
    description: &str,
    reference: Option<String>,
) -> Result<wallet_transactions::Model, ApiError> {
    apply(db, wallet_id, wallet_transactions::TxnKind::Debit, amount, description, reference).await
}

/// Resulting balance for one ledger entry, or the error that rejects it.
/// A rejected entry writes nothing; the caller returns before any insert.
fn apply_amount(
    kind: wallet_transactions::TxnKind,
    balance: f64,
    min_balance: f64,
    amount: f64,
) -> Result<f64, ApiError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ApiError::validation("amount must be a positive number"));
    }
    match kind {
        wallet_transactions::TxnKind::Credit => Ok(balance + amount),
        wallet_transactions::TxnKind::Debit => {
            let after = balance - amount;
            if after < min_balance {
                return Err(ApiError::InsufficientBalance);
            }
            Ok(after)
        }
    }
}

async fn apply(
    db: &DatabaseConnection,
    wallet_id: Uuid,
    kind: wallet_transactions::TxnKind,
    amount: f64,
    description: &str,
    reference: Option<String>,
) -> Result<wallet_transactions::Model, ApiError> {
    let txn = db.begin().await?;

    let wallet = wallets::Entity::find_by_id(wallet_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found("Wallet not found"))?;

    let new_balance = apply_amount(kind, wallet.balance, wallet.min_balance, amount)?;

    let seq = counters::next_value(&txn, counters::WALLET_TXN_NO).await?;
    let entry = wallet_transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        txn_no: Set(counters::format_txn_no(seq)),
        wallet_id: Set(wallet.id),
        kind: Set(kind),
        amount: Set(amount),
        description: Set(description.to_owned()),
        reference: Set(reference),
        balance_after: Set(new_balance),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(&txn)
    .await?;

    let mut active: wallets::ActiveModel = wallet.into();
    active.balance = Set(new_balance);
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(&txn).await?;

    txn.commit().await?;
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallet_transactions::TxnKind;

    #[test]
    fn debit_below_floor_is_rejected() {
        let result = apply_amount(TxnKind::Debit, 100.0, 50.0, 60.0);
        assert!(matches!(result, Err(ApiError::InsufficientBalance)));
    }

    #[test]
    fn debit_exactly_to_floor_is_allowed() {
        assert_eq!(apply_amount(TxnKind::Debit, 100.0, 50.0, 50.0).unwrap(), 50.0);
    }

    #[test]
    fn credit_always_raises_the_balance() {
        assert_eq!(apply_amount(TxnKind::Credit, -10.0, 0.0, 25.0).unwrap(), 15.0);
    }

    #[test]
    fn non_positive_or_non_finite_amounts_are_rejected() {
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(apply_amount(TxnKind::Credit, 100.0, 0.0, amount).is_err());
            assert!(apply_amount(TxnKind::Debit, 100.0, 0.0, amount).is_err());
        }
    }

    #[test]
    fn rejected_debit_leaves_the_running_balance_usable() {
        let balance = 40.0;
        assert!(apply_amount(TxnKind::Debit, balance, 0.0, 100.0).is_err());
        // The next entry still applies against the untouched balance.
        assert_eq!(apply_amount(TxnKind::Credit, balance, 0.0, 10.0).unwrap(), 50.0);
    }
}
