use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Bookings {
    Table,
    UserId,
    PartnerId,
    Status,
}

#[derive(DeriveIden)]
enum WalletTransactions {
    Table,
    WalletId,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_user")
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .to_owned(),
            )
            .await?;

        // Partner job lists and the active-booking lookup filter on both.
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_partner_status")
                    .table(Bookings::Table)
                    .col(Bookings::PartnerId)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_wallet_transactions_wallet_created")
                    .table(WalletTransactions::Table)
                    .col(WalletTransactions::WalletId)
                    .col(WalletTransactions::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_wallet_transactions_wallet_created")
                    .table(WalletTransactions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_bookings_partner_status")
                    .table(Bookings::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_bookings_user")
                    .table(Bookings::Table)
                    .to_owned(),
            )
            .await
    }
}
