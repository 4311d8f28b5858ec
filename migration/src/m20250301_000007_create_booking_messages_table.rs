use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum BookingMessages {
    Table,
    Id,
    BookingId,
    Sender,
    Body,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookingMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BookingMessages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BookingMessages::BookingId).uuid().not_null())
                    .col(ColumnDef::new(BookingMessages::Sender).string().not_null())
                    .col(ColumnDef::new(BookingMessages::Body).text().not_null())
                    .col(
                        ColumnDef::new(BookingMessages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_messages_booking")
                            .from(BookingMessages::Table, BookingMessages::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_messages_booking")
                    .table(BookingMessages::Table)
                    .col(BookingMessages::BookingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingMessages::Table).to_owned())
            .await
    }
}
