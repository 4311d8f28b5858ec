use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    Code,
    UserId,
    PartnerId,
    Kind,
    CategoryId,
    ServiceId,
    SubServiceId,
    VehicleTypeId,
    PickupLat,
    PickupLng,
    PickupAddress,
    DropoffLat,
    DropoffLng,
    DropoffAddress,
    ScheduledDate,
    ScheduledTime,
    Amount,
    BaseFare,
    DistanceCost,
    TimeCost,
    NightSurcharge,
    Tax,
    Discount,
    Status,
    StartCode,
    CancelReason,
    CancelledAt,
    CompletedAt,
    ProofPhotos,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Partners {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bookings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bookings::Code).string().unique_key())
                    .col(ColumnDef::new(Bookings::UserId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::PartnerId).uuid())
                    .col(ColumnDef::new(Bookings::Kind).string().not_null())
                    .col(ColumnDef::new(Bookings::CategoryId).uuid())
                    .col(ColumnDef::new(Bookings::ServiceId).uuid())
                    .col(ColumnDef::new(Bookings::SubServiceId).uuid())
                    .col(ColumnDef::new(Bookings::VehicleTypeId).uuid())
                    .col(ColumnDef::new(Bookings::PickupLat).double().not_null())
                    .col(ColumnDef::new(Bookings::PickupLng).double().not_null())
                    .col(ColumnDef::new(Bookings::PickupAddress).string().not_null())
                    .col(ColumnDef::new(Bookings::DropoffLat).double())
                    .col(ColumnDef::new(Bookings::DropoffLng).double())
                    .col(ColumnDef::new(Bookings::DropoffAddress).string())
                    .col(ColumnDef::new(Bookings::ScheduledDate).date().not_null())
                    .col(ColumnDef::new(Bookings::ScheduledTime).string().not_null())
                    .col(ColumnDef::new(Bookings::Amount).double().not_null())
                    .col(ColumnDef::new(Bookings::BaseFare).double().not_null())
                    .col(ColumnDef::new(Bookings::DistanceCost).double().not_null())
                    .col(ColumnDef::new(Bookings::TimeCost).double().not_null())
                    .col(ColumnDef::new(Bookings::NightSurcharge).double().not_null())
                    .col(ColumnDef::new(Bookings::Tax).double().not_null())
                    .col(ColumnDef::new(Bookings::Discount).double().not_null())
                    .col(ColumnDef::new(Bookings::Status).string().not_null())
                    .col(ColumnDef::new(Bookings::StartCode).string())
                    .col(ColumnDef::new(Bookings::CancelReason).string())
                    .col(ColumnDef::new(Bookings::CancelledAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Bookings::CompletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Bookings::ProofPhotos)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_user")
                            .from(Bookings::Table, Bookings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_partner")
                            .from(Bookings::Table, Bookings::PartnerId)
                            .to(Partners::Table, Partners::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}
