use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Partners {
    Table,
    Id,
    Phone,
    Name,
    Email,
    Address,
    KycStatus,
    ProfileComplete,
    IsAvailable,
    OnDuty,
    CategoryId,
    ServiceId,
    VehicleTypeId,
    Lat,
    Lng,
    LocationUpdatedAt,
    DeviceToken,
    Rating,
    RatingCount,
    CompletedJobs,
    ExperienceYears,
    Price,
    OtpCode,
    OtpExpiresAt,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Partners::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Partners::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Partners::Phone)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Partners::Name).string())
                    .col(ColumnDef::new(Partners::Email).string())
                    .col(ColumnDef::new(Partners::Address).string())
                    .col(ColumnDef::new(Partners::KycStatus).string().not_null())
                    .col(
                        ColumnDef::new(Partners::ProfileComplete)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Partners::IsAvailable).boolean().not_null())
                    .col(ColumnDef::new(Partners::OnDuty).boolean().not_null())
                    .col(ColumnDef::new(Partners::CategoryId).uuid())
                    .col(ColumnDef::new(Partners::ServiceId).uuid())
                    .col(ColumnDef::new(Partners::VehicleTypeId).uuid())
                    .col(ColumnDef::new(Partners::Lat).double())
                    .col(ColumnDef::new(Partners::Lng).double())
                    .col(ColumnDef::new(Partners::LocationUpdatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Partners::DeviceToken).string())
                    .col(ColumnDef::new(Partners::Rating).double().not_null())
                    .col(ColumnDef::new(Partners::RatingCount).integer().not_null())
                    .col(ColumnDef::new(Partners::CompletedJobs).integer().not_null())
                    .col(ColumnDef::new(Partners::ExperienceYears).integer())
                    .col(ColumnDef::new(Partners::Price).double())
                    .col(ColumnDef::new(Partners::OtpCode).string())
                    .col(ColumnDef::new(Partners::OtpExpiresAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Partners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Partners::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // The candidate search filters on these constantly.
        manager
            .create_index(
                Index::create()
                    .name("idx_partners_availability")
                    .table(Partners::Table)
                    .col(Partners::IsAvailable)
                    .col(Partners::OnDuty)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Partners::Table).to_owned())
            .await
    }
}
