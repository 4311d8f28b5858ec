use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
    CategoryId,
    Name,
    Price,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SubServices {
    Table,
    Id,
    ServiceId,
    Name,
    IsActive,
}

#[derive(DeriveIden)]
enum VehicleTypes {
    Table,
    Id,
    Name,
    BaseFare,
    PerKmRate,
    PerMinuteRate,
    NightSurchargeRate,
    SurgeMultiplier,
    IsActive,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::IsActive).boolean().not_null())
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Services::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Services::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(Services::Name).string().not_null())
                    .col(ColumnDef::new(Services::Price).double())
                    .col(ColumnDef::new(Services::IsActive).boolean().not_null())
                    .col(
                        ColumnDef::new(Services::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_services_category")
                            .from(Services::Table, Services::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SubServices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubServices::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubServices::ServiceId).uuid().not_null())
                    .col(ColumnDef::new(SubServices::Name).string().not_null())
                    .col(ColumnDef::new(SubServices::IsActive).boolean().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sub_services_service")
                            .from(SubServices::Table, SubServices::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VehicleTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VehicleTypes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VehicleTypes::Name).string().not_null())
                    .col(ColumnDef::new(VehicleTypes::BaseFare).double().not_null())
                    .col(ColumnDef::new(VehicleTypes::PerKmRate).double().not_null())
                    .col(
                        ColumnDef::new(VehicleTypes::PerMinuteRate)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VehicleTypes::NightSurchargeRate)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VehicleTypes::SurgeMultiplier)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VehicleTypes::IsActive).boolean().not_null())
                    .col(
                        ColumnDef::new(VehicleTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VehicleTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await
    }
}
