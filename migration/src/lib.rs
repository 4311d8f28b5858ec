pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_catalog_tables;
mod m20250301_000003_create_partners_table;
mod m20250301_000004_create_bookings_table;
mod m20250301_000005_create_wallet_tables;
mod m20250301_000006_create_reviews_table;
mod m20250301_000007_create_booking_messages_table;
mod m20250301_000008_create_counters_table;
mod m20250301_000009_add_booking_perf_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_catalog_tables::Migration),
            Box::new(m20250301_000003_create_partners_table::Migration),
            Box::new(m20250301_000004_create_bookings_table::Migration),
            Box::new(m20250301_000005_create_wallet_tables::Migration),
            Box::new(m20250301_000006_create_reviews_table::Migration),
            Box::new(m20250301_000007_create_booking_messages_table::Migration),
            Box::new(m20250301_000008_create_counters_table::Migration),
            Box::new(m20250301_000009_add_booking_perf_indexes::Migration),
        ]
    }
}
