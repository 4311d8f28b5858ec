pub mod bookings;
pub mod catalog;
pub mod counters;
pub mod messages;
pub mod partners;
pub mod reviews;
pub mod users;
pub mod wallets;

use sea_orm::{Database, DatabaseConnection};
use std::env;

/// Create a SeaORM database connection pool from the `DATABASE_URL` env var.
/// A missing or unreachable database is fatal at boot.
pub async fn create_pool() -> DatabaseConnection {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    Database::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
