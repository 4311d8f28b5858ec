use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `vehicle_types` table — a named fare profile.
///
/// `surge_multiplier` is stored for the profile but the fare formula does not
/// apply it; see `crate::fare`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub base_fare: f64,
    pub per_km_rate: f64,
    pub per_minute_rate: f64,
    pub night_surcharge_rate: f64,
    pub surge_multiplier: f64,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::partners::Entity")]
    Partners,
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
}

impl Related<super::partners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partners.def()
    }
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVehicleType {
    pub name: String,
    pub base_fare: f64,
    pub per_km_rate: f64,
    pub per_minute_rate: Option<f64>,
    pub night_surcharge_rate: Option<f64>,
    pub surge_multiplier: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVehicleType {
    pub name: Option<String>,
    pub base_fare: Option<f64>,
    pub per_km_rate: Option<f64>,
    pub per_minute_rate: Option<f64>,
    pub night_surcharge_rate: Option<f64>,
    pub surge_multiplier: Option<f64>,
    pub is_active: Option<bool>,
}
