use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Booking workflow state, stored as a lowercase string. The single source of
/// truth for the lifecycle; legal transitions live in `crate::booking::status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum BookingStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "assigned")]
    Assigned,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "paused")]
    Paused,
}

/// Discriminant between the two booking shapes: a marketplace service visit
/// (category/service/sub-service) or a driver/travel trip (vehicle type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum BookingKind {
    #[sea_orm(string_value = "service")]
    Service,
    #[sea_orm(string_value = "travel")]
    Travel,
}

/// SeaORM entity for the `bookings` table.
///
/// Travel bookings carry a human-readable `code` (WAVED + sequence) and a
/// vehicle-type fare profile; service bookings reference the catalog instead.
/// At most one partner is assigned at a time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: Option<String>,
    pub user_id: Uuid,
    pub partner_id: Option<Uuid>,
    pub kind: BookingKind,
    pub category_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub sub_service_id: Option<Uuid>,
    pub vehicle_type_id: Option<Uuid>,
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub pickup_address: String,
    pub dropoff_lat: Option<f64>,
    pub dropoff_lng: Option<f64>,
    pub dropoff_address: Option<String>,
    pub scheduled_date: Date,
    /// Free-text `HH:mm`.
    pub scheduled_time: String,
    pub amount: f64,
    pub base_fare: f64,
    pub distance_cost: f64,
    pub time_cost: f64,
    pub night_surcharge: f64,
    pub tax: f64,
    pub discount: f64,
    pub status: BookingStatus,
    /// Start-verification code the partner must present to begin work.
    pub start_code: Option<String>,
    pub cancel_reason: Option<String>,
    pub cancelled_at: Option<DateTimeUtc>,
    pub completed_at: Option<DateTimeUtc>,
    /// JSON array of proof photo URLs attached at completion.
    pub proof_photos: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::partners::Entity",
        from = "Column::PartnerId",
        to = "super::partners::Column::Id"
    )]
    Partner,
    #[sea_orm(
        belongs_to = "super::vehicle_types::Entity",
        from = "Column::VehicleTypeId",
        to = "super::vehicle_types::Column::Id"
    )]
    VehicleType,
    #[sea_orm(has_many = "super::booking_messages::Entity")]
    Messages,
    #[sea_orm(has_one = "super::reviews::Entity")]
    Review,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::partners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partner.def()
    }
}

impl Related<super::vehicle_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VehicleType.def()
    }
}

impl Related<super::booking_messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for POST /api/user/bookings. `kind` decides which reference
/// group is required; create-time validation rejects mixed or missing groups.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBooking {
    pub kind: BookingKind,
    pub category_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub sub_service_id: Option<Uuid>,
    pub vehicle_type_id: Option<Uuid>,
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub pickup_address: String,
    pub dropoff_lat: Option<f64>,
    pub dropoff_lng: Option<f64>,
    pub dropoff_address: Option<String>,
    pub scheduled_date: Date,
    pub scheduled_time: String,
    /// Trip duration estimate in minutes (travel bookings).
    pub duration_min: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditBooking {
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
    pub pickup_address: Option<String>,
    pub dropoff_lat: Option<f64>,
    pub dropoff_lng: Option<f64>,
    pub dropoff_address: Option<String>,
    pub scheduled_date: Option<Date>,
    pub scheduled_time: Option<String>,
    /// Revised trip duration estimate in minutes (travel bookings).
    pub duration_min: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelBooking {
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartBooking {
    pub start_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompleteBooking {
    pub proof_photos: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FareEstimateRequest {
    pub vehicle_type_id: Uuid,
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub dropoff_lat: f64,
    pub dropoff_lng: f64,
    pub duration_min: f64,
    /// `HH:mm`; only the hour matters for the night window.
    pub scheduled_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn booking_joins_to_its_fare_profile() {
        let sql = Entity::find()
            .find_also_related(super::super::vehicle_types::Entity)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("vehicle_types"), "{sql}");
    }

    #[test]
    fn fare_profile_joins_back_to_its_bookings() {
        let sql = super::super::vehicle_types::Entity::find()
            .find_with_related(Entity)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("bookings"), "{sql}");
    }
}
