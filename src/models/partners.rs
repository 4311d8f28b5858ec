use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// KYC verification state, stored as a lowercase string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum KycStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// SeaORM entity for the `partners` table (service providers and drivers).
///
/// `is_available = false` exactly while the partner holds an active booking
/// assignment; the lifecycle manager resets it on completion, rejection and
/// cancellation. `on_duty` is the partner's self-toggled availability, gated
/// by KYC approval and minimum wallet balance.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partners")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub phone: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub kyc_status: KycStatus,
    pub profile_complete: bool,
    pub is_available: bool,
    pub on_duty: bool,
    pub category_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub vehicle_type_id: Option<Uuid>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub location_updated_at: Option<DateTimeUtc>,
    pub device_token: Option<String>,
    pub rating: f64,
    pub rating_count: i32,
    pub completed_jobs: i32,
    pub experience_years: Option<i32>,
    /// The partner's quoted price for their service offering.
    pub price: Option<f64>,
    pub otp_code: Option<String>,
    pub otp_expires_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
    #[sea_orm(has_one = "super::wallets::Entity")]
    Wallet,
    #[sea_orm(
        belongs_to = "super::vehicle_types::Entity",
        from = "Column::VehicleTypeId",
        to = "super::vehicle_types::Column::Id"
    )]
    VehicleType,
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallet.def()
    }
}

impl Related<super::vehicle_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VehicleType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CompletePartnerProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub category_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub vehicle_type_id: Option<Uuid>,
    pub experience_years: Option<i32>,
    pub price: Option<f64>,
    pub device_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationHeartbeat {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DutyToggle {
    pub on: bool,
}

/// Safe partner representation for API responses (no OTP fields).
#[derive(Debug, Clone, Serialize)]
pub struct PartnerResponse {
    pub id: Uuid,
    pub phone: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub kyc_status: KycStatus,
    pub profile_complete: bool,
    pub is_available: bool,
    pub on_duty: bool,
    pub category_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub vehicle_type_id: Option<Uuid>,
    pub rating: f64,
    pub rating_count: i32,
    pub completed_jobs: i32,
    pub experience_years: Option<i32>,
    pub price: Option<f64>,
    pub created_at: DateTimeUtc,
}

impl From<Model> for PartnerResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            phone: m.phone,
            name: m.name,
            email: m.email,
            address: m.address,
            kyc_status: m.kyc_status,
            profile_complete: m.profile_complete,
            is_available: m.is_available,
            on_duty: m.on_duty,
            category_id: m.category_id,
            service_id: m.service_id,
            vehicle_type_id: m.vehicle_type_id,
            rating: m.rating,
            rating_count: m.rating_count,
            completed_jobs: m.completed_jobs,
            experience_years: m.experience_years,
            price: m.price,
            created_at: m.created_at,
        }
    }
}

/// One ranked row returned by the nearby-partner search.
#[derive(Debug, Clone, Serialize)]
pub struct PartnerCandidate {
    pub partner_id: Uuid,
    pub name: Option<String>,
    pub experience_years: Option<i32>,
    pub rating: f64,
    pub price: Option<f64>,
    pub distance_km: f64,
}
