use sea_orm::*;
use uuid::Uuid;

use crate::booking::geo::{GeoPoint, haversine_km};
use crate::models::partners::{self, CompletePartnerProfile, KycStatus};

pub async fn find_or_create_by_phone(
    db: &DatabaseConnection,
    phone: &str,
) -> Result<partners::Model, DbErr> {
    if let Some(existing) = partners::Entity::find()
        .filter(partners::Column::Phone.eq(phone))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    partners::ActiveModel {
        id: Set(Uuid::new_v4()),
        phone: Set(phone.to_owned()),
        name: Set(None),
        email: Set(None),
        address: Set(None),
        kyc_status: Set(KycStatus::Pending),
        profile_complete: Set(false),
        is_available: Set(true),
        on_duty: Set(false),
        category_id: Set(None),
        service_id: Set(None),
        vehicle_type_id: Set(None),
        lat: Set(None),
        lng: Set(None),
        location_updated_at: Set(None),
        device_token: Set(None),
        rating: Set(0.0),
        rating_count: Set(0),
        completed_jobs: Set(0),
        experience_years: Set(None),
        price: Set(None),
        otp_code: Set(None),
        otp_expires_at: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
}

pub async fn get_partner_by_phone(
    db: &DatabaseConnection,
    phone: &str,
) -> Result<Option<partners::Model>, DbErr> {
    partners::Entity::find()
        .filter(partners::Column::Phone.eq(phone))
        .one(db)
        .await
}

pub async fn get_all_partners(db: &DatabaseConnection) -> Result<Vec<partners::Model>, DbErr> {
    partners::Entity::find().all(db).await
}

pub async fn get_partner_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<partners::Model>, DbErr> {
    partners::Entity::find_by_id(id).one(db).await
}

pub async fn set_otp(
    db: &DatabaseConnection,
    id: Uuid,
    code: &str,
    expires_at: chrono::DateTime<chrono::Utc>,
) -> Result<(), DbErr> {
    let partner = partners::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Partner not found".to_string()))?;

    let mut active: partners::ActiveModel = partner.into();
    active.otp_code = Set(Some(code.to_owned()));
    active.otp_expires_at = Set(Some(expires_at));
    active.update(db).await?;
    Ok(())
}

pub async fn clear_otp(db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
    let partner = partners::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Partner not found".to_string()))?;

    let mut active: partners::ActiveModel = partner.into();
    active.otp_code = Set(None);
    active.otp_expires_at = Set(None);
    active.update(db).await?;
    Ok(())
}

/// Fill in the partner's profile; marks it complete once the capability
/// references needed for matching are present.
pub async fn complete_profile(
    db: &DatabaseConnection,
    id: Uuid,
    input: CompletePartnerProfile,
) -> Result<partners::Model, DbErr> {
    let partner = partners::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Partner not found".to_string()))?;

    let mut active: partners::ActiveModel = partner.into();
    if let Some(name) = input.name {
        active.name = Set(Some(name));
    }
    if let Some(email) = input.email {
        active.email = Set(Some(email));
    }
    if let Some(address) = input.address {
        active.address = Set(Some(address));
    }
    if let Some(category_id) = input.category_id {
        active.category_id = Set(Some(category_id));
    }
    if let Some(service_id) = input.service_id {
        active.service_id = Set(Some(service_id));
    }
    if let Some(vehicle_type_id) = input.vehicle_type_id {
        active.vehicle_type_id = Set(Some(vehicle_type_id));
    }
    if let Some(years) = input.experience_years {
        active.experience_years = Set(Some(years));
    }
    if let Some(price) = input.price {
        active.price = Set(Some(price));
    }
    if let Some(token) = input.device_token {
        active.device_token = Set(Some(token));
    }

    let has_name = matches!(&active.name, ActiveValue::Set(Some(_)) | ActiveValue::Unchanged(Some(_)));
    let has_capability = [
        &active.vehicle_type_id,
        &active.service_id,
    ]
    .iter()
    .any(|v| matches!(v, ActiveValue::Set(Some(_)) | ActiveValue::Unchanged(Some(_))));
    active.profile_complete = Set(has_name && has_capability);

    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await
}

/// Location heartbeat; the stored point is what the nearest-partner search
/// uses, with no freshness window.
pub async fn update_location(
    db: &DatabaseConnection,
    id: Uuid,
    lat: f64,
    lng: f64,
) -> Result<(), DbErr> {
    let partner = partners::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Partner not found".to_string()))?;

    let mut active: partners::ActiveModel = partner.into();
    active.lat = Set(Some(lat));
    active.lng = Set(Some(lng));
    active.location_updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await?;
    Ok(())
}

pub async fn set_on_duty(db: &DatabaseConnection, id: Uuid, on: bool) -> Result<(), DbErr> {
    let partner = partners::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Partner not found".to_string()))?;

    let mut active: partners::ActiveModel = partner.into();
    active.on_duty = Set(on);
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await?;
    Ok(())
}

pub async fn set_kyc_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: KycStatus,
) -> Result<partners::Model, DbErr> {
    let partner = partners::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Partner not found".to_string()))?;

    let mut active: partners::ActiveModel = partner.into();
    active.kyc_status = Set(status);
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await
}

/// What a booking needs from a candidate partner.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    pub origin: GeoPoint,
    pub radius_km: f64,
    pub vehicle_type_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
}

/// Eligible partners within the radius, nearest first.
///
/// Eligibility: available, on duty, KYC approved, profile complete, a known
/// location, and matching the required vehicle type (travel) or category +
/// service (service bookings). Distance ties keep query order; that ordering
/// is stable but not a guaranteed contract. Every call re-queries the store —
/// there is no cache and no staleness cutoff on the stored location.
pub async fn nearby_candidates<C: ConnectionTrait>(
    db: &C,
    filter: &CandidateFilter,
) -> Result<Vec<(partners::Model, f64)>, DbErr> {
    let mut query = partners::Entity::find()
        .filter(partners::Column::IsAvailable.eq(true))
        .filter(partners::Column::OnDuty.eq(true))
        .filter(partners::Column::KycStatus.eq(KycStatus::Approved))
        .filter(partners::Column::ProfileComplete.eq(true))
        .filter(partners::Column::Lat.is_not_null())
        .filter(partners::Column::Lng.is_not_null());

    if let Some(vehicle_type_id) = filter.vehicle_type_id {
        query = query.filter(partners::Column::VehicleTypeId.eq(vehicle_type_id));
    }
    if let Some(category_id) = filter.category_id {
        query = query.filter(partners::Column::CategoryId.eq(category_id));
    }
    if let Some(service_id) = filter.service_id {
        query = query.filter(partners::Column::ServiceId.eq(service_id));
    }

    let mut ranked: Vec<(partners::Model, f64)> = query
        .all(db)
        .await?
        .into_iter()
        .filter_map(|p| match (p.lat, p.lng) {
            (Some(lat), Some(lng)) => {
                let d = haversine_km(filter.origin, GeoPoint::new(lat, lng));
                (d <= filter.radius_km).then_some((p, d))
            }
            _ => None,
        })
        .collect();

    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(ranked)
}

/// Fold a new review rating into the partner's running average.
pub async fn apply_rating<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    rating: i32,
) -> Result<(), DbErr> {
    let partner = partners::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Partner not found".to_string()))?;

    let count = partner.rating_count + 1;
    let average = (partner.rating * partner.rating_count as f64 + rating as f64) / count as f64;

    let mut active: partners::ActiveModel = partner.into();
    active.rating = Set(average);
    active.rating_count = Set(count);
    active.update(db).await?;
    Ok(())
}
