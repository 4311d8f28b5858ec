//! Consumer-facing booking endpoints. The handlers stay thin: validation and
//! orchestration live in `crate::booking`, queries in `crate::db`.

use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::booking;
use crate::booking::geo::GeoPoint;
use crate::db::{
    bookings as booking_db, catalog as catalog_db, messages as message_db,
    partners as partner_db, reviews as review_db,
};
use crate::error::{ApiError, ApiResult};
use crate::fare;
use crate::handlers::{created, ok};
use crate::models::booking_messages::{PostMessage, Sender};
use crate::models::bookings::{
    CancelBooking, CreateBooking, EditBooking, FareEstimateRequest,
};
use crate::models::partners::PartnerCandidate;
use crate::models::reviews::CreateReview;
use crate::notify::{DistanceClient, PushNotifier};

/// POST /api/user/bookings — create and immediately try auto-assignment.
pub async fn create_booking(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    distance: web::Data<Arc<dyn DistanceClient>>,
    notifier: web::Data<Arc<dyn PushNotifier>>,
    body: web::Json<CreateBooking>,
) -> ApiResult<HttpResponse> {
    let outcome = booking::create_booking(
        db.get_ref(),
        user.0.id,
        body.into_inner(),
        distance.get_ref().as_ref(),
    )
    .await?;

    booking::notify_assignment(notifier.get_ref().as_ref(), &outcome).await;
    Ok(created(outcome.booking))
}

/// GET /api/user/bookings
pub async fn get_my_bookings(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    Ok(ok(booking_db::get_bookings_by_user(db.get_ref(), user.0.id).await?))
}

/// GET /api/user/bookings/{id}
pub async fn get_booking(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let booking = booking_db::get_booking_by_id(db.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;
    if booking.user_id != user.0.id {
        return Err(ApiError::forbidden("you can only view your own bookings"));
    }
    Ok(ok(booking))
}

/// PUT /api/user/bookings/{id}
pub async fn edit_booking(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    distance: web::Data<Arc<dyn DistanceClient>>,
    path: web::Path<Uuid>,
    body: web::Json<EditBooking>,
) -> ApiResult<HttpResponse> {
    let booking = booking::edit(
        db.get_ref(),
        user.0.id,
        path.into_inner(),
        body.into_inner(),
        distance.get_ref().as_ref(),
    )
    .await?;
    Ok(ok(booking))
}

/// POST /api/user/bookings/{id}/cancel
pub async fn cancel_booking(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<CancelBooking>,
) -> ApiResult<HttpResponse> {
    let booking =
        booking::cancel(db.get_ref(), user.0.id, path.into_inner(), body.into_inner()).await?;
    Ok(ok(booking))
}

/// POST /api/user/bookings/{id}/review
pub async fn review_booking(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<CreateReview>,
) -> ApiResult<HttpResponse> {
    let review =
        booking::review(db.get_ref(), user.0.id, path.into_inner(), body.into_inner()).await?;
    Ok(created(review))
}

/// GET /api/user/bookings/{id}/chat
pub async fn get_chat(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let booking = booking_db::get_booking_by_id(db.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;
    if booking.user_id != user.0.id {
        return Err(ApiError::forbidden("you can only view your own bookings"));
    }
    Ok(ok(
        message_db::get_messages_by_booking(db.get_ref(), booking.id).await?,
    ))
}

/// POST /api/user/bookings/{id}/chat
pub async fn post_chat(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<PostMessage>,
) -> ApiResult<HttpResponse> {
    let booking = booking_db::get_booking_by_id(db.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;
    if booking.user_id != user.0.id {
        return Err(ApiError::forbidden("you can only chat on your own bookings"));
    }
    let text = body.into_inner().body;
    if text.trim().is_empty() {
        return Err(ApiError::validation("message body is required"));
    }
    Ok(created(
        message_db::insert_message(db.get_ref(), booking.id, Sender::User, text).await?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct PartnerSearchQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius_km: Option<f64>,
    pub category_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
}

/// GET /api/user/partners/search — ranked nearby candidates, nearest first.
pub async fn search_partners(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PartnerSearchQuery>,
) -> ApiResult<HttpResponse> {
    let origin = GeoPoint::new(query.lat, query.lng);
    if !origin.is_valid() {
        return Err(ApiError::validation("invalid coordinates"));
    }

    let filter = partner_db::CandidateFilter {
        origin,
        radius_km: query.radius_km.unwrap_or(5.0),
        vehicle_type_id: None,
        category_id: query.category_id,
        service_id: query.service_id,
    };

    let candidates: Vec<PartnerCandidate> = partner_db::nearby_candidates(db.get_ref(), &filter)
        .await?
        .into_iter()
        .map(|(p, distance_km)| PartnerCandidate {
            partner_id: p.id,
            name: p.name,
            experience_years: p.experience_years,
            rating: p.rating,
            price: p.price,
            distance_km,
        })
        .collect();

    Ok(ok(candidates))
}

/// GET /api/user/partners/{id}/reviews — what others said about a candidate.
pub async fn get_partner_reviews(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let partner_id = path.into_inner();
    partner_db::get_partner_by_id(db.get_ref(), partner_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Partner not found"))?;
    Ok(ok(
        review_db::get_reviews_by_partner(db.get_ref(), partner_id).await?,
    ))
}

/// POST /api/user/fare-estimate — quote a travel fare without booking.
pub async fn fare_estimate(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    distance: web::Data<Arc<dyn DistanceClient>>,
    body: web::Json<FareEstimateRequest>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();

    let pickup = GeoPoint::new(input.pickup_lat, input.pickup_lng);
    let dropoff = GeoPoint::new(input.dropoff_lat, input.dropoff_lng);
    if !pickup.is_valid() || !dropoff.is_valid() {
        return Err(ApiError::validation("invalid coordinates"));
    }

    let profile = catalog_db::get_vehicle_type_by_id(db.get_ref(), input.vehicle_type_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle type not found"))?;
    if !profile.is_active {
        return Err(ApiError::validation("vehicle type is not active"));
    }

    let hour = fare::parse_scheduled_hour(&input.scheduled_time)?;
    let distance_km = distance.distance_km(pickup, dropoff).await?;
    let quote = fare::compute_fare(&profile, distance_km, input.duration_min, hour)?;

    Ok(ok(serde_json::json!({
        "distance_km": distance_km,
        "quote": quote,
    })))
}
