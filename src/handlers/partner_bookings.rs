//! Partner-facing booking actions: the accept/reject/start/complete workflow
//! plus lists and the booking chat.

use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedPartner;
use crate::booking;
use crate::db::{bookings as booking_db, messages as message_db};
use crate::error::{ApiError, ApiResult};
use crate::handlers::{created, ok};
use crate::models::booking_messages::{PostMessage, Sender};
use crate::models::bookings::{CompleteBooking, StartBooking};
use crate::notify::PushNotifier;

/// GET /api/partner/bookings — full history.
pub async fn get_my_bookings(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    Ok(ok(
        booking_db::get_bookings_by_partner(db.get_ref(), partner.0.id).await?,
    ))
}

/// GET /api/partner/bookings/active — assigned or underway.
pub async fn get_active_bookings(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    Ok(ok(
        booking_db::get_active_bookings_by_partner(db.get_ref(), partner.0.id).await?,
    ))
}

/// POST /api/partner/bookings/{id}/accept
pub async fn accept_booking(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let booking = booking::accept(db.get_ref(), partner.0.id, path.into_inner()).await?;
    Ok(ok(booking))
}

/// POST /api/partner/bookings/{id}/reject — frees this partner and re-routes
/// the booking to the next nearest candidate (or back to pending).
pub async fn reject_booking(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
    notifier: web::Data<Arc<dyn PushNotifier>>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let outcome = booking::reject(db.get_ref(), partner.0.id, path.into_inner()).await?;
    booking::notify_assignment(notifier.get_ref().as_ref(), &outcome).await;
    Ok(ok(outcome.booking))
}

/// POST /api/partner/bookings/{id}/start — requires the user's start code.
pub async fn start_booking(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<StartBooking>,
) -> ApiResult<HttpResponse> {
    let booking =
        booking::start(db.get_ref(), partner.0.id, path.into_inner(), &body.start_code).await?;
    Ok(ok(booking))
}

/// POST /api/partner/bookings/{id}/complete — requires photo proof.
pub async fn complete_booking(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<CompleteBooking>,
) -> ApiResult<HttpResponse> {
    let booking = booking::complete(
        db.get_ref(),
        partner.0.id,
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(ok(booking))
}

/// POST /api/partner/bookings/{id}/pause
pub async fn pause_booking(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let booking = booking::set_paused(db.get_ref(), partner.0.id, path.into_inner(), true).await?;
    Ok(ok(booking))
}

/// POST /api/partner/bookings/{id}/resume
pub async fn resume_booking(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let booking = booking::set_paused(db.get_ref(), partner.0.id, path.into_inner(), false).await?;
    Ok(ok(booking))
}

async fn load_assigned_booking(
    db: &DatabaseConnection,
    partner_id: Uuid,
    booking_id: Uuid,
) -> ApiResult<crate::models::bookings::Model> {
    let booking = booking_db::get_booking_by_id(db, booking_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;
    if booking.partner_id != Some(partner_id) {
        return Err(ApiError::forbidden("booking is not assigned to you"));
    }
    Ok(booking)
}

/// GET /api/partner/bookings/{id}/chat
pub async fn get_chat(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let booking = load_assigned_booking(db.get_ref(), partner.0.id, path.into_inner()).await?;
    Ok(ok(
        message_db::get_messages_by_booking(db.get_ref(), booking.id).await?,
    ))
}

/// POST /api/partner/bookings/{id}/chat
pub async fn post_chat(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<PostMessage>,
) -> ApiResult<HttpResponse> {
    let booking = load_assigned_booking(db.get_ref(), partner.0.id, path.into_inner()).await?;
    let text = body.into_inner().body;
    if text.trim().is_empty() {
        return Err(ApiError::validation("message body is required"));
    }
    Ok(created(
        message_db::insert_message(db.get_ref(), booking.id, Sender::Partner, text).await?,
    ))
}
