//! Booking lifecycle manager.
//!
//! Every multi-row step (assign, reject + re-route, complete, cancel) runs in
//! one database transaction: the partner's availability flag, the booking row
//! and any counters move together or not at all. Push notifications are
//! emitted explicitly after the transaction commits, never from persistence
//! hooks, so a failed commit fires nothing.

pub mod geo;
pub mod status;

use sea_orm::*;
use uuid::Uuid;

use crate::db::{bookings as booking_db, counters, partners as partner_db, reviews as review_db};
use crate::error::ApiError;
use crate::fare;
use crate::models::bookings::{
    self, BookingKind, BookingStatus, CancelBooking, CompleteBooking, CreateBooking, EditBooking,
};
use crate::models::partners::{self, KycStatus};
use crate::models::reviews::CreateReview;
use crate::notify::{DistanceClient, PushNotifier};
use geo::GeoPoint;

const DEFAULT_SEARCH_RADIUS_KM: f64 = 5.0;

fn search_radius_km() -> f64 {
    std::env::var("SEARCH_RADIUS_KM")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_SEARCH_RADIUS_KM)
}

/// A candidate may only be taken while free and on duty; re-checked under a
/// row lock so two concurrent searches cannot take the same partner.
fn is_selectable(partner: &partners::Model) -> bool {
    partner.is_available && partner.on_duty
}

/// Whether an edit touches anything the fare depends on.
fn fare_inputs_changed(input: &EditBooking) -> bool {
    input.pickup_lat.is_some()
        || input.pickup_lng.is_some()
        || input.dropoff_lat.is_some()
        || input.dropoff_lng.is_some()
        || input.scheduled_time.is_some()
        || input.duration_min.is_some()
}

/// Recover the trip duration from the persisted breakdown. A profile with a
/// zero per-minute rate stored a zero time cost, so the duration is gone;
/// zero keeps the time cost at zero either way.
fn stored_duration_min(time_cost: f64, per_minute_rate: f64) -> f64 {
    if per_minute_rate > 0.0 {
        time_cost / per_minute_rate
    } else {
        0.0
    }
}

fn ensure_review_allowed(
    booking: &bookings::Model,
    user_id: Uuid,
    already_reviewed: bool,
    rating: i32,
) -> Result<(), ApiError> {
    if !(1..=5).contains(&rating) {
        return Err(ApiError::validation("rating must be between 1 and 5"));
    }
    if booking.user_id != user_id {
        return Err(ApiError::forbidden("you can only review your own bookings"));
    }
    if booking.status != BookingStatus::Completed {
        return Err(ApiError::conflict("only completed bookings can be reviewed"));
    }
    if already_reviewed {
        return Err(ApiError::conflict("booking has already been reviewed"));
    }
    Ok(())
}

/// Outcome of a lifecycle step that may have (re)assigned a partner. The
/// handler sends the push notification from this after commit.
pub struct TransitionOutcome {
    pub booking: bookings::Model,
    pub notified_partner: Option<partners::Model>,
}

/// Create a booking in `pending`, then immediately try the nearest-partner
/// assignment inside the same transaction.
pub async fn create_booking(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: CreateBooking,
    distance_client: &dyn DistanceClient,
) -> Result<TransitionOutcome, ApiError> {
    let pickup = GeoPoint::new(input.pickup_lat, input.pickup_lng);
    if !pickup.is_valid() {
        return Err(ApiError::validation("invalid pickup coordinates"));
    }
    let dropoff = match (input.dropoff_lat, input.dropoff_lng) {
        (Some(lat), Some(lng)) => {
            let p = GeoPoint::new(lat, lng);
            if !p.is_valid() {
                return Err(ApiError::validation("invalid dropoff coordinates"));
            }
            Some(p)
        }
        (None, None) => None,
        _ => return Err(ApiError::validation("dropoff requires both lat and lng")),
    };
    if input.scheduled_date < chrono::Utc::now().date_naive() {
        return Err(ApiError::validation("scheduled date must not be in the past"));
    }
    let scheduled_hour = fare::parse_scheduled_hour(&input.scheduled_time)?;

    // Kind-specific references and pricing. The discriminant decides which
    // field group must be present; mixed groups are rejected.
    let mut amount = 0.0;
    let mut quote = fare::FareQuote {
        base_fare: 0.0,
        distance_cost: 0.0,
        time_cost: 0.0,
        night_surcharge: 0.0,
        tax: 0.0,
        total: 0.0,
    };

    match input.kind {
        BookingKind::Service => {
            if input.vehicle_type_id.is_some() {
                return Err(ApiError::validation(
                    "service bookings must not reference a vehicle type",
                ));
            }
            let category_id = input
                .category_id
                .ok_or_else(|| ApiError::validation("category_id is required"))?;
            let service_id = input
                .service_id
                .ok_or_else(|| ApiError::validation("service_id is required"))?;

            let category = crate::db::catalog::get_category_by_id(db, category_id)
                .await?
                .ok_or_else(|| ApiError::not_found("Category not found"))?;
            if !category.is_active {
                return Err(ApiError::validation("category is not active"));
            }
            let service = crate::db::catalog::get_service_by_id(db, service_id)
                .await?
                .ok_or_else(|| ApiError::not_found("Service not found"))?;
            if !service.is_active {
                return Err(ApiError::validation("service is not active"));
            }
            if service.category_id != category_id {
                return Err(ApiError::validation("service does not belong to category"));
            }
            if let Some(sub_id) = input.sub_service_id {
                let sub = crate::db::catalog::get_sub_service_by_id(db, sub_id)
                    .await?
                    .ok_or_else(|| ApiError::not_found("Sub-service not found"))?;
                if sub.service_id != service_id {
                    return Err(ApiError::validation("sub-service does not belong to service"));
                }
            }
            amount = service.price.unwrap_or(0.0);
        }
        BookingKind::Travel => {
            if input.category_id.is_some() || input.service_id.is_some() {
                return Err(ApiError::validation(
                    "travel bookings must not reference the service catalog",
                ));
            }
            let vehicle_type_id = input
                .vehicle_type_id
                .ok_or_else(|| ApiError::validation("vehicle_type_id is required"))?;
            let profile = crate::db::catalog::get_vehicle_type_by_id(db, vehicle_type_id)
                .await?
                .ok_or_else(|| ApiError::not_found("Vehicle type not found"))?;
            if !profile.is_active {
                return Err(ApiError::validation("vehicle type is not active"));
            }
            let dropoff =
                dropoff.ok_or_else(|| ApiError::validation("travel bookings need a dropoff"))?;
            let duration_min = input
                .duration_min
                .ok_or_else(|| ApiError::validation("duration_min is required"))?;

            let distance_km = distance_client.distance_km(pickup, dropoff).await?;
            quote = fare::compute_fare(&profile, distance_km, duration_min, scheduled_hour)?;
            amount = quote.total;
        }
    }

    let txn = db.begin().await?;

    // Travel bookings get a human-readable code from the atomic counter.
    let code = match input.kind {
        BookingKind::Travel => {
            let seq = counters::next_value(&txn, counters::BOOKING_CODE).await?;
            Some(counters::format_booking_code(seq))
        }
        BookingKind::Service => None,
    };

    let booking = bookings::ActiveModel {
        id: Set(Uuid::new_v4()),
        code: Set(code),
        user_id: Set(user_id),
        partner_id: Set(None),
        kind: Set(input.kind),
        category_id: Set(input.category_id),
        service_id: Set(input.service_id),
        sub_service_id: Set(input.sub_service_id),
        vehicle_type_id: Set(input.vehicle_type_id),
        pickup_lat: Set(input.pickup_lat),
        pickup_lng: Set(input.pickup_lng),
        pickup_address: Set(input.pickup_address),
        dropoff_lat: Set(input.dropoff_lat),
        dropoff_lng: Set(input.dropoff_lng),
        dropoff_address: Set(input.dropoff_address),
        scheduled_date: Set(input.scheduled_date),
        scheduled_time: Set(input.scheduled_time),
        amount: Set(amount),
        base_fare: Set(quote.base_fare),
        distance_cost: Set(quote.distance_cost),
        time_cost: Set(quote.time_cost),
        night_surcharge: Set(quote.night_surcharge),
        tax: Set(quote.tax),
        discount: Set(0.0),
        status: Set(BookingStatus::Pending),
        start_code: Set(Some(format!("{:04}", fastrand::u32(1000..10000)))),
        cancel_reason: Set(None),
        cancelled_at: Set(None),
        completed_at: Set(None),
        proof_photos: Set(serde_json::json!([])),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(&txn)
    .await?;

    let (booking, partner) = try_assign(&txn, booking).await?;
    txn.commit().await?;

    Ok(TransitionOutcome {
        booking,
        notified_partner: partner,
    })
}

/// Greedy nearest-neighbor assignment. Candidates are re-checked under a row
/// lock before selection so two concurrent searches cannot take the same
/// partner. Leaves the booking `pending` when nobody is in range.
async fn try_assign<C: ConnectionTrait>(
    txn: &C,
    booking: bookings::Model,
) -> Result<(bookings::Model, Option<partners::Model>), ApiError> {
    let filter = partner_db::CandidateFilter {
        origin: GeoPoint::new(booking.pickup_lat, booking.pickup_lng),
        radius_km: search_radius_km(),
        vehicle_type_id: booking.vehicle_type_id,
        category_id: booking.category_id,
        service_id: booking.service_id,
    };

    for (candidate, distance_km) in partner_db::nearby_candidates(txn, &filter).await? {
        let locked = partners::Entity::find_by_id(candidate.id)
            .lock_exclusive()
            .one(txn)
            .await?;
        let Some(locked) = locked else { continue };
        if !is_selectable(&locked) {
            continue;
        }

        let partner_id = locked.id;
        let mut partner_active: partners::ActiveModel = locked.into();
        partner_active.is_available = Set(false);
        let partner = partner_active.update(txn).await?;

        let mut booking_active: bookings::ActiveModel = booking.into();
        booking_active.partner_id = Set(Some(partner_id));
        booking_active.status = Set(BookingStatus::Assigned);
        booking_active.updated_at = Set(Some(chrono::Utc::now()));
        let booking = booking_active.update(txn).await?;

        tracing::info!(booking_id = %booking.id, %partner_id, distance_km, "booking assigned");
        return Ok((booking, Some(partner)));
    }

    Ok((booking, None))
}

/// Partner accepts an assigned booking.
pub async fn accept(
    db: &DatabaseConnection,
    partner_id: Uuid,
    booking_id: Uuid,
) -> Result<bookings::Model, ApiError> {
    let txn = db.begin().await?;
    let booking = booking_db::get_booking_for_update(&txn, booking_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    if booking.partner_id != Some(partner_id) {
        return Err(ApiError::forbidden("booking is not assigned to you"));
    }
    status::ensure_transition(booking.status, BookingStatus::Accepted)?;

    let mut active: bookings::ActiveModel = booking.into();
    active.status = Set(BookingStatus::Accepted);
    active.updated_at = Set(Some(chrono::Utc::now()));
    let booking = active.update(&txn).await?;
    txn.commit().await?;
    Ok(booking)
}

/// Partner rejects an assigned booking: free the partner, re-run the search,
/// fall back to `pending` when nobody else is in range. The rejecting partner
/// becomes available again before the re-search and may be re-selected.
pub async fn reject(
    db: &DatabaseConnection,
    partner_id: Uuid,
    booking_id: Uuid,
) -> Result<TransitionOutcome, ApiError> {
    let txn = db.begin().await?;
    let booking = booking_db::get_booking_for_update(&txn, booking_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    if booking.partner_id != Some(partner_id) {
        return Err(ApiError::forbidden("booking is not assigned to you"));
    }
    status::ensure_transition(booking.status, BookingStatus::Rejected)?;

    free_partner(&txn, partner_id).await?;

    let mut active: bookings::ActiveModel = booking.into();
    active.partner_id = Set(None);
    active.status = Set(BookingStatus::Rejected);
    active.updated_at = Set(Some(chrono::Utc::now()));
    let booking = active.update(&txn).await?;

    let (booking, new_partner) = try_assign(&txn, booking).await?;

    // No replacement found: the booking falls back to pending.
    let booking = if new_partner.is_none() {
        let mut active: bookings::ActiveModel = booking.into();
        active.status = Set(BookingStatus::Pending);
        let booking = active.update(&txn).await?;
        tracing::info!(booking_id = %booking.id, "no replacement partner, back to pending");
        booking
    } else {
        booking
    };

    txn.commit().await?;
    Ok(TransitionOutcome {
        booking,
        notified_partner: new_partner,
    })
}

/// Partner starts the job after presenting the start-verification code.
pub async fn start(
    db: &DatabaseConnection,
    partner_id: Uuid,
    booking_id: Uuid,
    start_code: &str,
) -> Result<bookings::Model, ApiError> {
    let txn = db.begin().await?;
    let booking = booking_db::get_booking_for_update(&txn, booking_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    if booking.partner_id != Some(partner_id) {
        return Err(ApiError::forbidden("booking is not assigned to you"));
    }
    status::ensure_transition(booking.status, BookingStatus::InProgress)?;
    if booking.start_code.as_deref() != Some(start_code) {
        return Err(ApiError::validation("incorrect start code"));
    }

    let mut active: bookings::ActiveModel = booking.into();
    active.status = Set(BookingStatus::InProgress);
    active.updated_at = Set(Some(chrono::Utc::now()));
    let booking = active.update(&txn).await?;
    txn.commit().await?;
    Ok(booking)
}

/// Partner completes the job with photo proof. Frees the partner and bumps
/// their completed-job counter in the same transaction.
pub async fn complete(
    db: &DatabaseConnection,
    partner_id: Uuid,
    booking_id: Uuid,
    input: CompleteBooking,
) -> Result<bookings::Model, ApiError> {
    if input.proof_photos.is_empty() {
        return Err(ApiError::validation("at least one proof photo is required"));
    }

    let txn = db.begin().await?;
    let booking = booking_db::get_booking_for_update(&txn, booking_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    if booking.partner_id != Some(partner_id) {
        return Err(ApiError::forbidden("booking is not assigned to you"));
    }
    status::ensure_transition(booking.status, BookingStatus::Completed)?;

    let mut active: bookings::ActiveModel = booking.into();
    active.status = Set(BookingStatus::Completed);
    active.completed_at = Set(Some(chrono::Utc::now()));
    active.proof_photos = Set(serde_json::json!(input.proof_photos));
    active.updated_at = Set(Some(chrono::Utc::now()));
    let booking = active.update(&txn).await?;

    let partner = partners::Entity::find_by_id(partner_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found("Partner not found"))?;
    let completed_jobs = partner.completed_jobs + 1;
    let mut partner_active: partners::ActiveModel = partner.into();
    partner_active.is_available = Set(true);
    partner_active.completed_jobs = Set(completed_jobs);
    partner_active.update(&txn).await?;

    txn.commit().await?;
    Ok(booking)
}

/// Partner pauses / resumes an in-progress job.
pub async fn set_paused(
    db: &DatabaseConnection,
    partner_id: Uuid,
    booking_id: Uuid,
    paused: bool,
) -> Result<bookings::Model, ApiError> {
    let target = if paused {
        BookingStatus::Paused
    } else {
        BookingStatus::InProgress
    };

    let txn = db.begin().await?;
    let booking = booking_db::get_booking_for_update(&txn, booking_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    if booking.partner_id != Some(partner_id) {
        return Err(ApiError::forbidden("booking is not assigned to you"));
    }
    status::ensure_transition(booking.status, target)?;

    let mut active: bookings::ActiveModel = booking.into();
    active.status = Set(target);
    active.updated_at = Set(Some(chrono::Utc::now()));
    let booking = active.update(&txn).await?;
    txn.commit().await?;
    Ok(booking)
}

/// User edits schedule/location details while the job has not started.
/// Any change a travel fare depends on re-quotes the trip against the
/// current rate card, so the stored breakdown never drifts from the route.
pub async fn edit(
    db: &DatabaseConnection,
    user_id: Uuid,
    booking_id: Uuid,
    input: EditBooking,
    distance_client: &dyn DistanceClient,
) -> Result<bookings::Model, ApiError> {
    let txn = db.begin().await?;
    let booking = booking_db::get_booking_for_update(&txn, booking_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    if booking.user_id != user_id {
        return Err(ApiError::forbidden("you can only edit your own bookings"));
    }
    if !booking.status.is_editable() {
        return Err(ApiError::conflict(format!(
            "booking can no longer be edited in status {:?}",
            booking.status
        )));
    }

    if let Some(date) = input.scheduled_date {
        if date < chrono::Utc::now().date_naive() {
            return Err(ApiError::validation("scheduled date must not be in the past"));
        }
    }
    if let Some(time) = &input.scheduled_time {
        fare::parse_scheduled_hour(time)?;
    }
    if let Some(d) = input.duration_min {
        if !d.is_finite() || d <= 0.0 {
            return Err(ApiError::validation("duration_min must be a positive number"));
        }
    }

    // Effective trip after the edit; partial coordinate updates merge with
    // the stored ones before validation.
    let pickup = GeoPoint::new(
        input.pickup_lat.unwrap_or(booking.pickup_lat),
        input.pickup_lng.unwrap_or(booking.pickup_lng),
    );
    if !pickup.is_valid() {
        return Err(ApiError::validation("invalid pickup coordinates"));
    }
    let dropoff_lat = input.dropoff_lat.or(booking.dropoff_lat);
    let dropoff_lng = input.dropoff_lng.or(booking.dropoff_lng);
    let scheduled_time = input
        .scheduled_time
        .clone()
        .unwrap_or_else(|| booking.scheduled_time.clone());

    let quote = if booking.kind == BookingKind::Travel && fare_inputs_changed(&input) {
        let vehicle_type_id = booking
            .vehicle_type_id
            .ok_or_else(|| ApiError::conflict("travel booking has no vehicle type"))?;
        let profile = crate::db::catalog::get_vehicle_type_by_id(&txn, vehicle_type_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Vehicle type not found"))?;
        let dropoff = match (dropoff_lat, dropoff_lng) {
            (Some(lat), Some(lng)) => GeoPoint::new(lat, lng),
            _ => return Err(ApiError::validation("travel bookings need a dropoff")),
        };
        if !dropoff.is_valid() {
            return Err(ApiError::validation("invalid dropoff coordinates"));
        }
        let hour = fare::parse_scheduled_hour(&scheduled_time)?;
        let duration_min = input
            .duration_min
            .unwrap_or_else(|| stored_duration_min(booking.time_cost, profile.per_minute_rate));
        let distance_km = distance_client.distance_km(pickup, dropoff).await?;
        Some(fare::compute_fare(&profile, distance_km, duration_min, hour)?)
    } else {
        None
    };

    let mut active: bookings::ActiveModel = booking.into();
    if let Some(lat) = input.pickup_lat {
        active.pickup_lat = Set(lat);
    }
    if let Some(lng) = input.pickup_lng {
        active.pickup_lng = Set(lng);
    }
    if let Some(address) = input.pickup_address {
        active.pickup_address = Set(address);
    }
    if let Some(lat) = input.dropoff_lat {
        active.dropoff_lat = Set(Some(lat));
    }
    if let Some(lng) = input.dropoff_lng {
        active.dropoff_lng = Set(Some(lng));
    }
    if let Some(address) = input.dropoff_address {
        active.dropoff_address = Set(Some(address));
    }
    if let Some(date) = input.scheduled_date {
        active.scheduled_date = Set(date);
    }
    if let Some(time) = input.scheduled_time {
        active.scheduled_time = Set(time);
    }
    if let Some(quote) = quote {
        active.amount = Set(quote.total);
        active.base_fare = Set(quote.base_fare);
        active.distance_cost = Set(quote.distance_cost);
        active.time_cost = Set(quote.time_cost);
        active.night_surcharge = Set(quote.night_surcharge);
        active.tax = Set(quote.tax);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));
    let booking = active.update(&txn).await?;
    txn.commit().await?;
    Ok(booking)
}

/// User cancels. Allowed from any non-terminal state except in-progress;
/// frees the assigned partner if there is one.
pub async fn cancel(
    db: &DatabaseConnection,
    user_id: Uuid,
    booking_id: Uuid,
    input: CancelBooking,
) -> Result<bookings::Model, ApiError> {
    if input.reason.trim().is_empty() {
        return Err(ApiError::validation("cancellation reason is required"));
    }

    let txn = db.begin().await?;
    let booking = booking_db::get_booking_for_update(&txn, booking_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    if booking.user_id != user_id {
        return Err(ApiError::forbidden("you can only cancel your own bookings"));
    }
    if !booking.status.is_cancellable() {
        return Err(ApiError::conflict(format!(
            "booking cannot be cancelled in status {:?}",
            booking.status
        )));
    }

    if let Some(partner_id) = booking.partner_id {
        free_partner(&txn, partner_id).await?;
    }

    let mut active: bookings::ActiveModel = booking.into();
    active.status = Set(BookingStatus::Cancelled);
    active.cancel_reason = Set(Some(input.reason));
    active.cancelled_at = Set(Some(chrono::Utc::now()));
    active.updated_at = Set(Some(chrono::Utc::now()));
    let booking = active.update(&txn).await?;
    txn.commit().await?;
    Ok(booking)
}

/// User reviews a completed booking. Exactly one review per booking; the
/// partner's running rating average is folded in the same transaction.
pub async fn review(
    db: &DatabaseConnection,
    user_id: Uuid,
    booking_id: Uuid,
    input: CreateReview,
) -> Result<crate::models::reviews::Model, ApiError> {
    let txn = db.begin().await?;
    let booking = booking_db::get_booking_for_update(&txn, booking_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    let already_reviewed = review_db::get_review_by_booking(&txn, booking_id).await?.is_some();
    ensure_review_allowed(&booking, user_id, already_reviewed, input.rating)?;

    let review = review_db::insert_review(
        &txn,
        booking_id,
        user_id,
        booking.partner_id,
        input.rating,
        input.comment,
    )
    .await?;

    if let Some(partner_id) = booking.partner_id {
        partner_db::apply_rating(&txn, partner_id, review.rating).await?;
    }

    txn.commit().await?;
    Ok(review)
}

/// Operator assigns a specific partner, replacing any current assignee.
/// The old partner is freed and the new one locked in the same transaction.
pub async fn assign_manual(
    db: &DatabaseConnection,
    booking_id: Uuid,
    partner_id: Uuid,
) -> Result<TransitionOutcome, ApiError> {
    let txn = db.begin().await?;
    let booking = booking_db::get_booking_for_update(&txn, booking_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    if booking.status.is_terminal() || booking.status == BookingStatus::InProgress {
        return Err(ApiError::conflict(format!(
            "booking cannot be reassigned in status {:?}",
            booking.status
        )));
    }

    if let Some(old_partner_id) = booking.partner_id {
        if old_partner_id == partner_id {
            return Err(ApiError::conflict("partner is already assigned to this booking"));
        }
        free_partner(&txn, old_partner_id).await?;
    }

    let partner = partners::Entity::find_by_id(partner_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found("Partner not found"))?;
    if !partner.is_available {
        return Err(ApiError::conflict("partner already holds an assignment"));
    }
    if partner.kyc_status != KycStatus::Approved {
        return Err(ApiError::validation("partner is not KYC approved"));
    }

    let mut partner_active: partners::ActiveModel = partner.into();
    partner_active.is_available = Set(false);
    let partner = partner_active.update(&txn).await?;

    let mut active: bookings::ActiveModel = booking.into();
    active.partner_id = Set(Some(partner_id));
    active.status = Set(BookingStatus::Assigned);
    active.updated_at = Set(Some(chrono::Utc::now()));
    let booking = active.update(&txn).await?;

    txn.commit().await?;
    Ok(TransitionOutcome {
        booking,
        notified_partner: Some(partner),
    })
}

/// Operator closes out an in-progress job on the partner's behalf (e.g. the
/// partner's app died after the work was done). No proof photos required.
pub async fn complete_manual(
    db: &DatabaseConnection,
    booking_id: Uuid,
) -> Result<bookings::Model, ApiError> {
    let txn = db.begin().await?;
    let booking = booking_db::get_booking_for_update(&txn, booking_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    status::ensure_transition(booking.status, BookingStatus::Completed)?;
    let partner_id = booking.partner_id;

    let mut active: bookings::ActiveModel = booking.into();
    active.status = Set(BookingStatus::Completed);
    active.completed_at = Set(Some(chrono::Utc::now()));
    active.updated_at = Set(Some(chrono::Utc::now()));
    let booking = active.update(&txn).await?;

    if let Some(partner_id) = partner_id {
        let partner = partners::Entity::find_by_id(partner_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| ApiError::not_found("Partner not found"))?;
        let completed_jobs = partner.completed_jobs + 1;
        let mut partner_active: partners::ActiveModel = partner.into();
        partner_active.is_available = Set(true);
        partner_active.completed_jobs = Set(completed_jobs);
        partner_active.update(&txn).await?;
    }

    txn.commit().await?;
    tracing::info!(booking_id = %booking.id, "booking force-completed by operator");
    Ok(booking)
}

async fn free_partner<C: ConnectionTrait>(txn: &C, partner_id: Uuid) -> Result<(), ApiError> {
    let partner = partners::Entity::find_by_id(partner_id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| ApiError::not_found("Partner not found"))?;
    let mut active: partners::ActiveModel = partner.into();
    active.is_available = Set(true);
    active.update(txn).await?;
    Ok(())
}

/// Post-commit push to the newly assigned partner. Failures are logged and
/// never retried.
pub async fn notify_assignment(notifier: &dyn PushNotifier, outcome: &TransitionOutcome) {
    let Some(partner) = &outcome.notified_partner else {
        return;
    };
    let Some(token) = &partner.device_token else {
        return;
    };
    let body = match &outcome.booking.code {
        Some(code) => format!("New booking {code} assigned to you"),
        None => "A new booking has been assigned to you".to_string(),
    };
    if let Err(e) = notifier
        .send(
            token,
            "New booking",
            &body,
            serde_json::json!({ "booking_id": outcome.booking.id }),
        )
        .await
    {
        tracing::warn!(error = %e, partner_id = %partner.id, "assignment push failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_booking(user_id: Uuid) -> bookings::Model {
        bookings::Model {
            id: Uuid::new_v4(),
            code: Some("WAVED001".into()),
            user_id,
            partner_id: Some(Uuid::new_v4()),
            kind: BookingKind::Travel,
            category_id: None,
            service_id: None,
            sub_service_id: None,
            vehicle_type_id: Some(Uuid::new_v4()),
            pickup_lat: 28.61,
            pickup_lng: 77.21,
            pickup_address: "Connaught Place".into(),
            dropoff_lat: Some(28.56),
            dropoff_lng: Some(77.10),
            dropoff_address: Some("IGI Airport".into()),
            scheduled_date: chrono::Utc::now().date_naive(),
            scheduled_time: "14:00".into(),
            amount: 250.0,
            base_fare: 50.0,
            distance_cost: 120.0,
            time_cost: 60.0,
            night_surcharge: 0.0,
            tax: 20.0,
            discount: 0.0,
            status: BookingStatus::Completed,
            start_code: Some("1234".into()),
            cancel_reason: None,
            cancelled_at: None,
            completed_at: Some(chrono::Utc::now()),
            proof_photos: serde_json::json!([]),
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    fn idle_partner() -> partners::Model {
        partners::Model {
            id: Uuid::new_v4(),
            phone: "+911234567890".into(),
            name: Some("Ravi".into()),
            email: None,
            address: None,
            kyc_status: KycStatus::Approved,
            profile_complete: true,
            is_available: true,
            on_duty: true,
            category_id: None,
            service_id: None,
            vehicle_type_id: Some(Uuid::new_v4()),
            lat: Some(28.62),
            lng: Some(77.20),
            location_updated_at: Some(chrono::Utc::now()),
            device_token: None,
            rating: 4.5,
            rating_count: 10,
            completed_jobs: 25,
            experience_years: Some(3),
            price: None,
            otp_code: None,
            otp_expires_at: None,
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn partner_holding_an_assignment_is_not_selectable() {
        let mut partner = idle_partner();
        partner.is_available = false;
        assert!(!is_selectable(&partner));
    }

    #[test]
    fn off_duty_partner_is_not_selectable() {
        let mut partner = idle_partner();
        partner.on_duty = false;
        assert!(!is_selectable(&partner));
    }

    #[test]
    fn free_on_duty_partner_is_selectable() {
        assert!(is_selectable(&idle_partner()));
    }

    #[test]
    fn first_review_on_a_completed_booking_is_allowed() {
        let user_id = Uuid::new_v4();
        let booking = completed_booking(user_id);
        assert!(ensure_review_allowed(&booking, user_id, false, 4).is_ok());
    }

    #[test]
    fn second_review_on_the_same_booking_is_rejected() {
        let user_id = Uuid::new_v4();
        let booking = completed_booking(user_id);
        let result = ensure_review_allowed(&booking, user_id, true, 4);
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[test]
    fn only_the_booking_owner_may_review() {
        let booking = completed_booking(Uuid::new_v4());
        let result = ensure_review_allowed(&booking, Uuid::new_v4(), false, 4);
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn unfinished_booking_cannot_be_reviewed() {
        let user_id = Uuid::new_v4();
        let mut booking = completed_booking(user_id);
        booking.status = BookingStatus::InProgress;
        let result = ensure_review_allowed(&booking, user_id, false, 4);
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[test]
    fn out_of_range_ratings_are_rejected() {
        let user_id = Uuid::new_v4();
        let booking = completed_booking(user_id);
        for rating in [0, 6, -1] {
            assert!(ensure_review_allowed(&booking, user_id, false, rating).is_err());
        }
    }

    #[test]
    fn geo_and_schedule_edits_trigger_a_requote() {
        let blank = EditBooking {
            pickup_lat: None,
            pickup_lng: None,
            pickup_address: None,
            dropoff_lat: None,
            dropoff_lng: None,
            dropoff_address: None,
            scheduled_date: None,
            scheduled_time: None,
            duration_min: None,
        };
        assert!(!fare_inputs_changed(&blank));

        let address_only = EditBooking {
            pickup_address: Some("Flat 4B, same building".into()),
            ..blank.clone()
        };
        assert!(!fare_inputs_changed(&address_only));

        let moved_dropoff = EditBooking {
            dropoff_lat: Some(28.4),
            dropoff_lng: Some(77.0),
            ..blank.clone()
        };
        assert!(fare_inputs_changed(&moved_dropoff));

        let night_shift = EditBooking {
            scheduled_time: Some("23:30".into()),
            ..blank
        };
        assert!(fare_inputs_changed(&night_shift));
    }

    #[test]
    fn stored_duration_survives_a_round_trip_through_the_breakdown() {
        // 45 min at 2.0/min was stored as time_cost = 90.0.
        assert_eq!(stored_duration_min(90.0, 2.0), 45.0);
    }

    #[test]
    fn zero_rate_profiles_fall_back_to_zero_duration() {
        assert_eq!(stored_duration_min(0.0, 0.0), 0.0);
    }
}
