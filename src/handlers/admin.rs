//! Admin/operator endpoints: user and partner oversight, KYC decisions,
//! manual booking assignment and wallet adjustments.

use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AdminUser;
use crate::booking;
use crate::db::{bookings as booking_db, partners as partner_db, wallets as wallet_db};
use crate::error::{ApiError, ApiResult};
use crate::handlers::ok;
use crate::models::bookings::BookingStatus;
use crate::models::partners::{KycStatus, PartnerResponse};
use crate::models::users::UserResponse;
use crate::models::wallets::WalletAdjustment;
use crate::notify::PushNotifier;

/// GET /api/admin/users
pub async fn list_users(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let users: Vec<UserResponse> = crate::db::users::get_all_users(db.get_ref())
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(ok(users))
}

/// GET /api/admin/partners
pub async fn list_partners(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let partners: Vec<PartnerResponse> = partner_db::get_all_partners(db.get_ref())
        .await?
        .into_iter()
        .map(PartnerResponse::from)
        .collect();
    Ok(ok(partners))
}

#[derive(Debug, Deserialize)]
pub struct KycDecision {
    pub status: KycStatus,
}

/// PUT /api/admin/partners/{id}/kyc — approve or reject a partner's KYC.
pub async fn set_kyc_status(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<KycDecision>,
) -> ApiResult<HttpResponse> {
    if body.status == KycStatus::Pending {
        return Err(ApiError::validation("decision must be approved or rejected"));
    }
    let partner =
        partner_db::set_kyc_status(db.get_ref(), path.into_inner(), body.status.clone()).await?;
    Ok(ok(PartnerResponse::from(partner)))
}

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
}

/// GET /api/admin/bookings?status=pending
pub async fn list_bookings(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<BookingListQuery>,
) -> ApiResult<HttpResponse> {
    Ok(ok(booking_db::get_all_bookings(db.get_ref(), query.status).await?))
}

#[derive(Debug, Deserialize)]
pub struct ManualAssign {
    pub partner_id: Uuid,
}

/// POST /api/admin/bookings/{id}/assign — operator picks the partner.
pub async fn assign_booking(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    notifier: web::Data<Arc<dyn PushNotifier>>,
    path: web::Path<Uuid>,
    body: web::Json<ManualAssign>,
) -> ApiResult<HttpResponse> {
    let outcome = booking::assign_manual(db.get_ref(), path.into_inner(), body.partner_id).await?;
    booking::notify_assignment(notifier.get_ref().as_ref(), &outcome).await;
    Ok(ok(outcome.booking))
}

/// POST /api/admin/bookings/{id}/complete — operator closes out a job.
pub async fn complete_booking(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let booking = booking::complete_manual(db.get_ref(), path.into_inner()).await?;
    Ok(ok(booking))
}

/// POST /api/admin/partners/{id}/wallet/recharge — credit a partner wallet.
pub async fn recharge_wallet(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<WalletAdjustment>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    let wallet = wallet_db::get_by_partner(db.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Wallet not found"))?;
    let entry = wallet_db::credit(
        db.get_ref(),
        wallet.id,
        input.amount,
        &input.description,
        input.reference,
    )
    .await?;
    Ok(ok(entry))
}

/// POST /api/admin/partners/{id}/wallet/debit — debit a partner wallet,
/// rejected if it would push the balance below the wallet's floor.
pub async fn debit_wallet(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<WalletAdjustment>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    let wallet = wallet_db::get_by_partner(db.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Wallet not found"))?;
    let entry = wallet_db::debit(
        db.get_ref(),
        wallet.id,
        input.amount,
        &input.description,
        input.reference,
    )
    .await?;
    Ok(ok(entry))
}
