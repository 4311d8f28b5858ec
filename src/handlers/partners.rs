//! Partner self-service: profile, duty status, location heartbeat, wallet.

use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedPartner;
use crate::booking::geo::GeoPoint;
use crate::db::{partners as partner_db, wallets as wallet_db};
use crate::error::{ApiError, ApiResult};
use crate::handlers::ok;
use crate::models::partners::{
    CompletePartnerProfile, DutyToggle, KycStatus, LocationHeartbeat, PartnerResponse,
};

/// GET /api/partner/me
pub async fn me(partner: AuthenticatedPartner) -> HttpResponse {
    ok(PartnerResponse::from(partner.0))
}

/// PUT /api/partner/me
pub async fn complete_profile(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CompletePartnerProfile>,
) -> ApiResult<HttpResponse> {
    let updated =
        partner_db::complete_profile(db.get_ref(), partner.0.id, body.into_inner()).await?;
    Ok(ok(PartnerResponse::from(updated)))
}

/// POST /api/partner/duty — toggle availability for new assignments.
///
/// Going on duty requires an approved KYC, a complete profile and a wallet
/// balance at or above the configured floor.
pub async fn toggle_duty(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
    body: web::Json<DutyToggle>,
) -> ApiResult<HttpResponse> {
    let partner = partner.0;

    if body.on {
        if partner.kyc_status != KycStatus::Approved {
            return Err(ApiError::forbidden("KYC approval required to go on duty"));
        }
        if !partner.profile_complete {
            return Err(ApiError::validation("complete your profile to go on duty"));
        }
        let wallet = wallet_db::get_by_partner(db.get_ref(), partner.id)
            .await?
            .ok_or_else(|| ApiError::not_found("Wallet not found"))?;
        if wallet.balance < wallet.min_balance {
            return Err(ApiError::InsufficientBalance);
        }
    }

    partner_db::set_on_duty(db.get_ref(), partner.id, body.on).await?;
    Ok(ok(serde_json::json!({ "on_duty": body.on })))
}

/// POST /api/partner/location — heartbeat with the partner's current point.
pub async fn update_location(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
    body: web::Json<LocationHeartbeat>,
) -> ApiResult<HttpResponse> {
    if !GeoPoint::new(body.lat, body.lng).is_valid() {
        return Err(ApiError::validation("invalid coordinates"));
    }
    partner_db::update_location(db.get_ref(), partner.0.id, body.lat, body.lng).await?;
    Ok(ok(serde_json::json!({ "lat": body.lat, "lng": body.lng })))
}

/// GET /api/partner/wallet
pub async fn get_wallet(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let wallet = wallet_db::get_by_partner(db.get_ref(), partner.0.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Wallet not found"))?;
    Ok(ok(wallet))
}

/// GET /api/partner/wallet/transactions — ledger history, newest first.
pub async fn get_wallet_transactions(
    partner: AuthenticatedPartner,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let wallet = wallet_db::get_by_partner(db.get_ref(), partner.0.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Wallet not found"))?;
    let transactions = wallet_db::get_transactions(db.get_ref(), wallet.id).await?;
    Ok(ok(transactions))
}
