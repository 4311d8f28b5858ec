//! OTP login for users and partners. A request-otp call finds or creates the
//! account, stores a short-lived code and hands it to the SMS collaborator;
//! verify-otp checks code and expiry, clears the transient fields and issues
//! an HS256 JWT carrying the principal's role.

use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::jwt;
use crate::auth::middleware::JwtSecret;
use crate::db::{partners as partner_db, users as user_db, wallets as wallet_db};
use crate::error::{ApiError, ApiResult};
use crate::handlers::{message, ok};
use crate::models::partners::PartnerResponse;
use crate::models::users::{Roles, UserResponse};
use crate::notify::SmsSender;

const OTP_TTL_MINUTES: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct RequestOtp {
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtp {
    pub phone: String,
    pub code: String,
}

fn validate_phone(phone: &str) -> Result<(), ApiError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.len() < 8 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::validation("invalid phone number"));
    }
    Ok(())
}

fn generate_otp() -> String {
    format!("{:04}", fastrand::u32(1000..10000))
}

fn check_otp(
    stored_code: Option<&str>,
    expires_at: Option<chrono::DateTime<chrono::Utc>>,
    supplied: &str,
) -> Result<(), ApiError> {
    let code = stored_code.ok_or_else(|| ApiError::validation("no OTP requested"))?;
    let expires_at = expires_at.ok_or_else(|| ApiError::validation("no OTP requested"))?;
    if chrono::Utc::now() > expires_at {
        return Err(ApiError::validation("OTP has expired"));
    }
    if code != supplied {
        return Err(ApiError::Unauthorized("incorrect OTP".to_string()));
    }
    Ok(())
}

/// POST /api/user/auth/request-otp
pub async fn request_user_otp(
    db: web::Data<DatabaseConnection>,
    sms: web::Data<Arc<dyn SmsSender>>,
    body: web::Json<RequestOtp>,
) -> ApiResult<HttpResponse> {
    validate_phone(&body.phone)?;

    let user = user_db::find_or_create_by_phone(db.get_ref(), &body.phone).await?;
    let code = generate_otp();
    let expires_at = chrono::Utc::now() + chrono::Duration::minutes(OTP_TTL_MINUTES);
    user_db::set_otp(db.get_ref(), user.id, &code, expires_at).await?;

    sms.send(&user.phone, &code).await?;
    Ok(message("OTP sent"))
}

/// POST /api/user/auth/verify-otp — issues the session token.
pub async fn verify_user_otp(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<VerifyOtp>,
) -> ApiResult<HttpResponse> {
    let user = user_db::get_user_by_phone(db.get_ref(), &body.phone)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    check_otp(user.otp_code.as_deref(), user.otp_expires_at, &body.code)?;
    user_db::clear_otp(db.get_ref(), user.id).await?;

    let role = match user.role {
        Roles::Admin => jwt::ROLE_ADMIN,
        Roles::User => jwt::ROLE_USER,
    };
    let token = jwt::issue_token(user.id, role, &user.phone, &secret.0)
        .map_err(ApiError::internal)?;

    Ok(ok(serde_json::json!({
        "token": token,
        "user": UserResponse::from(user),
    })))
}

/// POST /api/partner/auth/request-otp
pub async fn request_partner_otp(
    db: web::Data<DatabaseConnection>,
    sms: web::Data<Arc<dyn SmsSender>>,
    body: web::Json<RequestOtp>,
) -> ApiResult<HttpResponse> {
    validate_phone(&body.phone)?;

    let partner = partner_db::find_or_create_by_phone(db.get_ref(), &body.phone).await?;

    // First contact also opens the partner's wallet.
    if wallet_db::get_by_partner(db.get_ref(), partner.id).await?.is_none() {
        let min_balance = std::env::var("MIN_WALLET_BALANCE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0.0);
        wallet_db::create_for_partner(db.get_ref(), partner.id, min_balance).await?;
    }

    let code = generate_otp();
    let expires_at = chrono::Utc::now() + chrono::Duration::minutes(OTP_TTL_MINUTES);
    partner_db::set_otp(db.get_ref(), partner.id, &code, expires_at).await?;

    sms.send(&partner.phone, &code).await?;
    Ok(message("OTP sent"))
}

/// POST /api/partner/auth/verify-otp
pub async fn verify_partner_otp(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<VerifyOtp>,
) -> ApiResult<HttpResponse> {
    let partner = partner_db::get_partner_by_phone(db.get_ref(), &body.phone)
        .await?
        .ok_or_else(|| ApiError::not_found("Partner not found"))?;

    check_otp(partner.otp_code.as_deref(), partner.otp_expires_at, &body.code)?;
    partner_db::clear_otp(db.get_ref(), partner.id).await?;

    let token = jwt::issue_token(partner.id, jwt::ROLE_PARTNER, &partner.phone, &secret.0)
        .map_err(ApiError::internal)?;

    Ok(ok(serde_json::json!({
        "token": token,
        "partner": PartnerResponse::from(partner),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_validation() {
        assert!(validate_phone("+919876543210").is_ok());
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("98765abc10").is_err());
    }

    #[test]
    fn otp_check_rules() {
        let future = chrono::Utc::now() + chrono::Duration::minutes(5);
        let past = chrono::Utc::now() - chrono::Duration::minutes(1);

        assert!(check_otp(Some("1234"), Some(future), "1234").is_ok());
        assert!(matches!(
            check_otp(Some("1234"), Some(future), "9999"),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(check_otp(Some("1234"), Some(past), "1234").is_err());
        assert!(check_otp(None, None, "1234").is_err());
    }

    #[test]
    fn otp_is_four_digits() {
        for _ in 0..100 {
            let code = generate_otp();
            assert_eq!(code.len(), 4);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
