use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::jwt::{self, Claims};
use crate::models::{partners, users};

/// Wrapper type to store the JWT signing secret in Actix app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);

/// Shared part of every extractor: Bearer parsing + signature check.
fn claims_from_request(req: &HttpRequest) -> Result<Claims, Error> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Missing Authorization header"))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
    })?;

    let secret = req
        .app_data::<web::Data<JwtSecret>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("JWT secret not configured"))?;

    jwt::validate_token(token, &secret.0)
        .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))
}

fn db_from_request(req: &HttpRequest) -> Result<DatabaseConnection, Error> {
    req.app_data::<web::Data<DatabaseConnection>>()
        .map(|d| d.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Database not configured"))
}

/// An authenticated consumer (role `user` or `admin`).
pub struct AuthenticatedUser(pub users::Model);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let claims = claims_from_request(&req)?;
            if claims.role != jwt::ROLE_USER && claims.role != jwt::ROLE_ADMIN {
                return Err(actix_web::error::ErrorForbidden("user token required"));
            }
            let id = claims
                .principal_id()
                .map_err(actix_web::error::ErrorUnauthorized)?;

            let db = db_from_request(&req)?;
            let user = crate::db::users::get_user_by_id(&db, id)
                .await
                .map_err(|e| {
                    actix_web::error::ErrorInternalServerError(format!("Database error: {e}"))
                })?
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("Unknown user"))?;

            Ok(AuthenticatedUser(user))
        })
    }
}

/// An authenticated service partner / driver.
pub struct AuthenticatedPartner(pub partners::Model);

impl FromRequest for AuthenticatedPartner {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let claims = claims_from_request(&req)?;
            if claims.role != jwt::ROLE_PARTNER {
                return Err(actix_web::error::ErrorForbidden("partner token required"));
            }
            let id = claims
                .principal_id()
                .map_err(actix_web::error::ErrorUnauthorized)?;

            let db = db_from_request(&req)?;
            let partner = crate::db::partners::get_partner_by_id(&db, id)
                .await
                .map_err(|e| {
                    actix_web::error::ErrorInternalServerError(format!("Database error: {e}"))
                })?
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("Unknown partner"))?;

            Ok(AuthenticatedPartner(partner))
        })
    }
}

/// An authenticated admin. Role is checked both in the token and on the row.
pub struct AdminUser(pub users::Model);

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let claims = claims_from_request(&req)?;
            if claims.role != jwt::ROLE_ADMIN {
                return Err(actix_web::error::ErrorForbidden("admin token required"));
            }
            let id = claims
                .principal_id()
                .map_err(actix_web::error::ErrorUnauthorized)?;

            let db = db_from_request(&req)?;
            let user = crate::db::users::get_user_by_id(&db, id)
                .await
                .map_err(|e| {
                    actix_web::error::ErrorInternalServerError(format!("Database error: {e}"))
                })?
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("Unknown user"))?;

            if user.role != crate::models::users::Roles::Admin {
                return Err(actix_web::error::ErrorForbidden("admin access required"));
            }

            Ok(AdminUser(user))
        })
    }
}
